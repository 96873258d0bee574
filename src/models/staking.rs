// ============================================================================
// STAKING - Pools y posiciones (copia de solo lectura del contrato)
// ============================================================================

use alloy_primitives::U256;

pub const SECONDS_PER_DAY: u64 = 86_400;
/// 365 días, igual que el contrato
pub const SECONDS_IN_YEAR: u64 = 31_536_000;

/// Pool de staking leído con `stakingPools(i)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakingPool {
    pub id: u64,
    /// Duración del bloqueo en segundos
    pub duration: U256,
    /// APR en porcentaje entero (12 = 12%)
    pub apr: U256,
}

impl StakingPool {
    pub fn new(id: u64, duration_secs: u64, apr: u64) -> Self {
        Self {
            id,
            duration: U256::from(duration_secs),
            apr: U256::from(apr),
        }
    }

    pub fn duration_days(&self) -> U256 {
        self.duration / U256::from(SECONDS_PER_DAY)
    }

    /// "30 Day Pool"
    pub fn title(&self) -> String {
        format!("{} Day Pool", self.duration_days())
    }

    pub fn estimate_reward(&self, amount: U256) -> U256 {
        estimate_reward(amount, self.apr, self.duration)
    }
}

/// Tabla local usada cuando no hay datos del contrato para el pool
pub fn fallback_pool(pool_id: u64) -> Option<StakingPool> {
    match pool_id {
        0 => Some(StakingPool::new(0, 30 * SECONDS_PER_DAY, 12)),
        1 => Some(StakingPool::new(1, 90 * SECONDS_PER_DAY, 18)),
        2 => Some(StakingPool::new(2, 180 * SECONDS_PER_DAY, 25)),
        _ => None,
    }
}

/// Estimación lineal: amount * apr * duration / año / 100.
///
/// Mismo orden de operaciones que el contrato (divisiones enteras al final),
/// solo para mostrar. Desbordamientos saturan en lugar de abortar.
pub fn estimate_reward(amount: U256, apr: U256, duration: U256) -> U256 {
    amount.saturating_mul(apr).saturating_mul(duration)
        / U256::from(SECONDS_IN_YEAR)
        / U256::from(100u64)
}

/// Estado visible de una posición
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakeStatus {
    Claimed,
    Unlocked,
    Locked,
}

impl StakeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Claimed => "Claimed",
            Self::Unlocked => "Ready to Claim",
            Self::Locked => "Locked",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Claimed => "status-claimed",
            Self::Unlocked => "status-unlocked",
            Self::Locked => "status-locked",
        }
    }

    /// Solo las posiciones desbloqueadas y sin reclamar se pueden retirar
    pub fn can_unstake(&self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

/// Posición de staking del usuario (`getStakes(user)[index]`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakePosition {
    pub index: usize,
    pub amount: U256,
    pub pool_id: U256,
    pub unlock_time: U256,
    pub claimed: bool,
}

impl StakePosition {
    pub fn unlock_secs(&self) -> u64 {
        self.unlock_time.saturating_to::<u64>()
    }

    pub fn pool_index(&self) -> Option<u64> {
        u64::try_from(self.pool_id).ok()
    }

    pub fn status(&self, now_secs: u64) -> StakeStatus {
        if self.claimed {
            StakeStatus::Claimed
        } else if now_secs > self.unlock_secs() {
            StakeStatus::Unlocked
        } else {
            StakeStatus::Locked
        }
    }

    /// Pool de esta posición: primero los datos leídos, luego la tabla local
    pub fn resolve_pool(&self, pools: &[StakingPool]) -> Option<StakingPool> {
        let id = self.pool_index()?;
        pools
            .iter()
            .find(|p| p.id == id)
            .copied()
            .or_else(|| fallback_pool(id))
    }

    pub fn estimated_reward(&self, pools: &[StakingPool]) -> U256 {
        self.resolve_pool(pools)
            .map(|pool| pool.estimate_reward(self.amount))
            .unwrap_or(U256::ZERO)
    }

    /// "30 Days"
    pub fn pool_label(&self, pools: &[StakingPool]) -> String {
        match self.resolve_pool(pools) {
            Some(pool) => format!("{} Days", pool.duration_days()),
            None => format!("Pool #{}", self.pool_id),
        }
    }
}

/// Resumen del dashboard: total en stake sin reclamar + posiciones activas
pub fn summarize_positions(positions: &[StakePosition]) -> (U256, usize) {
    positions
        .iter()
        .filter(|p| !p.claimed)
        .fold((U256::ZERO, 0), |(total, count), p| (total.saturating_add(p.amount), count + 1))
}
