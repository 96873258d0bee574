// ============================================================================
// DASHBOARD VIEWMODEL - Balance, resumen de posiciones y TVL
// ============================================================================
// Cada sección se carga por separado: un fallo en una no impide pintar las
// otras.
// ============================================================================

use alloy_primitives::U256;
use crate::errors::DappResult;
use crate::models::staking::summarize_positions;
use crate::services::provider::Eip1193;
use crate::state::SessionContext;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionSummary {
    /// Suma de posiciones sin reclamar
    pub total_staked: U256,
    pub active_stakes: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardData {
    pub balance: DappResult<U256>,
    pub positions: DappResult<PositionSummary>,
    pub tvl: DappResult<U256>,
}

impl DashboardData {
    pub fn is_complete(&self) -> bool {
        self.balance.is_ok() && self.positions.is_ok() && self.tvl.is_ok()
    }
}

pub async fn load_dashboard<P: Eip1193>(ctx: &SessionContext<P>) -> DashboardData {
    log::info!("📊 [DASHBOARD] Cargando datos para {}", ctx.short_address());

    let balance = ctx.token.balance_of(ctx.signer).await;
    let positions = ctx.staking.stakes_of(ctx.signer).await.map(|stakes| {
        let (total_staked, active_stakes) = summarize_positions(&stakes);
        PositionSummary { total_staked, active_stakes }
    });
    let tvl = ctx.staking.total_staked().await;

    let data = DashboardData { balance, positions, tvl };
    if data.is_complete() {
        log::info!("✅ [DASHBOARD] Datos cargados");
    } else {
        log::warn!("⚠️ [DASHBOARD] Carga parcial");
    }
    data
}
