// ============================================================================
// STAKING VIEWMODEL - Pools, posiciones, approve / stake / unstake
// ============================================================================
// Pools y posiciones se cargan como dos tareas independientes; la vista
// pinta cada lista (o su error) por separado.
// ============================================================================

use alloy_primitives::U256;
use crate::errors::DappResult;
use crate::models::receipt::TransactionReceipt;
use crate::models::staking::{StakePosition, StakeStatus, StakingPool};
use crate::services::provider::Eip1193;
use crate::state::SessionContext;
use crate::utils::constants::{POOL_COUNT, TOKEN_DECIMALS};
use crate::utils::format::{format_countdown, format_units, parse_positive_amount, parse_units};

pub const APPROVE_SUCCESS: &str = "Approval successful! You can now stake your tokens.";
pub const STAKE_SUCCESS: &str = "You have successfully staked your tokens!";
pub const UNSTAKE_SUCCESS: &str = "Unstaked successfully! Your tokens and rewards are back in your wallet.";

/// Estado de los botones de una tarjeta de pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionGate {
    pub approve_enabled: bool,
    pub stake_enabled: bool,
}

impl ActionGate {
    pub const CLOSED: ActionGate = ActionGate { approve_enabled: false, stake_enabled: false };

    /// allowance >= amount => stake directo; si no, primero approve
    pub fn for_allowance(allowance: U256, amount: U256) -> Self {
        if allowance >= amount {
            Self { approve_enabled: false, stake_enabled: true }
        } else {
            Self { approve_enabled: true, stake_enabled: false }
        }
    }
}

/// Resultado de evaluar el input de cantidad de una tarjeta
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountCheck {
    pub gate: ActionGate,
    /// Recompensa según `calculateReward` del contrato
    pub reward: U256,
}

impl AmountCheck {
    pub fn empty() -> Self {
        Self { gate: ActionGate::CLOSED, reward: U256::ZERO }
    }
}

/// Fila ya resuelta de una posición para la vista
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionRow {
    pub position: StakePosition,
    pub status: StakeStatus,
    pub pool_label: String,
    pub estimated_reward: U256,
    /// Texto inicial de "Unlocks In"
    pub unlocks_in: String,
}

impl PositionRow {
    pub fn build(position: StakePosition, pools: &[StakingPool], now_secs: u64) -> Self {
        let status = position.status(now_secs);
        let unlocks_in = match status {
            StakeStatus::Locked => format_countdown(position.unlock_secs() as i64 - now_secs as i64),
            _ => "Unlocked".to_string(),
        };
        Self {
            pool_label: position.pool_label(pools),
            estimated_reward: position.estimated_reward(pools),
            status,
            unlocks_in,
            position,
        }
    }

    /// Las posiciones bloqueadas tienen cuenta atrás
    pub fn needs_countdown(&self) -> bool {
        self.status == StakeStatus::Locked
    }
}

pub async fn load_pools<P: Eip1193>(ctx: &SessionContext<P>) -> DappResult<Vec<StakingPool>> {
    let mut pools = Vec::with_capacity(POOL_COUNT as usize);
    for id in 0..POOL_COUNT {
        pools.push(ctx.staking.pool(id).await?);
    }
    log::info!("🏊 [STAKING] {} pools cargados", pools.len());
    Ok(pools)
}

pub async fn load_positions<P: Eip1193>(ctx: &SessionContext<P>) -> DappResult<Vec<StakePosition>> {
    let positions = ctx.staking.stakes_of(ctx.signer).await?;
    log::info!("📜 [STAKING] {} posiciones", positions.len());
    Ok(positions)
}

pub async fn load_balance<P: Eip1193>(ctx: &SessionContext<P>) -> DappResult<U256> {
    ctx.token.balance_of(ctx.signer).await
}

pub fn position_rows(positions: Vec<StakePosition>, pools: &[StakingPool], now_secs: u64) -> Vec<PositionRow> {
    positions
        .into_iter()
        .map(|p| PositionRow::build(p, pools, now_secs))
        .collect()
}

/// Texto del input al pulsar "Max"
pub fn max_amount_text(balance: U256) -> String {
    format_units(balance, TOKEN_DECIMALS)
}

/// Evalúa el input de cantidad: cantidad inválida o <= 0 cierra ambos botones
/// sin tocar la cadena
pub async fn check_amount<P: Eip1193>(ctx: &SessionContext<P>, text: &str, pool_id: u64) -> DappResult<AmountCheck> {
    let amount = match parse_units(text, TOKEN_DECIMALS) {
        Ok(a) if !a.is_zero() => a,
        _ => return Ok(AmountCheck::empty()),
    };

    let allowance = ctx.token.allowance(ctx.signer, ctx.staking.address()).await?;
    let reward = ctx.staking.calculate_reward(amount, pool_id).await?;

    Ok(AmountCheck {
        gate: ActionGate::for_allowance(allowance, amount),
        reward,
    })
}

/// `check_amount` descartando el resultado si el input cambió mientras se
/// leía la cadena; `None` = respuesta obsoleta
pub async fn check_current_amount<P, F>(
    ctx: &SessionContext<P>,
    text: &str,
    pool_id: u64,
    current_text: F,
) -> DappResult<Option<AmountCheck>>
where
    P: Eip1193,
    F: Fn() -> String,
{
    let check = check_amount(ctx, text, pool_id).await;
    if current_text() != text {
        log::debug!("⏭️ [STAKING] Resultado obsoleto para '{}' ignorado", text);
        return Ok(None);
    }
    check.map(Some)
}

pub async fn approve<P: Eip1193>(ctx: &SessionContext<P>, text: &str) -> DappResult<TransactionReceipt> {
    let amount = parse_positive_amount(text, TOKEN_DECIMALS)?;
    log::info!("✍️ [STAKING] Approve de {} wei", amount);
    let tx = ctx.token.approve(ctx.staking.address(), amount);
    ctx.transactions().execute(&tx).await
}

pub async fn stake<P: Eip1193>(ctx: &SessionContext<P>, text: &str, pool_id: u64) -> DappResult<TransactionReceipt> {
    let amount = parse_positive_amount(text, TOKEN_DECIMALS)?;
    log::info!("🔒 [STAKING] Stake de {} wei en pool {}", amount, pool_id);
    let tx = ctx.staking.stake(amount, pool_id);
    ctx.transactions().execute(&tx).await
}

pub async fn unstake<P: Eip1193>(ctx: &SessionContext<P>, index: usize) -> DappResult<TransactionReceipt> {
    log::info!("🔓 [STAKING] Unstake de la posición {}", index);
    let tx = ctx.staking.unstake(index);
    ctx.transactions().execute(&tx).await
}
