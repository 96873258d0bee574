// ============================================================================
// SESSION CONTEXT - Todo lo que una página necesita tras el bootstrap
// ============================================================================
// Se construye una vez por carga de página y se comparte (Rc) con los
// handlers de eventos. Nunca se persiste.
// ============================================================================

use std::rc::Rc;
use alloy_primitives::Address;
use crate::config::AppConfig;
use crate::models::session::WalletSession;
use crate::services::contracts::{ChronoLockContract, StakingContract};
use crate::services::provider::Eip1193;
use crate::services::transaction_service::TransactionService;

pub struct SessionContext<P> {
    pub session: WalletSession,
    /// Dirección de la sesión ya parseada (signer de las transacciones)
    pub signer: Address,
    pub provider: Rc<P>,
    pub token: ChronoLockContract<P>,
    pub staking: StakingContract<P>,
    pub config: AppConfig,
}

impl<P: Eip1193> SessionContext<P> {
    pub fn transactions(&self) -> TransactionService<'_, P> {
        TransactionService::new(self.provider.as_ref(), self.config.receipt_poll_interval_ms)
    }

    pub fn short_address(&self) -> String {
        self.session.short_address()
    }
}
