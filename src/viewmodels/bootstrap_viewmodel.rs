// ============================================================================
// BOOTSTRAP VIEWMODEL - Secuencia común a todas las páginas con sesión
// ============================================================================
// restaurar sesión -> wallet presente -> verificar red -> cargar ABIs ->
// ligar contratos. Cualquier fallo es terminal para esta carga de página.
// ============================================================================

use std::rc::Rc;
use crate::config::AppConfig;
use crate::errors::DappError;
use crate::services::config_service::ConfigSource;
use crate::services::contracts::{
    parse_address, ChronoLockContract, ContractBinding, ContractHandle, StakingContract,
    CHRONOLOCK_REQUIRED, STAKING_REQUIRED,
};
use crate::services::provider::Eip1193;
use crate::services::session_service::SessionService;
use crate::models::session::{shorten_address, WalletSession};
use crate::services::wallet_service::{on_accounts_changed, on_chain_changed, WalletChangeAction, WalletService};
use crate::state::{BootstrapState, PageState, SessionContext};
use crate::utils::constants::CONNECT_PAGE_URL;
use crate::utils::navigation::Navigator;
use crate::utils::storage::KeyValueStore;

/// Resultado del bootstrap
pub enum BootstrapOutcome<P> {
    /// Sin sesión: ya se redirigió a la página de conexión
    Redirected,
    /// Wallet en otra red: la página queda en solo lectura, sin datos
    NetworkMismatch(DappError),
    Ready(Rc<SessionContext<P>>),
    Failed(DappError),
}

impl<P> BootstrapOutcome<P> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Redirected => "Redirected",
            Self::NetworkMismatch(_) => "NetworkMismatch",
            Self::Ready(_) => "Ready",
            Self::Failed(_) => "Failed",
        }
    }
}

pub struct Bootstrapper<'a, S, N, C> {
    sessions: SessionService<S>,
    navigator: &'a N,
    config_source: &'a C,
    config: AppConfig,
    state: PageState,
}

impl<'a, S, N, C> Bootstrapper<'a, S, N, C>
where
    S: KeyValueStore,
    N: Navigator,
    C: ConfigSource,
{
    pub fn new(store: S, navigator: &'a N, config_source: &'a C, config: AppConfig, state: PageState) -> Self {
        Self {
            sessions: SessionService::new(store),
            navigator,
            config_source,
            config,
            state,
        }
    }

    /// `provider` es `None` cuando la página no detectó `window.ethereum`
    pub async fn run<P: Eip1193>(&self, provider: Option<P>) -> BootstrapOutcome<P> {
        log::info!("🚀 [BOOT] Iniciando bootstrap de página...");

        // 1. Sesión persistida; sin ella no se toca la cadena
        let Some(session) = self.sessions.load() else {
            log::info!("🔒 [BOOT] Sin sesión, redirigiendo a {}", CONNECT_PAGE_URL);
            self.navigator.redirect(CONNECT_PAGE_URL);
            return BootstrapOutcome::Redirected;
        };

        let Some(provider) = provider else {
            return self.fail(DappError::WalletMissing);
        };

        // La dirección persistida debe ser válida para firmar; si no, la sesión está corrupta
        let stored = match parse_address(&session.address) {
            Ok(addr) => addr,
            Err(e) => {
                log::warn!("⚠️ [BOOT] Dirección de sesión inválida ({}), cerrando sesión", e);
                return self.close_session();
            }
        };

        // 2. Red activa
        let wallet = WalletService::new(&provider);
        match wallet.verify_network(&self.config.network).await {
            Ok(()) => {}
            Err(DappError::WrongNetwork { expected, actual }) => {
                self.state.advance(BootstrapState::NetworkMismatch { actual: actual.clone() });
                return BootstrapOutcome::NetworkMismatch(DappError::WrongNetwork { expected, actual });
            }
            Err(err) => return self.fail(err),
        }

        // La cuenta activa del wallet manda sobre la persistida
        let active = match wallet.accounts().await {
            Ok(accounts) => accounts.into_iter().next(),
            Err(err) => return self.fail(err),
        };
        let Some(active) = active else {
            log::warn!("⚠️ [BOOT] El wallet no expone cuentas, cerrando sesión");
            return self.close_session();
        };
        let signer = match parse_address(&active) {
            Ok(addr) => addr,
            Err(e) => return self.fail(DappError::read_failed("eth_accounts", e)),
        };
        let session = if signer == stored {
            session
        } else {
            log::info!("👛 [BOOT] Cuenta activa cambiada: {} -> {}", session.short_address(), shorten_address(&active));
            let switched = WalletSession::connected(active);
            if let Err(e) = self.sessions.save(&switched) {
                log::error!("❌ [BOOT] No se pudo guardar la cuenta activa: {}", e);
            }
            switched
        };
        self.state.advance(BootstrapState::Bound);

        // 3. ABIs + bindings
        let contracts = match self.config_source.load().await {
            Ok(c) => c,
            Err(err) => return self.fail(err),
        };

        let token_binding = match ContractBinding::bind(
            "ChronoLock",
            &self.config.chronolock_address,
            &contracts.chronolock_abi,
            CHRONOLOCK_REQUIRED,
        ) {
            Ok(b) => b,
            Err(err) => return self.fail(err),
        };
        let staking_binding = match ContractBinding::bind(
            "Staking",
            &self.config.staking_address,
            &contracts.staking_abi,
            STAKING_REQUIRED,
        ) {
            Ok(b) => b,
            Err(err) => return self.fail(err),
        };

        let provider = Rc::new(provider);
        let context = SessionContext {
            token: ChronoLockContract::new(ContractHandle::new(token_binding, signer, provider.clone())),
            staking: StakingContract::new(ContractHandle::new(staking_binding, signer, provider.clone())),
            session,
            signer,
            provider,
            config: self.config.clone(),
        };

        log::info!("✅ [BOOT] Sesión lista para {}", context.short_address());
        BootstrapOutcome::Ready(Rc::new(context))
    }

    fn close_session<P>(&self) -> BootstrapOutcome<P> {
        if let Err(e) = self.sessions.clear() {
            log::error!("❌ [BOOT] No se pudo limpiar la sesión: {}", e);
        }
        self.navigator.redirect(CONNECT_PAGE_URL);
        BootstrapOutcome::Redirected
    }

    fn fail<P>(&self, err: DappError) -> BootstrapOutcome<P> {
        log::error!("❌ [BOOT] {}", err);
        self.state.advance(BootstrapState::Failed(err.clone()));
        BootstrapOutcome::Failed(err)
    }
}

/// Cierra la sesión y vuelve a la página de conexión, pase lo que pase
pub fn disconnect<S: KeyValueStore, N: Navigator>(store: S, navigator: &N) {
    log::info!("👋 [SESSION] Desconectando wallet");
    if let Err(e) = SessionService::new(store).clear() {
        log::error!("❌ [SESSION] Error limpiando sesión: {}", e);
    }
    navigator.redirect(CONNECT_PAGE_URL);
}

/// `accountsChanged`: sin cuentas se cierra sesión; con cuentas se persiste
/// la activa y se recarga la página entera
pub fn handle_accounts_changed<S: KeyValueStore, N: Navigator>(store: S, navigator: &N, accounts: &[String]) {
    match on_accounts_changed(accounts) {
        WalletChangeAction::Disconnect => disconnect(store, navigator),
        WalletChangeAction::Reload => {
            if let Some(active) = accounts.first() {
                if let Err(e) = SessionService::new(store).save(&WalletSession::connected(active.clone())) {
                    log::error!("❌ [SESSION] No se pudo guardar la cuenta activa: {}", e);
                }
            }
            navigator.reload();
        }
    }
}

/// `chainChanged`: siempre recarga completa
pub fn handle_chain_changed<N: Navigator>(navigator: &N) {
    if on_chain_changed() == WalletChangeAction::Reload {
        navigator.reload();
    }
}
