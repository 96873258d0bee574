// ============================================================================
// CONNECT VIEWMODEL - Conexión del wallet (index.html)
// ============================================================================

use crate::errors::{DappError, DappResult};
use crate::models::network::NetworkDescriptor;
use crate::models::session::WalletSession;
use crate::services::provider::Eip1193;
use crate::services::session_service::SessionService;
use crate::services::wallet_service::WalletService;
use crate::utils::constants::DASHBOARD_PAGE_URL;
use crate::utils::navigation::Navigator;
use crate::utils::storage::KeyValueStore;

pub struct ConnectViewModel<'a, S, N> {
    sessions: SessionService<S>,
    navigator: &'a N,
    network: NetworkDescriptor,
}

impl<'a, S: KeyValueStore, N: Navigator> ConnectViewModel<'a, S, N> {
    pub fn new(store: S, navigator: &'a N, network: NetworkDescriptor) -> Self {
        Self {
            sessions: SessionService::new(store),
            navigator,
            network,
        }
    }

    /// Con sesión válida no hay nada que conectar: directo al dashboard
    pub fn redirect_if_connected(&self) -> bool {
        if self.sessions.is_connected() {
            log::info!("✅ [CONNECT] Sesión existente, redirigiendo al dashboard");
            self.navigator.redirect(DASHBOARD_PAGE_URL);
            return true;
        }
        false
    }

    /// Cuentas -> red -> persistir sesión -> dashboard.
    /// Si algo falla la sesión no se escribe.
    pub async fn connect<P: Eip1193>(&self, provider: Option<&P>) -> DappResult<WalletSession> {
        let provider = provider.ok_or(DappError::WalletMissing)?;
        let wallet = WalletService::new(provider);

        log::info!("🔌 [CONNECT] Solicitando cuentas...");
        let accounts = wallet.request_accounts().await?;
        let address = accounts
            .into_iter()
            .next()
            .ok_or_else(|| DappError::ConnectionRejected("No account authorized".to_string()))?;

        wallet.ensure_network(&self.network).await?;

        let session = WalletSession::connected(address);
        self.sessions.save(&session).map_err(DappError::Dom)?;
        log::info!("✅ [CONNECT] Wallet conectado: {}", session.short_address());

        self.navigator.redirect(DASHBOARD_PAGE_URL);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::errors::{ProviderError, CODE_USER_REJECTED};
    use crate::testing::{MemoryStore, MockProvider, NavigationEvent, RecordingNavigator};

    const ACCOUNT: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";

    #[test]
    fn existing_session_goes_to_dashboard() {
        let store = MemoryStore::new();
        SessionService::new(&store).save(&WalletSession::connected(ACCOUNT)).unwrap();
        let navigator = RecordingNavigator::new();
        let vm = ConnectViewModel::new(&store, &navigator, NetworkDescriptor::bsc_mainnet());

        assert!(vm.redirect_if_connected());
        assert_eq!(navigator.events(), vec![NavigationEvent::Redirect("dashboard.html".into())]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn successful_connect_persists_and_redirects() {
        let store = MemoryStore::new();
        let navigator = RecordingNavigator::new();
        let provider = MockProvider::on_bsc();
        provider.respond("eth_requestAccounts", Ok(json!([ACCOUNT])));
        let vm = ConnectViewModel::new(&store, &navigator, NetworkDescriptor::bsc_mainnet());

        let session = vm.connect(Some(&provider)).await.unwrap();

        assert_eq!(session.address, ACCOUNT);
        assert_eq!(SessionService::new(&store).load(), Some(session));
        assert_eq!(navigator.events(), vec![NavigationEvent::Redirect("dashboard.html".into())]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejected_network_switch_leaves_no_session() {
        let store = MemoryStore::new();
        let navigator = RecordingNavigator::new();
        let provider = MockProvider::new();
        provider.respond("eth_requestAccounts", Ok(json!([ACCOUNT])));
        provider.respond("eth_chainId", Ok(json!("0x1")));
        provider.respond(
            "wallet_switchEthereumChain",
            Err(ProviderError::new(CODE_USER_REJECTED, "User rejected the request.")),
        );
        let vm = ConnectViewModel::new(&store, &navigator, NetworkDescriptor::bsc_mainnet());

        let err = vm.connect(Some(&provider)).await.unwrap_err();

        assert_eq!(err.modal_title(), "Network Error");
        assert!(store.is_empty());
        assert!(navigator.events().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejected_accounts_request_surfaces_reason() {
        let store = MemoryStore::new();
        let navigator = RecordingNavigator::new();
        let provider = MockProvider::on_bsc();
        provider.respond(
            "eth_requestAccounts",
            Err(ProviderError::new(CODE_USER_REJECTED, "User rejected the request.")),
        );
        let vm = ConnectViewModel::new(&store, &navigator, NetworkDescriptor::bsc_mainnet());

        let err = vm.connect(Some(&provider)).await.unwrap_err();

        assert_eq!(err.modal_title(), "Connection Failed");
        assert_eq!(err.user_message(), "User rejected the request.");
        assert_eq!(provider.count("eth_chainId"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn no_wallet_is_wallet_missing() {
        let store = MemoryStore::new();
        let navigator = RecordingNavigator::new();
        let vm = ConnectViewModel::new(&store, &navigator, NetworkDescriptor::bsc_mainnet());

        let err = vm.connect::<MockProvider>(None).await.unwrap_err();
        assert_eq!(err, DappError::WalletMissing);
    }
}
