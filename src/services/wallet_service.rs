// ============================================================================
// WALLET SERVICE - Cuentas, red activa y cambio de red
// ============================================================================

use serde_json::{json, Value};
use crate::errors::{DappError, DappResult};
use crate::models::network::NetworkDescriptor;
use crate::services::provider::Eip1193;

pub struct WalletService<'a, P> {
    provider: &'a P,
}

impl<'a, P: Eip1193> WalletService<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Chain id activo tal como lo reporta el wallet (`0x38`)
    pub async fn chain_id(&self) -> DappResult<String> {
        let value = self
            .provider
            .request("eth_chainId", json!([]))
            .await
            .map_err(|e| DappError::read_failed("eth_chainId", e))?;
        match value {
            Value::String(id) => Ok(id),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(DappError::read_failed("eth_chainId", format!("unexpected value {}", other))),
        }
    }

    /// `Ok(())` si el wallet está en la red configurada, `WrongNetwork` si no
    pub async fn verify_network(&self, network: &NetworkDescriptor) -> DappResult<()> {
        let actual = self.chain_id().await?;
        if network.matches(&actual) {
            Ok(())
        } else {
            log::warn!("⚠️ [WALLET] Red incorrecta: {} (esperada {})", actual, network.chain_id);
            Err(DappError::WrongNetwork {
                expected: network.chain_name.clone(),
                actual,
            })
        }
    }

    /// `eth_accounts`: cuentas ya autorizadas, sin popup. La primera es la activa.
    pub async fn accounts(&self) -> DappResult<Vec<String>> {
        let value = self
            .provider
            .request("eth_accounts", json!([]))
            .await
            .map_err(|e| DappError::read_failed("eth_accounts", e))?;
        Ok(parse_accounts(&value))
    }

    /// `eth_requestAccounts` (abre el popup del wallet)
    pub async fn request_accounts(&self) -> DappResult<Vec<String>> {
        let value = self
            .provider
            .request("eth_requestAccounts", json!([]))
            .await
            .map_err(|e| {
                DappError::ConnectionRejected(
                    e.reason()
                        .unwrap_or("An unknown error occurred. Please try again.")
                        .to_string(),
                )
            })?;
        let accounts = parse_accounts(&value);
        if accounts.is_empty() {
            return Err(DappError::ConnectionRejected("No account authorized".to_string()));
        }
        Ok(accounts)
    }

    /// Cambia a la red configurada; si el wallet no la conoce (4902) la añade
    pub async fn switch_network(&self, network: &NetworkDescriptor) -> DappResult<()> {
        log::info!("🔀 [WALLET] Cambiando a {} ({})", network.chain_name, network.chain_id);

        let switch = self
            .provider
            .request("wallet_switchEthereumChain", json!([{ "chainId": network.chain_id }]))
            .await;

        let switch_err = match switch {
            Ok(_) => return Ok(()),
            Err(e) => e,
        };

        if !switch_err.is_unrecognized_chain() {
            log::error!("❌ [WALLET] Cambio de red rechazado: {}", switch_err);
            return Err(DappError::NetworkSwitchRejected {
                reason: "Failed to switch network. Please change it manually in your wallet.".to_string(),
            });
        }

        log::info!("➕ [WALLET] Red desconocida para el wallet, añadiéndola...");
        let descriptor = serde_json::to_value(network)
            .map_err(|e| DappError::NetworkSwitchRejected { reason: e.to_string() })?;
        match self.provider.request("wallet_addEthereumChain", json!([descriptor])).await {
            Ok(_) => Ok(()),
            Err(add_err) => {
                log::error!("❌ [WALLET] No se pudo añadir la red: {}", add_err);
                Err(DappError::NetworkSwitchRejected {
                    reason: format!("Failed to add the {} network to your wallet.", network.chain_name),
                })
            }
        }
    }

    /// Verifica la red y, si no coincide, intenta cambiarla (solo en connect)
    pub async fn ensure_network(&self, network: &NetworkDescriptor) -> DappResult<()> {
        match self.verify_network(network).await {
            Err(DappError::WrongNetwork { .. }) => self.switch_network(network).await,
            other => other,
        }
    }
}

/// Lista de cuentas de `eth_requestAccounts` / evento `accountsChanged`
pub fn parse_accounts(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|a| a.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Qué hacer cuando el wallet notifica un cambio con la sesión abierta
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletChangeAction {
    /// Recarga completa: la página vuelve a pasar por el bootstrap
    Reload,
    /// El wallet ya no expone cuentas: cerrar sesión
    Disconnect,
}

pub fn on_accounts_changed(accounts: &[String]) -> WalletChangeAction {
    if accounts.is_empty() {
        WalletChangeAction::Disconnect
    } else {
        WalletChangeAction::Reload
    }
}

pub fn on_chain_changed() -> WalletChangeAction {
    WalletChangeAction::Reload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ProviderError, CODE_UNRECOGNIZED_CHAIN, CODE_USER_REJECTED};
    use crate::testing::MockProvider;

    #[tokio::test(flavor = "current_thread")]
    async fn matching_chain_passes_verification() {
        let provider = MockProvider::on_bsc();
        let wallet = WalletService::new(&provider);
        assert!(wallet.verify_network(&NetworkDescriptor::bsc_mainnet()).await.is_ok());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn other_chain_is_wrong_network() {
        let provider = MockProvider::new();
        provider.respond("eth_chainId", Ok(json!("0x1")));
        let wallet = WalletService::new(&provider);
        let err = wallet.verify_network(&NetworkDescriptor::bsc_mainnet()).await.unwrap_err();
        assert_eq!(
            err,
            DappError::WrongNetwork { expected: "BNB Smart Chain".into(), actual: "0x1".into() }
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn accounts_lists_authorized_accounts_without_prompt() {
        let provider = MockProvider::new();
        provider.respond("eth_accounts", Ok(json!(["0x2222222222222222222222222222222222222222"])));
        let wallet = WalletService::new(&provider);

        let accounts = wallet.accounts().await.unwrap();

        assert_eq!(accounts, vec!["0x2222222222222222222222222222222222222222".to_string()]);
        assert_eq!(provider.count("eth_requestAccounts"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unknown_chain_is_added_after_4902() {
        let provider = MockProvider::new();
        provider.respond("eth_chainId", Ok(json!("0x1")));
        provider.respond(
            "wallet_switchEthereumChain",
            Err(ProviderError::new(CODE_UNRECOGNIZED_CHAIN, "Unrecognized chain ID")),
        );
        provider.respond("wallet_addEthereumChain", Ok(Value::Null));

        let wallet = WalletService::new(&provider);
        wallet.ensure_network(&NetworkDescriptor::bsc_mainnet()).await.unwrap();

        let add = provider
            .calls()
            .into_iter()
            .find(|(m, _)| m == "wallet_addEthereumChain")
            .unwrap();
        assert_eq!(add.1[0]["chainId"], "0x38");
        assert_eq!(add.1[0]["rpcUrls"][0], "https://bsc-dataseed.binance.org/");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejected_switch_does_not_try_to_add() {
        let provider = MockProvider::new();
        provider.respond(
            "wallet_switchEthereumChain",
            Err(ProviderError::new(CODE_USER_REJECTED, "User rejected the request.")),
        );
        let wallet = WalletService::new(&provider);
        let err = wallet.switch_network(&NetworkDescriptor::bsc_mainnet()).await.unwrap_err();

        assert!(matches!(err, DappError::NetworkSwitchRejected { .. }));
        assert_eq!(provider.count("wallet_addEthereumChain"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_add_names_the_network() {
        let provider = MockProvider::new();
        provider.respond("wallet_switchEthereumChain", Err(ProviderError::new(CODE_UNRECOGNIZED_CHAIN, "")));
        provider.respond("wallet_addEthereumChain", Err(ProviderError::new(CODE_USER_REJECTED, "no")));
        let wallet = WalletService::new(&provider);
        let err = wallet.switch_network(&NetworkDescriptor::bsc_mainnet()).await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to add the BNB Smart Chain network to your wallet.");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_account_list_is_a_rejected_connection() {
        let provider = MockProvider::new();
        provider.respond("eth_requestAccounts", Ok(json!([])));
        let wallet = WalletService::new(&provider);
        assert_eq!(
            wallet.request_accounts().await.unwrap_err(),
            DappError::ConnectionRejected("No account authorized".into())
        );
    }

    #[test]
    fn account_changes_reload_or_disconnect() {
        assert_eq!(on_accounts_changed(&[]), WalletChangeAction::Disconnect);
        assert_eq!(on_accounts_changed(&["0xabc".to_string()]), WalletChangeAction::Reload);
        assert_eq!(on_chain_changed(), WalletChangeAction::Reload);
    }

    #[test]
    fn parse_accounts_ignores_non_strings() {
        assert_eq!(parse_accounts(&json!(["0xa", 3, null, "0xb"])), vec!["0xa", "0xb"]);
        assert!(parse_accounts(&Value::Null).is_empty());
    }
}
