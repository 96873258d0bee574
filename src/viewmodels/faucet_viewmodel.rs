// ============================================================================
// FAUCET VIEWMODEL - Mint de CLK de prueba
// ============================================================================

use crate::errors::DappResult;
use crate::models::receipt::TransactionReceipt;
use crate::services::provider::Eip1193;
use crate::services::transaction_service::TxStage;
use crate::state::SessionContext;
use crate::utils::constants::FAUCET_AMOUNT_LABEL;

/// Línea de estado bajo el botón de mint
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MintStatus {
    Info(String),
    Success(String),
    Error(String),
}

impl MintStatus {
    pub fn from_stage(stage: TxStage) -> Self {
        match stage {
            TxStage::AwaitingSignature => {
                Self::Info("Preparing transaction... Please confirm in your wallet.".to_string())
            }
            TxStage::Pending => Self::Info("Transaction submitted, waiting for confirmation...".to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Info(t) | Self::Success(t) | Self::Error(t) => t,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Info(_) => "status-info",
            Self::Success(_) => "status-success",
            Self::Error(_) => "status-error",
        }
    }
}

pub fn mint_success_message() -> String {
    format!("{} have been successfully minted to your wallet.", FAUCET_AMOUNT_LABEL)
}

/// `mint(address)` para la dirección de la sesión
pub async fn mint<P, F>(ctx: &SessionContext<P>, on_status: F) -> DappResult<TransactionReceipt>
where
    P: Eip1193,
    F: Fn(MintStatus),
{
    log::info!("🚰 [FAUCET] Mint para {}", ctx.short_address());
    let tx = ctx.token.mint(ctx.signer);
    let result = ctx
        .transactions()
        .execute_with(&tx, |stage| on_status(MintStatus::from_stage(stage)))
        .await;

    match &result {
        Ok(_) => on_status(MintStatus::Success("Minting successful! Check your wallet balance.".to_string())),
        Err(err) => on_status(MintStatus::Error(format!("Error: {}", err.user_message()))),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use alloy_sol_types::SolCall;
    use serde_json::json;
    use crate::config::AppConfig;
    use crate::errors::DappError;
    use crate::services::contracts::IChronoLock;
    use crate::testing::{session_context, MockProvider};

    #[tokio::test(flavor = "current_thread")]
    async fn mint_targets_the_session_address() {
        let provider = Rc::new(MockProvider::on_bsc());
        provider.respond("eth_sendTransaction", Ok(json!("0xabc")));
        provider.respond(
            "eth_getTransactionReceipt",
            Ok(json!({ "transactionHash": "0xabc", "status": "0x1" })),
        );
        let ctx = session_context(provider.clone(), AppConfig::default());
        let statuses = RefCell::new(Vec::new());

        mint(&ctx, |s| statuses.borrow_mut().push(s)).await.unwrap();

        let (_, params) = provider
            .calls()
            .into_iter()
            .find(|(m, _)| m == "eth_sendTransaction")
            .unwrap();
        let expected = IChronoLock::mintCall { to: ctx.signer }.abi_encode();
        assert_eq!(params[0]["data"], alloy_primitives::hex::encode_prefixed(expected));
        assert_eq!(params[0]["to"], ctx.token.address().to_string());

        let statuses = statuses.into_inner();
        assert_eq!(statuses.len(), 3);
        assert!(matches!(statuses[2], MintStatus::Success(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn reverted_mint_reports_error_status() {
        let provider = Rc::new(MockProvider::on_bsc());
        provider.respond("eth_sendTransaction", Ok(json!("0xabc")));
        provider.respond(
            "eth_getTransactionReceipt",
            Ok(json!({ "transactionHash": "0xabc", "status": "0x0" })),
        );
        let ctx = session_context(provider, AppConfig::default());
        let last = RefCell::new(None);

        let err = mint(&ctx, |s| *last.borrow_mut() = Some(s)).await.unwrap_err();

        assert!(matches!(err, DappError::TransactionReverted { .. }));
        assert_eq!(
            last.into_inner(),
            Some(MintStatus::Error("Error: Transaction failed on the blockchain.".into()))
        );
    }

    #[test]
    fn success_message_names_the_amount() {
        assert_eq!(mint_success_message(), "10,000 CLK have been successfully minted to your wallet.");
    }
}
