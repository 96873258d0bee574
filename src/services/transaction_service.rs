// ============================================================================
// TRANSACTION SERVICE - Envío y espera de recibo
// ============================================================================
// submit -> pending -> confirmado | revertido. Se consulta el recibo cada
// `poll_interval_ms` hasta que exista; no hay timeout.
// ============================================================================

use serde_json::{json, Value};
use crate::errors::{DappError, DappResult};
use crate::models::receipt::TransactionReceipt;
use crate::services::contracts::TransactionRequest;
use crate::services::provider::Eip1193;

/// Fase visible de una transacción en curso
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStage {
    /// Esperando la firma en el wallet
    AwaitingSignature,
    /// Enviada, esperando el recibo
    Pending,
}

pub struct TransactionService<'a, P> {
    provider: &'a P,
    poll_interval_ms: u32,
}

impl<'a, P: Eip1193> TransactionService<'a, P> {
    pub fn new(provider: &'a P, poll_interval_ms: u32) -> Self {
        Self { provider, poll_interval_ms }
    }

    /// `eth_sendTransaction`; devuelve el hash
    pub async fn send(&self, tx: &TransactionRequest) -> DappResult<String> {
        log::info!("📤 [TX] Enviando {} a {}", tx.label, tx.to);

        let value = self
            .provider
            .request("eth_sendTransaction", json!([tx.to_json()]))
            .await
            .map_err(|e| {
                log::warn!("🚫 [TX] {} rechazada: {}", tx.label, e);
                DappError::rejected(e)
            })?;

        match value {
            Value::String(hash) => {
                log::info!("⏳ [TX] {} pendiente: {}", tx.label, hash);
                Ok(hash)
            }
            other => Err(DappError::TransactionRejected {
                reason: Some(format!("unexpected transaction hash {}", other)),
            }),
        }
    }

    /// Consulta el recibo hasta que la transacción se mine
    pub async fn wait_for_receipt(&self, tx_hash: &str) -> DappResult<TransactionReceipt> {
        loop {
            let value = self
                .provider
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await
                .map_err(|e| unconfirmed(tx_hash, e))?;

            if !value.is_null() {
                return serde_json::from_value::<TransactionReceipt>(value).map_err(|e| unconfirmed(tx_hash, e));
            }

            self.provider.sleep(self.poll_interval_ms).await;
        }
    }

    /// Envía y espera confirmación; un recibo con status != 1 es `TransactionReverted`
    pub async fn execute(&self, tx: &TransactionRequest) -> DappResult<TransactionReceipt> {
        self.execute_with(tx, |_| {}).await
    }

    /// Igual que `execute`, notificando cada cambio de fase
    pub async fn execute_with<F: Fn(TxStage)>(
        &self,
        tx: &TransactionRequest,
        on_stage: F,
    ) -> DappResult<TransactionReceipt> {
        on_stage(TxStage::AwaitingSignature);
        let hash = self.send(tx).await?;
        on_stage(TxStage::Pending);
        let receipt = self.wait_for_receipt(&hash).await?;

        if !receipt.is_success() {
            log::error!("❌ [TX] {} revertida en bloque {:?}", tx.label, receipt.block_number);
            return Err(DappError::TransactionReverted { tx_hash: receipt.transaction_hash });
        }

        log::info!("✅ [TX] {} confirmada: {}", tx.label, receipt.transaction_hash);
        Ok(receipt)
    }
}

fn unconfirmed(tx_hash: &str, err: impl std::fmt::Display) -> DappError {
    log::error!("❌ [TX] Recibo de {} ilegible: {}", tx_hash, err);
    DappError::ConfirmationFailed { tx_hash: tx_hash.to_string(), reason: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use crate::errors::{ProviderError, CODE_USER_REJECTED};
    use crate::testing::{MockProvider, USER};

    fn mint_tx() -> TransactionRequest {
        TransactionRequest {
            from: USER,
            to: Address::repeat_byte(0x22),
            data: vec![0x6a, 0x62, 0x78, 0x4f],
            label: "mint",
        }
    }

    fn receipt_json(status: &str) -> Value {
        json!({ "transactionHash": "0xfeed", "status": status, "blockNumber": "0x10" })
    }

    #[tokio::test(flavor = "current_thread")]
    async fn polls_until_receipt_appears() {
        let provider = MockProvider::new();
        provider.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        provider
            .respond("eth_getTransactionReceipt", Ok(Value::Null))
            .respond("eth_getTransactionReceipt", Ok(Value::Null))
            .respond("eth_getTransactionReceipt", Ok(receipt_json("0x1")));

        let service = TransactionService::new(&provider, 1000);
        let receipt = service.execute(&mint_tx()).await.unwrap();

        assert_eq!(receipt.transaction_hash, "0xfeed");
        assert_eq!(provider.count("eth_getTransactionReceipt"), 3);
        assert_eq!(provider.sleeps(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn status_zero_is_reverted() {
        let provider = MockProvider::new();
        provider.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        provider.respond("eth_getTransactionReceipt", Ok(receipt_json("0x0")));

        let service = TransactionService::new(&provider, 1000);
        let err = service.execute(&mint_tx()).await.unwrap_err();
        assert_eq!(err, DappError::TransactionReverted { tx_hash: "0xfeed".into() });
        assert_eq!(err.user_message(), "Transaction failed on the blockchain.");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejection_never_polls() {
        let provider = MockProvider::new();
        provider.respond(
            "eth_sendTransaction",
            Err(ProviderError::new(CODE_USER_REJECTED, "User denied transaction signature.")),
        );

        let service = TransactionService::new(&provider, 1000);
        let err = service.execute(&mint_tx()).await.unwrap_err();

        assert_eq!(err.user_message(), "User denied transaction signature.");
        assert_eq!(provider.count("eth_getTransactionReceipt"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn receipt_error_is_a_failed_transaction() {
        let provider = MockProvider::new();
        provider.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        provider.respond(
            "eth_getTransactionReceipt",
            Err(ProviderError::new(-32603, "header not found")),
        );

        let service = TransactionService::new(&provider, 1000);
        let err = service.execute(&mint_tx()).await.unwrap_err();

        assert!(matches!(err, DappError::ConfirmationFailed { ref tx_hash, .. } if tx_hash == "0xfeed"));
        assert_eq!(err.modal_title(), "Transaction Failed");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn malformed_receipt_is_a_failed_transaction() {
        let provider = MockProvider::new();
        provider.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        provider.respond("eth_getTransactionReceipt", Ok(json!("not-a-receipt")));

        let service = TransactionService::new(&provider, 1000);
        let err = service.execute(&mint_tx()).await.unwrap_err();

        assert_eq!(err.modal_title(), "Transaction Failed");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn stages_are_reported_in_order() {
        let provider = MockProvider::new();
        provider.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        provider.respond("eth_getTransactionReceipt", Ok(receipt_json("0x1")));
        let stages = std::cell::RefCell::new(Vec::new());

        let service = TransactionService::new(&provider, 1000);
        service.execute_with(&mint_tx(), |s| stages.borrow_mut().push(s)).await.unwrap();

        assert_eq!(stages.into_inner(), vec![TxStage::AwaitingSignature, TxStage::Pending]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn send_passes_request_as_single_param() {
        let provider = MockProvider::new();
        provider.respond("eth_sendTransaction", Ok(json!("0xfeed")));

        let service = TransactionService::new(&provider, 1000);
        service.send(&mint_tx()).await.unwrap();

        let (_, params) = provider.calls().remove(0);
        assert_eq!(params[0]["data"], "0x6a62784f");
        assert_eq!(params[0]["from"], USER.to_string());
    }
}
