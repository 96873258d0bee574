// ============================================================================
// ERRORES - Taxonomía de fallos del dApp
// ============================================================================
// Todos los errores son terminales para la acción actual y se muestran en el
// modal bloqueante; ninguno se reintenta automáticamente.
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

/// Usuario rechazó la petición en el wallet (EIP-1193)
pub const CODE_USER_REJECTED: i64 = 4001;
/// La red pedida no está registrada en el wallet
pub const CODE_UNRECOGNIZED_CHAIN: i64 = 4902;

/// Error devuelto por `window.ethereum.request(...)`
#[derive(Error, Debug, Clone, PartialEq, Eq, Deserialize)]
#[error("provider error {code}: {message}")]
pub struct ProviderError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ProviderError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == CODE_USER_REJECTED
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == CODE_UNRECOGNIZED_CHAIN
    }

    /// Motivo legible si el provider lo dio, `None` si viene vacío
    pub fn reason(&self) -> Option<&str> {
        let msg = self.message.trim();
        (!msg.is_empty()).then_some(msg)
    }
}

/// Errores del dApp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DappError {
    /// No hay `window.ethereum` o no expone `request`
    #[error("wallet not detected")]
    WalletMissing,

    /// El usuario no autorizó ninguna cuenta
    #[error("wallet connection rejected: {0}")]
    ConnectionRejected(String),

    /// La red activa no es la configurada
    #[error("wrong network: expected {expected}, wallet is on {actual}")]
    WrongNetwork { expected: String, actual: String },

    /// El usuario rechazó (o el wallet no pudo) cambiar/añadir la red
    #[error("network switch rejected: {reason}")]
    NetworkSwitchRejected { reason: String },

    /// `contracts.json` ausente o malformado
    #[error("could not load configuration: {0}")]
    ConfigLoadFailed(String),

    /// Dirección o ABI inválidos al construir un binding
    #[error("could not bind contract {contract}: {reason}")]
    ContractBindFailed { contract: &'static str, reason: String },

    /// Fallo en una lectura (`eth_call`, `eth_chainId`, ...)
    #[error("chain read failed: {0}")]
    ChainReadFailed(String),

    /// El provider rechazó el envío de la transacción
    #[error("transaction rejected: {}", .reason.as_deref().unwrap_or("no reason"))]
    TransactionRejected { reason: Option<String> },

    /// Recibo con status distinto de éxito
    #[error("transaction {tx_hash} reverted")]
    TransactionReverted { tx_hash: String },

    /// Enviada, pero el recibo no se pudo obtener o leer
    #[error("transaction {tx_hash} unconfirmed: {reason}")]
    ConfirmationFailed { tx_hash: String, reason: String },

    /// Cantidad introducida por el usuario no válida
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Elemento del DOM ausente o fallo del host
    #[error("dom error: {0}")]
    Dom(String),
}

/// Resultado de operaciones del dApp
pub type DappResult<T> = Result<T, DappError>;

impl DappError {
    /// Título del modal
    pub fn modal_title(&self) -> &'static str {
        match self {
            Self::WalletMissing => "Wallet Error",
            Self::ConnectionRejected(_) => "Connection Failed",
            Self::WrongNetwork { .. } => "Wrong Network",
            Self::NetworkSwitchRejected { .. } => "Network Error",
            Self::ConfigLoadFailed(_) => "Configuration Error",
            Self::ContractBindFailed { .. } => "Contract Error",
            Self::ChainReadFailed(_) => "Data Error",
            Self::TransactionRejected { .. }
            | Self::TransactionReverted { .. }
            | Self::ConfirmationFailed { .. } => "Transaction Failed",
            Self::InvalidAmount(_) => "Invalid Amount",
            Self::Dom(_) => "Error",
        }
    }

    /// Mensaje del modal: motivo del provider si existe, genérico si no
    pub fn user_message(&self) -> String {
        match self {
            Self::WalletMissing => {
                "Wallet not detected. Please install a Web3 wallet like MetaMask.".to_string()
            }
            Self::ConnectionRejected(reason) => reason.clone(),
            Self::WrongNetwork { expected, .. } => {
                format!("Please switch your wallet to the {} to use this dApp.", expected)
            }
            Self::NetworkSwitchRejected { reason } => reason.clone(),
            Self::ConfigLoadFailed(_) => "Failed to load dApp configuration.".to_string(),
            Self::ContractBindFailed { .. } => "Could not connect to smart contracts.".to_string(),
            Self::ChainReadFailed(_) => {
                "Could not fetch data from the blockchain. Ensure you are on the correct network and refresh."
                    .to_string()
            }
            Self::TransactionRejected { reason } => reason
                .clone()
                .unwrap_or_else(|| "An unknown error occurred.".to_string()),
            Self::TransactionReverted { .. } => "Transaction failed on the blockchain.".to_string(),
            Self::ConfirmationFailed { tx_hash, .. } => format!(
                "Transaction {} was sent but its confirmation could not be read. Check it in your wallet.",
                tx_hash
            ),
            Self::InvalidAmount(_) => "Please enter a valid amount.".to_string(),
            Self::Dom(msg) => msg.clone(),
        }
    }

    /// Error de transacción a partir del fallo del provider
    pub fn rejected(err: ProviderError) -> Self {
        Self::TransactionRejected { reason: err.reason().map(str::to_string) }
    }

    pub fn read_failed(method: &str, err: impl std::fmt::Display) -> Self {
        Self::ChainReadFailed(format!("{}: {}", method, err))
    }
}

impl From<DappError> for wasm_bindgen::JsValue {
    fn from(err: DappError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_and_reverted_share_the_modal_title() {
        let rejected = DappError::rejected(ProviderError::new(CODE_USER_REJECTED, "User denied"));
        let reverted = DappError::TransactionReverted { tx_hash: "0xabc".into() };
        let unconfirmed = DappError::ConfirmationFailed { tx_hash: "0xabc".into(), reason: "timeout".into() };
        assert_eq!(rejected.modal_title(), reverted.modal_title());
        assert_eq!(unconfirmed.modal_title(), "Transaction Failed");
    }

    #[test]
    fn provider_reason_is_surfaced_verbatim() {
        let err = DappError::rejected(ProviderError::new(-32603, "execution reverted: pool closed"));
        assert_eq!(err.user_message(), "execution reverted: pool closed");
    }

    #[test]
    fn empty_provider_reason_falls_back_to_generic_text() {
        let err = DappError::rejected(ProviderError::new(-32603, "   "));
        assert_eq!(err.user_message(), "An unknown error occurred.");
    }

    #[test]
    fn provider_error_deserializes_from_js_shape() {
        let err: ProviderError =
            serde_json::from_str(r#"{"code":4902,"message":"Unrecognized chain"}"#).unwrap();
        assert!(err.is_unrecognized_chain());
        assert!(!err.is_user_rejection());
    }
}
