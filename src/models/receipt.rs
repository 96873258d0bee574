use serde::Deserialize;

/// Recibo de `eth_getTransactionReceipt` (solo los campos que usamos)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    /// `0x1` éxito, `0x0` revert; ausente en recibos pre-Byzantium
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
}

impl TransactionReceipt {
    /// Solo `status == 1` cuenta como éxito; un status ausente no
    pub fn is_success(&self) -> bool {
        match self.status.as_deref() {
            Some(raw) => {
                let raw = raw.trim();
                let digits = raw.strip_prefix("0x").unwrap_or(raw);
                u64::from_str_radix(digits, 16).map(|s| s == 1).unwrap_or(false)
            }
            None => false,
        }
    }
}
