use serde::{Deserialize, Serialize};

/// Moneda nativa de la red (formato de `wallet_addEthereumChain`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Descriptor estático de la única red soportada.
///
/// Se serializa tal cual como parámetro de `wallet_addEthereumChain`,
/// por eso los campos van en camelCase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    /// Chain id en hexadecimal con prefijo `0x` (p.ej. `0x38`)
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl NetworkDescriptor {
    /// BNB Smart Chain mainnet (56)
    pub fn bsc_mainnet() -> Self {
        Self {
            chain_id: "0x38".to_string(),
            chain_name: "BNB Smart Chain".to_string(),
            native_currency: NativeCurrency {
                name: "BNB".to_string(),
                symbol: "BNB".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://bsc-dataseed.binance.org/".to_string()],
            block_explorer_urls: vec!["https://bscscan.com/".to_string()],
        }
    }

    /// Chain id numérico, `None` si el valor configurado no es hex válido
    pub fn chain_id_number(&self) -> Option<u64> {
        parse_chain_id(&self.chain_id)
    }

    /// Compara con el chain id que reporta el provider (hex o decimal)
    pub fn matches(&self, reported: &str) -> bool {
        match (self.chain_id_number(), parse_chain_id(reported)) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}

/// Acepta `0x38` y `56`; algunos wallets devuelven el id en decimal
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}
