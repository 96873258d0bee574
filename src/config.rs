use serde::{Deserialize, Serialize};
use crate::models::network::{NativeCurrency, NetworkDescriptor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub network: NetworkDescriptor,
    pub chronolock_address: String,
    pub staking_address: String,
    /// URL del JSON con los ABIs (`chronoLockABI`, `stakingABI`)
    pub contracts_config_url: String,
    /// Intervalo entre consultas de `eth_getTransactionReceipt`
    pub receipt_poll_interval_ms: u32,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: NetworkDescriptor::bsc_mainnet(),
            chronolock_address: "0x2b1eb2Ca46eB3c792A409D7EEa47E6883b6B62Eb".to_string(),
            staking_address: "0x6285d79C5cE92fa06B24fBa5e7ee1da167Fe10e9".to_string(),
            contracts_config_url: "contracts.json".to_string(),
            receipt_poll_interval_ms: 1_000,
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "CHAIN_ID" => option_env!("CHAIN_ID"),
                "CHAIN_NAME" => option_env!("CHAIN_NAME"),
                "NATIVE_CURRENCY_NAME" => option_env!("NATIVE_CURRENCY_NAME"),
                "NATIVE_CURRENCY_SYMBOL" => option_env!("NATIVE_CURRENCY_SYMBOL"),
                "RPC_URL" => option_env!("RPC_URL"),
                "EXPLORER_URL" => option_env!("EXPLORER_URL"),
                "CHRONOLOCK_ADDRESS" => option_env!("CHRONOLOCK_ADDRESS"),
                "STAKING_ADDRESS" => option_env!("STAKING_ADDRESS"),
                "CONTRACTS_CONFIG_URL" => option_env!("CONTRACTS_CONFIG_URL"),
                "RECEIPT_POLL_INTERVAL_MS" => option_env!("RECEIPT_POLL_INTERVAL_MS"),
                "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Defaults sobrescritos por las claves que `var` conozca
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(var: F) -> Self {
        let defaults = Self::default();
        let default_net = defaults.network;

        Self {
            network: NetworkDescriptor {
                chain_id: var("CHAIN_ID").unwrap_or(default_net.chain_id),
                chain_name: var("CHAIN_NAME").unwrap_or(default_net.chain_name),
                native_currency: NativeCurrency {
                    name: var("NATIVE_CURRENCY_NAME").unwrap_or(default_net.native_currency.name),
                    symbol: var("NATIVE_CURRENCY_SYMBOL").unwrap_or(default_net.native_currency.symbol),
                    decimals: default_net.native_currency.decimals,
                },
                rpc_urls: var("RPC_URL").map(|url| vec![url]).unwrap_or(default_net.rpc_urls),
                block_explorer_urls: var("EXPLORER_URL")
                    .map(|url| vec![url])
                    .unwrap_or(default_net.block_explorer_urls),
            },
            chronolock_address: var("CHRONOLOCK_ADDRESS").unwrap_or(defaults.chronolock_address),
            staking_address: var("STAKING_ADDRESS").unwrap_or(defaults.staking_address),
            contracts_config_url: var("CONTRACTS_CONFIG_URL").unwrap_or(defaults.contracts_config_url),
            receipt_poll_interval_ms: var("RECEIPT_POLL_INTERVAL_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.receipt_poll_interval_ms),
            enable_logging: var("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    /// Nivel de log para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
