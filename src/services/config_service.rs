use gloo_net::http::Request;
use crate::errors::{DappError, DappResult};
use crate::models::contracts_config::ContractsConfig;

/// Origen de `contracts.json`
#[allow(async_fn_in_trait)]
pub trait ConfigSource {
    async fn load(&self) -> DappResult<ContractsConfig>;
}

/// Carga los ABIs por HTTP (estático junto a las páginas)
#[derive(Clone)]
pub struct HttpConfigSource {
    url: String,
}

impl HttpConfigSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ConfigSource for HttpConfigSource {
    async fn load(&self) -> DappResult<ContractsConfig> {
        log::info!("📋 [CONFIG] Cargando {}...", self.url);

        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| DappError::ConfigLoadFailed(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(DappError::ConfigLoadFailed(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        let config = response
            .json::<ContractsConfig>()
            .await
            .map_err(|e| DappError::ConfigLoadFailed(format!("Parse error: {}", e)))?;

        log::info!(
            "✅ [CONFIG] ABIs cargados: {} entradas ChronoLock, {} entradas Staking",
            config.chronolock_abi.len(),
            config.staking_abi.len()
        );
        Ok(config)
    }
}
