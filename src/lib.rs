// ============================================================================
// CHRONOLOCK DAPP - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: renderizan DOM y conectan eventos
// - ViewModels: lógica de cada página, testeable sin navegador
// - Services: wallet (EIP-1193), contratos, transacciones, sesión, config
// - State: máquina de arranque de la página con Rc<RefCell>
// - Models: tipos compartidos con la cadena y el JSON de contratos
// ============================================================================

mod config;
mod errors;
mod models;
mod services;
mod viewmodels;
mod state;
mod dom;
mod views;
mod utils;
mod app;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;
use crate::config::CONFIG;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // ENABLE_LOGGING=false baja a Warn, nunca silencia errores
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 ChronoLock dApp - Rust Puro + WASM ({})", CONFIG.network.chain_name);

    app::start()
}
