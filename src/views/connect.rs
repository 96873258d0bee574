// ============================================================================
// CONNECT VIEW - index.html
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use crate::config::CONFIG;
use crate::dom::{on_click, require_button};
use crate::services::provider::InjectedProvider;
use crate::utils::navigation::BROWSER;
use crate::utils::storage::LocalStore;
use crate::viewmodels::ConnectViewModel;
use crate::views::modal::{show_error, wire_modal};

const CONNECT_LABEL: &str = "Connect Wallet";

pub fn run_connect_page() -> Result<(), JsValue> {
    wire_modal()?;

    let vm = ConnectViewModel::new(LocalStore, &BROWSER, CONFIG.network.clone());
    if vm.redirect_if_connected() {
        return Ok(());
    }

    let button = require_button("connectWalletBtn")?;
    let handler_button = button.clone();
    on_click(&button, move |_| {
        let button = handler_button.clone();
        if button.disabled() {
            return;
        }
        button.set_disabled(true);
        button.set_text_content(Some("Connecting..."));

        spawn_local(async move {
            let vm = ConnectViewModel::new(LocalStore, &BROWSER, CONFIG.network.clone());
            let provider = InjectedProvider::detect();
            if let Err(err) = vm.connect(provider.as_ref()).await {
                show_error(&err);
            }
            button.set_disabled(false);
            button.set_text_content(Some(CONNECT_LABEL));
        });
    })
}
