// ============================================================================
// FAUCET VIEW - faucet.html
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use crate::dom::{on_click, require_button, get_element_by_id, set_button_disabled};
use crate::services::provider::InjectedProvider;
use crate::state::{PageState, SessionContext};
use crate::viewmodels::faucet_viewmodel::{mint, mint_success_message, MintStatus};
use crate::views::layout::set_button_loading;
use crate::views::modal::{show_error, show_modal, ModalKind};

const MINT_BUTTON: &str = "mintBtn";

pub fn render_network_mismatch() {
    set_button_disabled(MINT_BUTTON, true);
}

fn render_status(status: &MintStatus) {
    if let Some(el) = get_element_by_id("faucet-status") {
        el.set_text_content(Some(status.text()));
        el.set_class_name(&format!("faucet-status {}", status.css_class()));
    }
}

pub fn run_faucet_page(ctx: Rc<SessionContext<InjectedProvider>>, state: PageState) -> Result<(), JsValue> {
    let button = require_button(MINT_BUTTON)?;
    let handler_button = button.clone();

    on_click(&button, move |_| {
        let button = handler_button.clone();
        let ctx = ctx.clone();
        if button.disabled() {
            return;
        }
        set_button_loading(&button, true, "Minting...");

        spawn_local(async move {
            match mint(&ctx, |status| render_status(&status)).await {
                Ok(_) => show_modal("Success!", &mint_success_message(), ModalKind::Success),
                Err(err) => show_error(&err),
            }
            set_button_loading(&button, false, "Mint 10,000 CLK");
        });
    })?;

    // El faucet no tiene lecturas iniciales
    state.mark_loaded();
    Ok(())
}
