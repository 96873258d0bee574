// ============================================================================
// LAYOUT VIEW - Header, sidebar, desconexión y botones con spinner
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::HtmlButtonElement;
use crate::dom::{get_data, get_element_by_id, on_click_id, set_text_by_id, toggle_class};
use crate::utils::navigation::BROWSER;
use crate::utils::storage::LocalStore;
use crate::viewmodels::disconnect;

pub fn render_user_address(short_address: &str) {
    set_text_by_id("userAddress", short_address);
}

fn toggle_sidebar() {
    for id in ["sidebar", "sidebarOverlay"] {
        if let Some(el) = get_element_by_id(id) {
            let _ = toggle_class(&el, "open");
        }
    }
}

pub fn wire_sidebar() -> Result<(), JsValue> {
    for id in ["sidebarToggleBtn", "sidebarCloseBtn", "sidebarOverlay"] {
        on_click_id(id, |_| toggle_sidebar())?;
    }
    Ok(())
}

/// Ambos botones de desconexión (header y sidebar)
pub fn wire_disconnect() -> Result<(), JsValue> {
    for id in ["disconnectBtn", "disconnectBtnSidebar"] {
        on_click_id(id, |_| disconnect(LocalStore, &BROWSER))?;
    }
    Ok(())
}

/// Botón en estado de carga: deshabilitado + spinner + texto de carga.
/// Al terminar se restaura `data-original-text`.
pub fn set_button_loading(button: &HtmlButtonElement, loading: bool, loading_text: &str) {
    button.set_disabled(loading);
    if loading {
        button.set_inner_html(&format!(
            "<span class=\"spinner-border spinner-border-sm\" role=\"status\" aria-hidden=\"true\"></span> {}",
            loading_text
        ));
    } else {
        let original = get_data(button, "originalText").unwrap_or_else(|| loading_text.to_string());
        button.set_text_content(Some(&original));
    }
}

/// Mismo texto en varias celdas (p.ej. "Wrong Network" o "Error")
pub fn fill_cells(ids: &[&str], text: &str) {
    for id in ids {
        set_text_by_id(id, text);
    }
}
