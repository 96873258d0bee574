// ============================================================================
// MODAL VIEW - Modal bloqueante compartido por todas las páginas
// ============================================================================
// #modalOverlay > #modalHeader(#modalTitle) + #modalMessage + #modalCloseBtn
// ============================================================================

use wasm_bindgen::prelude::*;
use crate::dom::{event_target_element, get_element_by_id, on_click_id, on_event, set_text_by_id};
use crate::errors::DappError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Error,
    Success,
    Info,
}

impl ModalKind {
    pub fn header_class(&self) -> &'static str {
        match self {
            Self::Error => "modal-header modal-header--error",
            Self::Success => "modal-header modal-header--success",
            Self::Info => "modal-header modal-header--info",
        }
    }
}

pub fn show_modal(title: &str, message: &str, kind: ModalKind) {
    set_text_by_id("modalTitle", title);
    set_text_by_id("modalMessage", message);
    if let Some(header) = get_element_by_id("modalHeader") {
        header.set_class_name(kind.header_class());
    }
    match get_element_by_id("modalOverlay") {
        Some(overlay) => {
            if let Err(e) = overlay.class_list().add_1("show") {
                log::error!("❌ [MODAL] No se pudo mostrar el modal: {:?}", e);
            }
        }
        None => log::error!("❌ [MODAL] #modalOverlay no existe: {} - {}", title, message),
    }
}

pub fn show_error(err: &DappError) {
    log::error!("❌ [MODAL] {}", err);
    show_modal(err.modal_title(), &err.user_message(), ModalKind::Error);
}

pub fn show_success(message: &str) {
    show_modal("Success", message, ModalKind::Success);
}

pub fn hide_modal() {
    if let Some(overlay) = get_element_by_id("modalOverlay") {
        let _ = overlay.class_list().remove_1("show");
    }
}

/// Cierre con el botón o con click fuera del contenido
pub fn wire_modal() -> Result<(), JsValue> {
    on_click_id("modalCloseBtn", |_| hide_modal())?;
    if let Some(overlay) = get_element_by_id("modalOverlay") {
        on_event(&overlay, "click", |event| {
            let on_overlay = event_target_element(&event)
                .map(|el| el.id() == "modalOverlay")
                .unwrap_or(false);
            if on_overlay {
                hide_modal();
            }
        })?;
    }
    Ok(())
}
