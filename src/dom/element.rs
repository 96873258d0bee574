// ============================================================================
// ELEMENT HELPERS - Acceso al DOM de las páginas estáticas
// ============================================================================
// Las páginas HTML ya traen el layout; aquí solo se buscan elementos por id
// y se ajusta texto, clases y estado de controles.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

/// Elemento por id, `None` si la página no lo tiene
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Elemento obligatorio por id
pub fn require_element(id: &str) -> Result<Element, JsValue> {
    get_element_by_id(id).ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))
}

pub fn require_button(id: &str) -> Result<HtmlButtonElement, JsValue> {
    require_element(id)?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not a button", id)))
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

pub fn toggle_class(element: &Element, class: &str) -> Result<bool, JsValue> {
    element.class_list().toggle(class)
}

pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Texto en el elemento con ese id; si no existe, se ignora
pub fn set_text_by_id(id: &str, text: &str) {
    match get_element_by_id(id) {
        Some(el) => set_text_content(&el, text),
        None => log::warn!("⚠️ [DOM] #{} no existe, texto ignorado", id),
    }
}

pub fn clear_children(element: &Element) {
    element.set_inner_html("");
}

pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child.as_ref()).map(|_| ())
}

pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// `data-*` de un elemento HTML
pub fn get_data(element: &Element, key: &str) -> Option<String> {
    element.dyn_ref::<HtmlElement>()?.dataset().get(key)
}

pub fn set_button_disabled(id: &str, disabled: bool) {
    if let Some(button) = get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlButtonElement>().ok()) {
        button.set_disabled(disabled);
    }
}

pub fn input_value(id: &str) -> String {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn set_input_value(id: &str, value: &str) {
    if let Some(input) = get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
        input.set_value(value);
    }
}
