// ============================================================================
// EVENT HANDLING - Listeners sobre elementos de la página
// ============================================================================
// Cada página registra sus listeners una sola vez tras el bootstrap y la
// página completa se recarga ante cualquier cambio de wallet, así que
// `closure.forget()` no acumula listeners.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent};

pub fn on_event<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Click por id; si el elemento no existe en esta página no se registra nada
pub fn on_click_id<F>(id: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    match crate::dom::get_element_by_id(id) {
        Some(el) => on_click(&el, handler),
        None => Ok(()),
    }
}

pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    on_event(element, "input", handler)
}

/// Dispara `input` a mano (botón Max)
pub fn dispatch_input(element: &Element) -> Result<(), JsValue> {
    let event = Event::new("input")?;
    element.dispatch_event(&event).map(|_| ())
}

/// Elemento que originó el evento
pub fn event_target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}
