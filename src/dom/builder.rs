// ============================================================================
// ELEMENT BUILDER - Construcción de tarjetas (pools / posiciones)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, create_element, set_attribute, set_class_name, set_text_content};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Reemplaza todas las clases
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// Atributo booleano (`disabled`) solo si `on`
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            set_attribute(&self.element, name, "")?;
        }
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn children(self, children: Vec<Element>) -> Result<Self, JsValue> {
        for child in children {
            append_child(&self.element, &child)?;
        }
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// `<div class="info-group">` con etiqueta y valor
pub fn info_group(label: &str, value: &str, value_class: &str, value_id: Option<&str>) -> Result<Element, JsValue> {
    let class = if value_class.is_empty() {
        "info-value".to_string()
    } else {
        format!("info-value {}", value_class)
    };
    let mut value_el = ElementBuilder::new("span")?.class(&class).text(value);
    if let Some(id) = value_id {
        value_el = value_el.id(id)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("info-group")
        .child(ElementBuilder::new("span")?.class("info-label").text(label).build())?
        .child(value_el.build())?
        .build())
}
