// ============================================================================
// PROVIDER - Acceso al wallet inyectado (EIP-1193, `window.ethereum`)
// ============================================================================
// Toda interacción con wallet/cadena pasa por `request({ method, params })`.
// El resto de servicios son genéricos sobre `Eip1193` para poder probarlos
// sin navegador.
// ============================================================================

use js_sys::{Function, Object, Promise, Reflect, JSON};
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use crate::errors::ProviderError;

/// Capacidad mínima que necesitamos del wallet
#[allow(async_fn_in_trait)]
pub trait Eip1193 {
    /// `provider.request({ method, params })`
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Pausa entre consultas de recibo
    async fn sleep(&self, ms: u32);
}

/// Provider inyectado por la extensión del wallet
#[derive(Clone, Debug)]
pub struct InjectedProvider {
    ethereum: JsValue,
}

impl InjectedProvider {
    /// Detecta `window.ethereum` con un `request` invocable.
    /// Se comprueba una sola vez en el bootstrap; `None` => WalletMissing.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        let request = Reflect::get(&ethereum, &JsValue::from_str("request")).ok()?;
        if !request.is_function() {
            log::warn!("⚠️ [WALLET] window.ethereum existe pero no expone request()");
            return None;
        }
        Some(Self { ethereum })
    }

    /// Registra un handler en `provider.on(event, handler)`.
    /// Solo se llama una vez por carga de página, el closure vive hasta el reload.
    pub fn on<F>(&self, event: &str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(JsValue) + 'static,
    {
        let on = Reflect::get(&self.ethereum, &JsValue::from_str("on"))?;
        let on: Function = on
            .dyn_into()
            .map_err(|_| JsValue::from_str("provider.on is not a function"))?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
        on.call2(&self.ethereum, &JsValue::from_str(event), closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

impl Eip1193 for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let args = Object::new();
        let params_js = JSON::parse(&params.to_string())
            .map_err(|_| ProviderError::new(-32602, format!("invalid params for {}", method)))?;
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(js_to_provider_error)?;
        Reflect::set(&args, &JsValue::from_str("params"), &params_js)
            .map_err(js_to_provider_error)?;

        let request: Function = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(js_to_provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::new(-32601, "provider.request is not a function"))?;

        let promise: Promise = request
            .call1(&self.ethereum, &args)
            .map_err(js_to_provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::new(-32603, "provider.request did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(js_to_provider_error)?;
        js_to_json(&result)
    }

    async fn sleep(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

impl<T: Eip1193 + ?Sized> Eip1193 for &T {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params).await
    }

    async fn sleep(&self, ms: u32) {
        (**self).sleep(ms).await
    }
}

fn js_to_json(value: &JsValue) -> Result<Value, ProviderError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text: String = JSON::stringify(value)
        .map_err(js_to_provider_error)?
        .into();
    serde_json::from_str(&text)
        .map_err(|e| ProviderError::new(-32700, format!("unparseable provider response: {}", e)))
}

/// Convierte el error rechazado por la promesa (`{ code, message, data }`)
fn js_to_provider_error(err: JsValue) -> ProviderError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64)
        .unwrap_or(-32603);

    // Los reverts traen el motivo en data.message
    let data_message = Reflect::get(&err, &JsValue::from_str("data"))
        .ok()
        .filter(|d| d.is_object())
        .and_then(|d| Reflect::get(&d, &JsValue::from_str("message")).ok())
        .and_then(|m| m.as_string());

    let message = data_message
        .or_else(|| {
            Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .or_else(|| err.as_string())
        .unwrap_or_default();

    ProviderError::new(code, message)
}
