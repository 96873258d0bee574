/// Navegación de página completa (redirect / reload)
pub trait Navigator {
    fn redirect(&self, url: &str);
    fn reload(&self);
}

/// `window.location`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, url: &str) {
        log::info!("↪️ [NAV] Redirigiendo a {}", url);
        if let Some(win) = web_sys::window() {
            if let Err(e) = win.location().set_href(url) {
                log::error!("❌ [NAV] Error redirigiendo a {}: {:?}", url, e);
            }
        }
    }

    fn reload(&self) {
        log::info!("🔄 [NAV] Recargando página");
        if let Some(win) = web_sys::window() {
            if let Err(e) = win.location().reload() {
                log::error!("❌ [NAV] Error recargando: {:?}", e);
            }
        }
    }
}

/// Navegador de la página actual, para closures `'static`
pub static BROWSER: BrowserNavigator = BrowserNavigator;
