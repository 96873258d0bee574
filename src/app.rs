// ============================================================================
// APP - Selección de página y arranque común
// ============================================================================
// Cada HTML carga el mismo bundle; `<body data-page="...">` (o el nombre del
// fichero en la URL) decide qué controlador se ejecuta.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use crate::config::CONFIG;
use crate::dom::{document, get_data, window};
use crate::services::config_service::HttpConfigSource;
use crate::services::provider::InjectedProvider;
use crate::services::session_service::SessionService;
use crate::state::{PageState, SessionContext};
use crate::utils::navigation::BROWSER;
use crate::utils::storage::LocalStore;
use crate::viewmodels::{handle_accounts_changed, handle_chain_changed, BootstrapOutcome, Bootstrapper};
use crate::views::{connect, dashboard, faucet, layout, modal, staking};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Connect,
    Dashboard,
    Faucet,
    Staking,
}

impl Page {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "connect" | "index" | "" => Some(Self::Connect),
            "dashboard" => Some(Self::Dashboard),
            "faucet" => Some(Self::Faucet),
            "staking" => Some(Self::Staking),
            _ => None,
        }
    }

    /// `/app/staking.html` -> Staking; `/` -> Connect
    pub fn from_path(path: &str) -> Option<Self> {
        let file = path.rsplit('/').next().unwrap_or("");
        let stem = file.strip_suffix(".html").unwrap_or(file);
        Self::from_name(stem)
    }

    pub fn detect() -> Option<Self> {
        let from_body = document()
            .and_then(|doc| doc.body())
            .and_then(|body| get_data(&body, "page"))
            .and_then(|name| Self::from_name(&name));
        if from_body.is_some() {
            return from_body;
        }
        let path = window()?.location().pathname().ok()?;
        Self::from_path(&path)
    }

    pub fn needs_session(&self) -> bool {
        !matches!(self, Self::Connect)
    }
}

pub fn start() -> Result<(), JsValue> {
    let Some(page) = Page::detect() else {
        log::warn!("⚠️ [APP] Página desconocida, nada que hacer");
        return Ok(());
    };
    log::info!("📄 [APP] Página: {:?}", page);

    if !page.needs_session() {
        return connect::run_connect_page();
    }

    modal::wire_modal()?;
    layout::wire_sidebar()?;
    layout::wire_disconnect()?;

    spawn_local(async move {
        if let Err(e) = run_session_page(page).await {
            log::error!("❌ [APP] {:?}", e);
        }
    });
    Ok(())
}

/// Cambios de cuenta o red con la página abierta: recarga completa (o desconexión)
fn wire_wallet_events(provider: &InjectedProvider) {
    let accounts = provider.on("accountsChanged", |value: JsValue| {
        let accounts: Vec<String> = js_sys::Array::from(&value)
            .iter()
            .filter_map(|a| a.as_string())
            .collect();
        log::info!("👛 [WALLET] accountsChanged ({} cuentas)", accounts.len());
        handle_accounts_changed(LocalStore, &BROWSER, &accounts);
    });
    let chain = provider.on("chainChanged", |_| {
        log::info!("🔗 [WALLET] chainChanged");
        handle_chain_changed(&BROWSER);
    });
    if let Err(e) = accounts.and(chain) {
        log::warn!("⚠️ [WALLET] No se pudieron registrar eventos del wallet: {:?}", e);
    }
}

async fn run_session_page(page: Page) -> Result<(), JsValue> {
    if let Some(session) = SessionService::new(LocalStore).load() {
        layout::render_user_address(&session.short_address());
    }

    let provider = InjectedProvider::detect();
    if let Some(p) = &provider {
        wire_wallet_events(p);
    }

    let state = PageState::new();
    let source = HttpConfigSource::new(CONFIG.contracts_config_url.clone());
    let bootstrapper = Bootstrapper::new(LocalStore, &BROWSER, &source, CONFIG.clone(), state.clone());

    match bootstrapper.run(provider).await {
        BootstrapOutcome::Redirected => Ok(()),
        BootstrapOutcome::NetworkMismatch(err) => {
            modal::show_error(&err);
            render_network_mismatch(page);
            Ok(())
        }
        BootstrapOutcome::Failed(err) => {
            modal::show_error(&err);
            Ok(())
        }
        BootstrapOutcome::Ready(ctx) => {
            // La cuenta activa puede diferir de la que se pintó al inicio
            layout::render_user_address(&ctx.short_address());
            run_page(page, ctx, state).await
        }
    }
}

fn render_network_mismatch(page: Page) {
    match page {
        Page::Dashboard => dashboard::render_network_mismatch(),
        Page::Faucet => faucet::render_network_mismatch(),
        Page::Staking => staking::render_network_mismatch(),
        Page::Connect => {}
    }
}

async fn run_page(page: Page, ctx: Rc<SessionContext<InjectedProvider>>, state: PageState) -> Result<(), JsValue> {
    match page {
        Page::Dashboard => {
            dashboard::run_dashboard_page(ctx, state).await;
            Ok(())
        }
        Page::Faucet => faucet::run_faucet_page(ctx, state),
        Page::Staking => staking::run_staking_page(ctx, state),
        Page::Connect => Ok(()),
    }
}
