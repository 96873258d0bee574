// ============================================================================
// BOOTSTRAP STATE - Máquina de estados de cada carga de página
// ============================================================================
// Unauthenticated -> NetworkMismatch | Bound -> DataLoaded
//                 \-> Failed(reason)
// NetworkMismatch y Failed son terminales para la carga actual; salir de
// ellos exige un reload completo.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::errors::DappError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapState {
    Unauthenticated,
    /// Wallet en otra red; sin lecturas ni controles de escritura
    NetworkMismatch { actual: String },
    /// Sesión restaurada, red verificada, contratos ligados
    Bound,
    DataLoaded,
    Failed(DappError),
}

impl BootstrapState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "Unauthenticated",
            Self::NetworkMismatch { .. } => "NetworkMismatch",
            Self::Bound => "Bound",
            Self::DataLoaded => "DataLoaded",
            Self::Failed(_) => "Failed",
        }
    }

    /// Lecturas de cadena permitidas
    pub fn allows_reads(&self) -> bool {
        matches!(self, Self::Bound | Self::DataLoaded)
    }

    /// Botones de transacción habilitables
    pub fn allows_mutations(&self) -> bool {
        matches!(self, Self::Bound | Self::DataLoaded)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NetworkMismatch { .. } | Self::Failed(_))
    }

    pub fn can_transition_to(&self, next: &BootstrapState) -> bool {
        use BootstrapState::*;
        match (self, next) {
            (Unauthenticated, NetworkMismatch { .. }) | (Unauthenticated, Bound) => true,
            (Bound, DataLoaded) => true,
            // Una lectura fallida tras DataLoaded sigue siendo terminal para la página
            (Unauthenticated, Failed(_)) | (Bound, Failed(_)) | (DataLoaded, Failed(_)) => true,
            _ => false,
        }
    }
}

/// Estado compartido de la página (bootstrap + política de modal de datos)
#[derive(Clone)]
pub struct PageState {
    pub bootstrap: Rc<RefCell<BootstrapState>>,
    pub data_error_reported: Rc<RefCell<bool>>,
    /// Secciones de datos aún en vuelo en esta carga
    pub pending_sections: Rc<RefCell<u32>>,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            bootstrap: Rc::new(RefCell::new(BootstrapState::Unauthenticated)),
            data_error_reported: Rc::new(RefCell::new(false)),
            pending_sections: Rc::new(RefCell::new(0)),
        }
    }

    pub fn get(&self) -> BootstrapState {
        self.bootstrap.borrow().clone()
    }

    /// Aplica la transición si es válida; devuelve false (y no cambia nada) si no
    pub fn advance(&self, next: BootstrapState) -> bool {
        let current = self.get();
        if !current.can_transition_to(&next) {
            log::warn!("⚠️ [BOOT] Transición ignorada: {} -> {}", current.label(), next.label());
            return false;
        }
        log::info!("🔁 [BOOT] {} -> {}", current.label(), next.label());
        *self.bootstrap.borrow_mut() = next;
        true
    }

    /// `true` solo para el primer fallo de lectura de la página (un único modal)
    pub fn report_data_error(&self, err: &DappError) -> bool {
        let mut reported = self.data_error_reported.borrow_mut();
        if *reported {
            log::warn!("⚠️ [DATA] Fallo adicional (sin modal): {}", err);
            return false;
        }
        *reported = true;
        log::error!("❌ [DATA] {}", err);
        true
    }

    /// Fallo de una sección de datos: el primero pasa la página a Failed y pide modal
    pub fn section_failed(&self, err: &DappError) -> bool {
        let first = self.report_data_error(err);
        if first {
            self.advance(BootstrapState::Failed(err.clone()));
        }
        first
    }

    /// Arranca una carga de `count` secciones independientes
    pub fn expect_sections(&self, count: u32) {
        *self.pending_sections.borrow_mut() = count;
    }

    /// Una sección terminó bien; la última pasa la página a DataLoaded
    pub fn section_done(&self) {
        let remaining = {
            let mut pending = self.pending_sections.borrow_mut();
            *pending = pending.saturating_sub(1);
            *pending
        };
        if remaining == 0 {
            self.mark_loaded();
        }
    }

    /// Todas las secciones cargadas sin error
    pub fn mark_loaded(&self) {
        if !*self.data_error_reported.borrow() && self.get() != BootstrapState::DataLoaded {
            self.advance(BootstrapState::DataLoaded);
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_never_leads_to_bound() {
        let mismatch = BootstrapState::NetworkMismatch { actual: "0x1".into() };
        assert!(!mismatch.can_transition_to(&BootstrapState::Bound));
        assert!(!mismatch.allows_reads());
        assert!(!mismatch.allows_mutations());
    }

    #[test]
    fn happy_path_transitions() {
        let state = PageState::new();
        assert!(state.advance(BootstrapState::Bound));
        assert!(state.advance(BootstrapState::DataLoaded));
        assert_eq!(state.get(), BootstrapState::DataLoaded);
    }

    #[test]
    fn invalid_transition_is_ignored() {
        let state = PageState::new();
        assert!(!state.advance(BootstrapState::DataLoaded));
        assert_eq!(state.get(), BootstrapState::Unauthenticated);
    }

    #[test]
    fn first_failed_section_fails_the_page() {
        let state = PageState::new();
        state.advance(BootstrapState::Bound);
        let err = DappError::ChainReadFailed("getStakes(address)".into());

        assert!(state.section_failed(&err));
        assert!(!state.section_failed(&err));
        state.mark_loaded();
        assert_eq!(state.get(), BootstrapState::Failed(err));
    }

    #[test]
    fn page_is_loaded_only_after_every_section() {
        let state = PageState::new();
        state.advance(BootstrapState::Bound);
        state.expect_sections(2);

        state.section_done();
        assert_eq!(state.get(), BootstrapState::Bound);

        state.section_done();
        assert_eq!(state.get(), BootstrapState::DataLoaded);
    }

    #[test]
    fn late_section_failure_never_passes_through_loaded() {
        let state = PageState::new();
        state.advance(BootstrapState::Bound);
        state.expect_sections(2);

        state.section_done();
        let err = DappError::ChainReadFailed("getStakes(address)".into());
        assert!(state.section_failed(&err));
        state.section_done();

        assert_eq!(state.get(), BootstrapState::Failed(err));
    }

    #[test]
    fn only_first_data_error_raises_modal() {
        let state = PageState::new();
        let err = DappError::ChainReadFailed("totalStaked()".into());
        assert!(state.report_data_error(&err));
        assert!(!state.report_data_error(&err));
    }
}
