// ============================================================================
// STATE MODULE - Estado por carga de página
// ============================================================================

pub mod bootstrap_state;
pub mod session_context;

pub use bootstrap_state::*;
pub use session_context::*;
