pub mod bootstrap_viewmodel;
pub mod connect_viewmodel;
pub mod dashboard_viewmodel;
pub mod faucet_viewmodel;
pub mod staking_viewmodel;
pub mod countdown;

pub use bootstrap_viewmodel::{
    disconnect, handle_accounts_changed, handle_chain_changed, BootstrapOutcome, Bootstrapper,
};
pub use connect_viewmodel::ConnectViewModel;
pub use dashboard_viewmodel::{load_dashboard, DashboardData};
pub use countdown::CountdownBoard;
