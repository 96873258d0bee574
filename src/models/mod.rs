pub mod session;
pub mod network;
pub mod staking;
pub mod receipt;
pub mod contracts_config;

pub use session::WalletSession;
pub use network::NetworkDescriptor;
pub use staking::{StakePosition, StakeStatus, StakingPool};
pub use receipt::TransactionReceipt;
pub use contracts_config::ContractsConfig;
