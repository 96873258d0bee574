pub mod provider;
pub mod contracts;
pub mod config_service;
pub mod session_service;
pub mod wallet_service;
pub mod transaction_service;

pub use provider::{Eip1193, InjectedProvider};
pub use contracts::{ChronoLockContract, ContractBinding, ContractHandle, StakingContract, TransactionRequest};
pub use config_service::{ConfigSource, HttpConfigSource};
pub use session_service::SessionService;
pub use wallet_service::{WalletChangeAction, WalletService};
pub use transaction_service::{TransactionService, TxStage};
