pub mod modal;
pub mod layout;
pub mod connect;
pub mod dashboard;
pub mod faucet;
pub mod staking;
