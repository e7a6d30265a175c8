//! CLI command implementations

pub mod add;
pub mod checkout;
pub mod commit;
pub mod config;
pub mod log;
