pub mod chain;
pub mod constants;
pub mod create2;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{ChainError, DeployError, ReceiptDefect};
pub use services::{DeploymentOrchestrator, Launcher};
pub use utils::config::{ChainConfig, Config};

// Re-export common types
pub use alloy::primitives::{Address, B256, U256};
pub use anyhow::Result;
