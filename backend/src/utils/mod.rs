pub mod artifact;
pub mod config;
pub mod logging;

pub use artifact::load_creation_code;
pub use config::{ChainConfig, Config};
pub use logging::init_logging;
