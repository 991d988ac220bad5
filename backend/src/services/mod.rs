pub mod card;
pub mod coinvise;
pub mod factory;
mod http;
pub mod launcher;
pub mod messages;
pub mod neynar;
pub mod orchestrator;
pub mod receipt;

pub use launcher::{LaunchReport, Launcher, deploy_with_retry};
pub use orchestrator::DeploymentOrchestrator;
pub use receipt::decode_deployment_receipt;
