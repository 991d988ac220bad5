pub mod deployment;
pub mod webhook;

pub use deployment::{
    CampaignDefinition, CampaignKind, CampaignRecord, DeploymentOutcome, DeploymentParameters, PoolConfig,
};
pub use webhook::{CastAuthor, CastEvent, CastWebhook};
