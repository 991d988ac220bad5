use alloy::primitives::B256;
use tracing::{debug, error};

use crate::{chain::ChainClient, constants::SEED_BLOCK_DEPTH, error::DeployError};

/// Hash of the block just below the chain head, used as the salt search seed.
///
/// The search must never start from an undefined seed, so a missing block is an error.
pub async fn fetch_seed<C: ChainClient>(chain: &C) -> Result<B256, DeployError> {
    let head = chain.latest_block_number().await?;
    let number = head.saturating_sub(SEED_BLOCK_DEPTH);

    match chain.block_hash(number).await? {
        Some(hash) => {
            debug!("Seeding salt search from block {} ({})", number, hash);
            Ok(hash)
        }
        None => {
            error!("Block {} has no hash available, cannot seed salt search", number);
            Err(DeployError::SeedUnavailable)
        }
    }
}
