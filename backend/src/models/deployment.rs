use alloy::{
    primitives::{Address, B256, Bytes, U256, keccak256},
    sol_types::SolValue,
};
use serde::Serialize;
use std::fmt;

use crate::constants::*;

/// Pool the launched token is paired into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub paired_token: Address,
    pub fee: u32,
    pub tick: i32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            paired_token: WETH_ADDRESS,
            fee: DEFAULT_POOL_FEE,
            tick: DEFAULT_POOL_TICK,
        }
    }
}

/// Everything the factory needs to launch one token. Built once per cast event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentParameters {
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
    pub deployer: Address,
    pub fid: u64,
    pub image: String,
    pub cast_hash: String,
    pub pool: PoolConfig,
}

impl DeploymentParameters {
    /// ABI encoded token constructor arguments.
    pub fn constructor_args(&self) -> Vec<u8> {
        (
            self.name.clone(),
            self.symbol.clone(),
            self.total_supply,
            self.deployer,
            U256::from(self.fid),
            self.image.clone(),
            self.cast_hash.clone(),
        )
            .abi_encode_params()
    }

    /// Creation bytecode followed by the constructor arguments.
    pub fn init_code(&self, creation_code: &[u8]) -> Bytes {
        let mut init_code = creation_code.to_vec();
        init_code.extend_from_slice(&self.constructor_args());
        init_code.into()
    }

    pub fn init_code_hash(&self, creation_code: &[u8]) -> B256 {
        keccak256(self.init_code(creation_code))
    }
}

/// Default token supply in base units (100 billion tokens, 18 decimals).
pub fn default_total_supply() -> U256 {
    U256::from(TOKEN_SUPPLY_WHOLE) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

/// On-chain campaign settings passed to the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignDefinition {
    pub max_claims: U256,
    pub amount_per_claim: U256,
    pub max_sponsored_claims: U256,
}

impl Default for CampaignDefinition {
    fn default() -> Self {
        let unit = U256::from(10u64).pow(U256::from(TOKEN_DECIMALS));
        Self {
            max_claims: U256::from(CAMPAIGN_MAX_CLAIMS),
            amount_per_claim: U256::from(CAMPAIGN_AMOUNT_PER_CLAIM_WHOLE) * unit,
            max_sponsored_claims: U256::from(CAMPAIGN_MAX_SPONSORED_CLAIMS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignKind {
    Yap,
    Follow,
}

impl fmt::Display for CampaignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignKind::Yap => write!(f, "yap"),
            CampaignKind::Follow => write!(f, "follow"),
        }
    }
}

/// A campaign created by the deployment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CampaignRecord {
    pub kind: CampaignKind,
    pub id: U256,
}

/// Values decoded from a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentOutcome {
    pub token_address: Address,
    pub position_id: String,
    pub yap_campaign: CampaignRecord,
    pub follow_campaign: CampaignRecord,
    pub transaction_hash: B256,
}
