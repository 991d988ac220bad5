use alloy::{
    primitives::{
        B256, Bytes, U256,
        aliases::{I24, U24},
    },
    sol_types::SolCall,
};

use crate::{
    error::DeployError,
    models::{CampaignDefinition, DeploymentParameters, PoolConfig},
};

// Earnkit factory entry point used to launch tokens
pub mod abi {
    alloy::sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct PoolConfig {
            address pairedToken;
            uint24 devBuyFee;
            int24 tick;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct CampaignInfo {
            uint256 maxClaims;
            uint256 amountPerClaim;
            uint256 maxSponsoredClaims;
        }

        function deployTokenWithCampaigns(
            string name,
            string symbol,
            uint256 supply,
            uint24 fee,
            bytes32 salt,
            address deployer,
            uint256 fid,
            string image,
            string castHash,
            PoolConfig poolConfig,
            CampaignInfo[] campaigns,
            uint256 campaignLimit
        ) external payable;
    }
}

const UINT24_MAX: u32 = (1 << 24) - 1;

fn fee_tier(fee: u32) -> Result<U24, DeployError> {
    if fee > UINT24_MAX {
        return Err(DeployError::InvalidParameters(format!(
            "fee {} does not fit in uint24",
            fee
        )));
    }
    Ok(U24::from(fee))
}

/// Pool settings as the factory expects them.
pub fn pool_config(pool: &PoolConfig) -> Result<abi::PoolConfig, DeployError> {
    let tick = I24::try_from(pool.tick)
        .map_err(|e| DeployError::InvalidParameters(format!("tick {} does not fit in int24: {}", pool.tick, e)))?;

    Ok(abi::PoolConfig {
        pairedToken: pool.paired_token,
        devBuyFee: fee_tier(pool.fee)?,
        tick,
    })
}

/// Calldata for `deployTokenWithCampaigns`.
pub fn deploy_calldata(
    params: &DeploymentParameters,
    salt: B256,
    campaigns: &[CampaignDefinition; 2],
    campaign_limit: u64,
) -> Result<Bytes, DeployError> {
    let call = abi::deployTokenWithCampaignsCall {
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        supply: params.total_supply,
        fee: fee_tier(params.pool.fee)?,
        salt,
        deployer: params.deployer,
        fid: U256::from(params.fid),
        image: params.image.clone(),
        castHash: params.cast_hash.clone(),
        poolConfig: pool_config(&params.pool)?,
        campaigns: campaigns
            .iter()
            .map(|campaign| abi::CampaignInfo {
                maxClaims: campaign.max_claims,
                amountPerClaim: campaign.amount_per_claim,
                maxSponsoredClaims: campaign.max_sponsored_claims,
            })
            .collect(),
        campaignLimit: U256::from(campaign_limit),
    };

    let call_data = call.abi_encode();
    tracing::debug!("deployTokenWithCampaigns call data: 0x{}", hex::encode(&call_data));
    Ok(call_data.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::*, models::deployment::default_total_supply};
    use alloy::primitives::Address;

    fn params() -> DeploymentParameters {
        DeploymentParameters {
            name: "0xabc".to_string(),
            symbol: "0xabc".to_string(),
            total_supply: default_total_supply(),
            deployer: Address::repeat_byte(0xaa),
            fid: DEFAULT_CREATOR_FID,
            image: "https://img.example/card.png".to_string(),
            cast_hash: "0xdef".to_string(),
            pool: PoolConfig::default(),
        }
    }

    #[test]
    fn test_calldata_carries_salt_and_pool() {
        let salt = B256::repeat_byte(0x07);
        let campaigns = [CampaignDefinition::default(); 2];
        let calldata = deploy_calldata(&params(), salt, &campaigns, CAMPAIGN_LIMIT).unwrap();

        assert_eq!(&calldata[..4], abi::deployTokenWithCampaignsCall::SELECTOR.as_slice());

        let decoded = abi::deployTokenWithCampaignsCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.salt, salt);
        assert_eq!(decoded.deployer, Address::repeat_byte(0xaa));
        assert_eq!(decoded.poolConfig.pairedToken, WETH_ADDRESS);
        assert_eq!(decoded.poolConfig.tick, I24::try_from(DEFAULT_POOL_TICK).unwrap());
        assert_eq!(decoded.fee, U24::from(DEFAULT_POOL_FEE));
        assert_eq!(decoded.campaigns.len(), 2);
        assert_eq!(decoded.campaignLimit, U256::from(CAMPAIGN_LIMIT));
    }

    #[test]
    fn test_out_of_range_pool_is_rejected() {
        let mut pool = PoolConfig::default();
        pool.tick = 1 << 23;
        assert!(matches!(pool_config(&pool), Err(DeployError::InvalidParameters(_))));

        let mut pool = PoolConfig::default();
        pool.fee = 1 << 24;
        assert!(matches!(pool_config(&pool), Err(DeployError::InvalidParameters(_))));
    }
}
