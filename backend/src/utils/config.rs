use alloy::primitives::Address;
use anyhow::Result;
use std::{env, str::FromStr};

use crate::{constants::*, models::PoolConfig};

fn required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("{} must be set", key))
}

fn optional<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {}", key, value, e)),
        Err(_) => Ok(default),
    }
}

/// Settings needed to search salts and deploy tokens.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub private_key: String,
    pub factory_address: Address,
    pub pool: PoolConfig,
    pub token_artifact_path: String,
    pub creator_fid: u64,
}

impl ChainConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            rpc_url: required("RPC_URL")?,
            private_key: required("TOKEN_BOT_PRIVATE_KEY")?,
            factory_address: optional("FACTORY_ADDRESS", EARNKIT_FACTORY_ADDRESS)?,
            pool: PoolConfig {
                paired_token: optional("PAIRED_TOKEN_ADDRESS", WETH_ADDRESS)?,
                fee: optional("POOL_FEE", DEFAULT_POOL_FEE)?,
                tick: optional("POOL_TICK", DEFAULT_POOL_TICK)?,
            },
            token_artifact_path: env::var("TOKEN_ARTIFACT_PATH")
                .unwrap_or_else(|_| DEFAULT_TOKEN_ARTIFACT_PATH.to_string()),
            creator_fid: optional("CREATOR_FID", DEFAULT_CREATOR_FID)?,
        })
    }
}

/// Everything the launch pipeline needs: chain settings plus API credentials.
#[derive(Debug, Clone)]
pub struct Config {
    pub chain: ChainConfig,
    pub neynar_api_key: String,
    pub neynar_signer_uuid: String,
    pub coinvise_api_key: String,
    pub coinvise_authenticated_user: String,
    pub card_renderer_url: String,
    pub deploy_timeout_secs: u64,
    pub deploy_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let chain = ChainConfig::from_env()?;

        Ok(Self {
            chain,
            neynar_api_key: required("NEYNAR_API_KEY")?,
            neynar_signer_uuid: required("NEYNAR_SIGNER_UUID")?,
            coinvise_api_key: required("COINVISE_API_KEY")?,
            coinvise_authenticated_user: required("COINVISE_AUTHENTICATED_USER")?,
            card_renderer_url: required("CARD_RENDERER_URL")?,
            deploy_timeout_secs: optional("DEPLOY_TIMEOUT_SECS", DEFAULT_DEPLOY_TIMEOUT_SECS)?,
            deploy_max_attempts: optional("DEPLOY_MAX_ATTEMPTS", DEFAULT_DEPLOY_MAX_ATTEMPTS)?.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_parses_or_defaults() {
        // keys no real environment sets
        unsafe {
            env::set_var("CASTLAUNCH_TEST_TICK", " -887220 ");
            env::set_var("CASTLAUNCH_TEST_BAD_FEE", "ten thousand");
        }

        assert_eq!(optional("CASTLAUNCH_TEST_TICK", 0i32).unwrap(), -887220);
        assert_eq!(optional("CASTLAUNCH_TEST_UNSET", DEFAULT_POOL_FEE).unwrap(), DEFAULT_POOL_FEE);
        assert!(optional("CASTLAUNCH_TEST_BAD_FEE", DEFAULT_POOL_FEE).is_err());
    }

    #[test]
    fn test_optional_parses_addresses() {
        unsafe {
            env::set_var("CASTLAUNCH_TEST_FACTORY", "0xdf29e0ce7fe906065608fef642da4dc4169f924b");
        }
        assert_eq!(
            optional("CASTLAUNCH_TEST_FACTORY", Address::ZERO).unwrap(),
            EARNKIT_FACTORY_ADDRESS
        );
    }

    #[test]
    fn test_required_names_missing_key() {
        let err = required("CASTLAUNCH_TEST_MISSING").unwrap_err();
        assert_eq!(err.to_string(), "CASTLAUNCH_TEST_MISSING must be set");
    }
}
