use alloy::primitives::{Address, B256};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::send_json;
use crate::{constants::*, error::ApiError};

const SERVICE: &str = "coinvise";

/// Token listing submitted after a launch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRegistration {
    pub name: String,
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    pub token_supply: String,
    /// Bonding curve fields; the API expects the literal `"null"` for plain ERC20s
    pub slope: String,
    pub slope_decimals: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub description: String,
    pub image_url: String,
    /// The LP position id minted for the token's pool
    pub lp_locker_address: String,
}

impl TokenRegistration {
    pub fn erc20(name: &str, symbol: &str, address: Address, description: &str, image_url: &str, position_id: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            symbol: symbol.to_string(),
            decimals: TOKEN_DECIMALS,
            token_supply: TOKEN_SUPPLY_WHOLE.to_string(),
            slope: "null".to_string(),
            slope_decimals: "null".to_string(),
            token_type: "ERC20".to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
            lp_locker_address: position_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ConditionMetadata {
    Follow {
        target_fid: u64,
        target_username: String,
    },
    TokenYap {
        token_name: String,
        valid_from: String,
        valid_to: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirdropCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub metadata: ConditionMetadata,
    pub required: bool,
}

impl AirdropCondition {
    pub fn follow(target_fid: u64, target_username: &str) -> Self {
        Self {
            condition_type: "FARCASTER_FOLLOW".to_string(),
            metadata: ConditionMetadata::Follow {
                target_fid,
                target_username: target_username.to_string(),
            },
            required: true,
        }
    }

    pub fn token_yap(token_name: &str, valid_from: DateTime<Utc>, valid_to: DateTime<Utc>) -> Self {
        Self {
            condition_type: "FARCASTER_TOKEN_YAP".to_string(),
            metadata: ConditionMetadata::TokenYap {
                token_name: token_name.to_string(),
                valid_from: iso_timestamp(valid_from),
                valid_to: iso_timestamp(valid_to),
            },
            required: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropMetadata {
    pub cover_image: String,
}

/// Off-chain airdrop page backed by one of the launch's on-chain campaigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropRequest {
    pub tx_hash: String,
    pub tx_status: String,
    pub is_gnosis_safe_tx: bool,
    pub token_type: String,
    pub conditions: Vec<AirdropCondition>,
    #[serde(rename = "token_addr")]
    pub token_address: String,
    #[serde(rename = "amount_per_recipient")]
    pub amount_per_recipient: u64,
    #[serde(rename = "number_of_recipients")]
    pub number_of_recipients: u64,
    pub description: String,
    pub expiry: String,
    pub min_requirements_count: u32,
    pub title: String,
    pub brand_color: String,
    pub is_open_edition: bool,
    pub rewards: Vec<serde_json::Value>,
    pub metadata: AirdropMetadata,
}

/// `Date.toISOString` style: millisecond precision, `Z` suffix.
fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl AirdropRequest {
    #[allow(clippy::too_many_arguments)]
    fn base(
        tx_hash: B256,
        token_address: Address,
        token_name: &str,
        cover_image: &str,
        now: DateTime<Utc>,
        conditions: Vec<AirdropCondition>,
        amount_per_recipient: u64,
        description: &str,
    ) -> Self {
        Self {
            tx_hash: tx_hash.to_string(),
            tx_status: "pending".to_string(),
            is_gnosis_safe_tx: false,
            token_type: "ERC20".to_string(),
            conditions,
            token_address: token_address.to_string(),
            amount_per_recipient,
            number_of_recipients: AIRDROP_RECIPIENTS,
            description: description.to_string(),
            expiry: iso_timestamp(now + Duration::days(AIRDROP_EXPIRY_DAYS)),
            min_requirements_count: 1,
            title: format!("{} Airdrop", token_name),
            brand_color: AIRDROP_BRAND_COLOR.to_string(),
            is_open_edition: false,
            rewards: Vec::new(),
            metadata: AirdropMetadata {
                cover_image: cover_image.to_string(),
            },
        }
    }

    /// Claimable by accounts following both @coinvise and @earnkit.
    pub fn follow(tx_hash: B256, token_address: Address, token_name: &str, cover_image: &str, now: DateTime<Utc>) -> Self {
        Self::base(
            tx_hash,
            token_address,
            token_name,
            cover_image,
            now,
            vec![
                AirdropCondition::follow(COINVISE_FID, "coinvise"),
                AirdropCondition::follow(EARNKIT_FID, "earnkit"),
            ],
            FOLLOW_AIRDROP_AMOUNT,
            "Follow @coinvise and @earnkit to be eligible to claim this airdrop.",
        )
    }

    /// Claimable by accounts casting about the token within the yap window.
    pub fn yap(tx_hash: B256, token_address: Address, token_name: &str, cover_image: &str, now: DateTime<Utc>) -> Self {
        Self::base(
            tx_hash,
            token_address,
            token_name,
            cover_image,
            now,
            vec![AirdropCondition::token_yap(
                token_name,
                now,
                now + Duration::days(YAP_WINDOW_DAYS),
            )],
            YAP_AIRDROP_AMOUNT,
            "Yap about this token on Warpcast to be eligible to claim this airdrop.",
        )
    }
}

#[derive(Debug, Deserialize)]
struct SlugResponse {
    #[serde(default)]
    slug: Option<String>,
}

/// Token and airdrop registration on Coinvise.
#[derive(Debug, Clone)]
pub struct CoinviseClient {
    client: Client,
    api_key: String,
    authenticated_user: String,
    base_url: String,
    chain_id: u64,
}

impl CoinviseClient {
    pub fn new(api_key: String, authenticated_user: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            authenticated_user,
            base_url: COINVISE_API_URL.to_string(),
            chain_id: BASE_MAINNET_CHAIN_ID,
        }
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<SlugResponse, ApiError> {
        let request = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .query(&[("chain", self.chain_id)])
            .header("x-api-key", &self.api_key)
            .header("X-Authenticated-User", &self.authenticated_user)
            .json(body);

        send_json(SERVICE, request).await
    }

    /// Lists the token, returning its page slug when Coinvise provides one.
    pub async fn register_token(&self, token: &TokenRegistration) -> Result<Option<String>, ApiError> {
        let response = self.post("token", token).await?;
        tracing::info!("Token {} registered successfully", token.address);
        Ok(response.slug)
    }

    /// Creates an airdrop page and returns its slug.
    pub async fn create_airdrop(&self, airdrop: &AirdropRequest) -> Result<String, ApiError> {
        let slug = self
            .post("airdrop", airdrop)
            .await?
            .slug
            .ok_or(ApiError::MissingField {
                service: SERVICE,
                field: "slug",
            })?;
        tracing::info!("Airdrop '{}' triggered successfully: {}", airdrop.title, slug);
        Ok(slug)
    }
}
