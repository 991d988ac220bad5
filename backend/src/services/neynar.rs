use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::send_json;
use crate::{constants::NEYNAR_CAST_URL, error::ApiError};

const SERVICE: &str = "neynar";

#[derive(Debug, Deserialize)]
struct CastLookupResponse {
    cast: Option<CastBody>,
}

#[derive(Debug, Deserialize)]
struct CastBody {
    #[serde(default)]
    hash: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct PublishCastRequest<'a> {
    signer_uuid: &'a str,
    text: &'a str,
    embeds: Vec<Embed<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PublishCastResponse {
    cast: Option<CastBody>,
}

/// Farcaster reads and writes through Neynar.
#[derive(Debug, Clone)]
pub struct NeynarClient {
    client: Client,
    api_key: String,
    signer_uuid: String,
    cast_url: String,
}

impl NeynarClient {
    pub fn new(api_key: String, signer_uuid: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            signer_uuid,
            cast_url: NEYNAR_CAST_URL.to_string(),
        }
    }

    /// Text of the cast with `hash`, if it has any.
    pub async fn fetch_cast_text(&self, hash: &str) -> Result<Option<String>, ApiError> {
        let request = self
            .client
            .get(&self.cast_url)
            .query(&[("identifier", hash), ("type", "hash")])
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key);

        let response: CastLookupResponse = send_json(SERVICE, request).await?;
        Ok(response.cast.and_then(|cast| cast.text).filter(|text| !text.is_empty()))
    }

    /// Publishes `text` with one embedded link as a reply to `parent_hash`, returning the new cast hash.
    pub async fn reply(&self, text: &str, parent_hash: &str, embed_url: &str) -> Result<String, ApiError> {
        let body = publish_request(&self.signer_uuid, text, parent_hash, embed_url);
        let request = self
            .client
            .post(&self.cast_url)
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .json(&body);

        let response: PublishCastResponse = send_json(SERVICE, request).await?;
        let hash = response
            .cast
            .and_then(|cast| cast.hash)
            .ok_or(ApiError::MissingField {
                service: SERVICE,
                field: "cast.hash",
            })?;

        tracing::info!("Replied to {} with cast {}", parent_hash, hash);
        Ok(hash)
    }
}

fn publish_request<'a>(signer_uuid: &'a str, text: &'a str, parent_hash: &'a str, embed_url: &'a str) -> PublishCastRequest<'a> {
    PublishCastRequest {
        signer_uuid,
        text,
        embeds: vec![Embed { url: embed_url }],
        parent: Some(parent_hash),
    }
}
