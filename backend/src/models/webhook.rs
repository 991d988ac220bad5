use serde::{Deserialize, Serialize};

use crate::constants::PLACEHOLDER_AVATAR_URL;

/// Body of a Neynar `cast.created` webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastWebhook {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    pub data: CastEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastEvent {
    pub hash: String,
    #[serde(default)]
    pub parent_hash: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    pub author: CastAuthor,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastAuthor {
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
}

impl CastEvent {
    /// The cast a token is launched for: the parent when this is a reply.
    pub fn token_source_hash(&self) -> &str {
        match self.parent_hash.as_deref() {
            Some(parent) if !parent.is_empty() => parent,
            _ => &self.hash,
        }
    }

    pub fn text_or_default(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "No text provided",
        }
    }
}

impl CastAuthor {
    pub fn username_or_default(&self) -> &str {
        non_empty(self.username.as_deref()).unwrap_or("unknown")
    }

    pub fn display_name_or_default(&self) -> &str {
        non_empty(self.display_name.as_deref()).unwrap_or("User")
    }

    pub fn avatar_or_default(&self) -> &str {
        non_empty(self.pfp_url.as_deref()).unwrap_or(PLACEHOLDER_AVATAR_URL)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_webhook() {
        let body = r#"{
            "created_at": 1739900000,
            "type": "cast.created",
            "data": {
                "object": "cast",
                "hash": "0x5a1b2c",
                "parent_hash": "0x9f8e7d",
                "text": "@earnkit launch this",
                "author": {
                    "fid": 1234,
                    "username": "alice",
                    "display_name": "Alice",
                    "pfp_url": "https://img.example/alice.png"
                }
            }
        }"#;

        let webhook: CastWebhook = serde_json::from_str(body).unwrap();
        assert_eq!(webhook.event_type.as_deref(), Some("cast.created"));
        assert_eq!(webhook.data.token_source_hash(), "0x9f8e7d");
        assert_eq!(webhook.data.author.username_or_default(), "alice");
        assert_eq!(webhook.data.text_or_default(), "@earnkit launch this");
    }

    #[test]
    fn test_missing_author_fields_fall_back() {
        let body = r#"{"data": {"hash": "0x01", "parent_hash": null, "author": {}}}"#;

        let webhook: CastWebhook = serde_json::from_str(body).unwrap();
        let event = webhook.data;
        assert_eq!(event.token_source_hash(), "0x01");
        assert_eq!(event.text_or_default(), "No text provided");
        assert_eq!(event.author.username_or_default(), "unknown");
        assert_eq!(event.author.display_name_or_default(), "User");
        assert_eq!(event.author.avatar_or_default(), PLACEHOLDER_AVATAR_URL);
    }
}
