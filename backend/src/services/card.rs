use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;

use crate::models::CastEvent;

/// Fields drawn on a launch card.
#[derive(Debug, Clone)]
pub struct CastCard<'a> {
    pub username: &'a str,
    pub display_name: &'a str,
    pub avatar_url: &'a str,
    pub text: &'a str,
    pub timestamp: DateTime<Utc>,
}

impl<'a> CastCard<'a> {
    pub fn from_event(event: &'a CastEvent, text: &'a str, timestamp: DateTime<Utc>) -> Self {
        Self {
            username: event.author.username_or_default(),
            display_name: event.author.display_name_or_default(),
            avatar_url: event.author.avatar_or_default(),
            text,
            timestamp,
        }
    }
}

/// Addresses card images on the external rendering service.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    base_url: Url,
}

impl CardRenderer {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| anyhow::anyhow!("Invalid card renderer URL '{}': {}", base_url, e))?;
        Ok(Self { base_url })
    }

    pub fn card_url(&self, card: &CastCard<'_>) -> String {
        let timestamp = card.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("username", card.username)
            .append_pair("displayName", card.display_name)
            .append_pair("pfp", card.avatar_url)
            .append_pair("text", card.text)
            .append_pair("timestamp", &timestamp);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_card_url_encodes_fields() {
        let renderer = CardRenderer::new("https://cards.example/render").unwrap();
        let card = CastCard {
            username: "alice",
            display_name: "Alice B",
            avatar_url: "https://img.example/a.png",
            text: "gm & gn",
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        };

        let url = Url::parse(&renderer.card_url(&card)).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/render");
        assert!(pairs.contains(&("displayName".to_string(), "Alice B".to_string())));
        assert!(pairs.contains(&("text".to_string(), "gm & gn".to_string())));
        assert!(pairs.contains(&("timestamp".to_string(), "2025-03-01T12:00:00Z".to_string())));
    }

    #[test]
    fn test_rejects_relative_base() {
        assert!(CardRenderer::new("/render").is_err());
    }
}
