use alloy::primitives::{Address, U256};

use crate::constants::{COINVISE_APP_URL, COINVISE_FRAMES_URL};

pub fn token_created_message(token_name: &str, token_address: Address) -> String {
    format!(
        "🚨 Token Created: {name}.\n\nToken address: {address}\n\nView on Coinvise: {app}/token/{address}\n\n{name} airdrops are now claimable below in this thread!",
        name = token_name,
        address = token_address,
        app = COINVISE_APP_URL,
    )
}

pub fn token_frame_url(token_address: Address) -> String {
    format!("{}/token/{}", COINVISE_FRAMES_URL, token_address)
}

pub fn yap_airdrop_message(token_name: &str) -> String {
    format!("🪂 Airdrop #1: Yap about {} to be eligible to claim.", token_name)
}

pub fn follow_airdrop_message() -> String {
    "🪂 Airdrop #2: Follow @coinvise, @earnkit and recast the main post in this thread to be eligible to claim."
        .to_string()
}

pub fn claim_frame_url(campaign_id: U256, slug: &str) -> String {
    format!("{}/claim/{}/{}", COINVISE_FRAMES_URL, campaign_id, slug)
}
