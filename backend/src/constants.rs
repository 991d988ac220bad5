// =============================================================================
// Castlaunch Constants
// =============================================================================
// This file contains all constants used throughout the backend to enable
// easy tuning and configuration from a single location.

use alloy::primitives::{Address, B256, address, b256};

// =============================================================================
// CONTRACT ADDRESSES
// =============================================================================

/// Earnkit token factory on Base mainnet
pub const EARNKIT_FACTORY_ADDRESS: Address = address!("0xDF29E0CE7fE906065608fef642dA4Dc4169f924b");

/// WETH on Base, the token every new pool is paired against
pub const WETH_ADDRESS: Address = address!("0x4200000000000000000000000000000000000006");

// =============================================================================
// BLOCKCHAIN CONFIGURATION
// =============================================================================

/// Base mainnet chain ID
pub const BASE_MAINNET_CHAIN_ID: u64 = 8453;

/// The salt search is seeded from the block this far below the head
pub const SEED_BLOCK_DEPTH: u64 = 1;

// =============================================================================
// EVENT TOPICS
// =============================================================================

/// Campaign created event topic emitted by the factory, once per campaign
pub const CAMPAIGN_CREATED_TOPIC: B256 =
    b256!("0xfc5b9d1c2c1134048e1792e3ae27d4eee04f460d341711c7088000d2ca218621");

/// Topic holding the campaign id in a campaign created log
pub const CAMPAIGN_ID_TOPIC_INDEX: usize = 2;

/// Topic holding the LP position id in the factory's deployment log
pub const POSITION_ID_TOPIC_INDEX: usize = 2;

// =============================================================================
// TOKEN DEFAULTS
// =============================================================================

/// Uniswap fee tier for the token/WETH pool (1%)
pub const DEFAULT_POOL_FEE: u32 = 10_000;

/// Starting tick for the token/WETH pool
pub const DEFAULT_POOL_TICK: i32 = -230_400;

/// Whole tokens minted per launch
pub const TOKEN_SUPPLY_WHOLE: u64 = 100_000_000_000;

/// ERC-20 decimals of launched tokens
pub const TOKEN_DECIMALS: u8 = 18;

/// Farcaster ID recorded as the token creator
pub const DEFAULT_CREATOR_FID: u64 = 710451;

/// Default location of the compiled token artifact
pub const DEFAULT_TOKEN_ARTIFACT_PATH: &str = "./contracts/EarnkitToken.json";

// =============================================================================
// CAMPAIGN CONFIGURATION
// =============================================================================

/// Claims allowed per on-chain campaign
pub const CAMPAIGN_MAX_CLAIMS: u64 = 5_000;

/// Whole tokens paid out per on-chain campaign claim
pub const CAMPAIGN_AMOUNT_PER_CLAIM_WHOLE: u64 = 500_000;

/// Sponsored claims per on-chain campaign
pub const CAMPAIGN_MAX_SPONSORED_CLAIMS: u64 = 0;

/// Trailing count argument passed to the factory alongside the campaigns
pub const CAMPAIGN_LIMIT: u64 = 5;

// =============================================================================
// TRANSACTION CONFIGURATION
// =============================================================================

/// Attempts to get a deployment transaction accepted by the node
pub const MAX_SUBMIT_ATTEMPTS: u32 = 3;

/// Gas limit used only for estimation requests
pub const GAS_ESTIMATION_LIMIT: u64 = 15_000_000;

/// Seconds allowed for a single gas estimation
pub const GAS_ESTIMATION_TIMEOUT_SECS: u64 = 15;

/// Seconds between receipt polls
pub const RECEIPT_POLL_INTERVAL_SECS: u64 = 2;

/// Seconds to wait for a deployment receipt before giving up
pub const RECEIPT_TIMEOUT_SECS: u64 = 90;

/// Overall deadline for seed fetch, search, submission and receipt
pub const DEFAULT_DEPLOY_TIMEOUT_SECS: u64 = 180;

/// Whole-flow attempts for one launch
pub const DEFAULT_DEPLOY_MAX_ATTEMPTS: u32 = 3;

// =============================================================================
// NEYNAR CONFIGURATION
// =============================================================================

/// Neynar cast endpoint (lookup and publish)
pub const NEYNAR_CAST_URL: &str = "https://api.neynar.com/v2/farcaster/cast";

/// Avatar used when the cast author has none
pub const PLACEHOLDER_AVATAR_URL: &str = "https://via.placeholder.com/80";

// =============================================================================
// COINVISE CONFIGURATION
// =============================================================================

/// Coinvise API base URL
pub const COINVISE_API_URL: &str = "https://api.coinvise.co";

/// Coinvise frame host used in reply embeds
pub const COINVISE_FRAMES_URL: &str = "https://frames.coinvise.ai";

/// Coinvise token pages
pub const COINVISE_APP_URL: &str = "https://coinvise.ai";

/// Coinvise account FID that follow airdrop claimers must follow
pub const COINVISE_FID: u64 = 372043;

/// Earnkit account FID that follow airdrop claimers must follow
pub const EARNKIT_FID: u64 = 881415;

/// Recipients per airdrop
pub const AIRDROP_RECIPIENTS: u64 = 5_000;

/// Tokens per recipient of the follow airdrop
pub const FOLLOW_AIRDROP_AMOUNT: u64 = 500_000;

/// Tokens per recipient of the yap airdrop
pub const YAP_AIRDROP_AMOUNT: u64 = 50_000;

/// Days until an airdrop expires
pub const AIRDROP_EXPIRY_DAYS: i64 = 30;

/// Days a cast counts towards the yap condition
pub const YAP_WINDOW_DAYS: i64 = 7;

/// Brand colour shown on airdrop pages
pub const AIRDROP_BRAND_COLOR: &str = "#ff0000";

/// Seconds allowed for any single external API request
pub const API_REQUEST_TIMEOUT_SECS: u64 = 15;
