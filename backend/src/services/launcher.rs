use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

use super::{
    card::{CardRenderer, CastCard},
    coinvise::{AirdropRequest, CoinviseClient, TokenRegistration},
    messages,
    neynar::NeynarClient,
    orchestrator::DeploymentOrchestrator,
};
use crate::{
    chain::ChainClient,
    error::DeployError,
    models::{
        CastEvent, DeploymentOutcome, DeploymentParameters, PoolConfig, deployment::default_total_supply,
    },
    utils::Config,
};

/// Runs `deploy` under a deadline, starting over with a fresh seed on retryable failures.
///
/// A salt is never carried from one attempt to the next, and nothing is retried once a
/// transaction has been broadcast.
pub async fn deploy_with_retry<C: ChainClient>(
    orchestrator: &DeploymentOrchestrator<C>,
    params: &DeploymentParameters,
    deadline: Duration,
    max_attempts: u32,
) -> Result<DeploymentOutcome, DeployError> {
    let mut attempt = 1;
    loop {
        match orchestrator.deploy_within(params, deadline).await {
            Ok(outcome) => return Ok(outcome),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!("Deployment attempt {}/{} failed: {}, retrying...", attempt, max_attempts, e);
                attempt += 1;
            }
            Err(e) => {
                error!("Deployment failed on attempt {}/{}: {}", attempt, max_attempts, e);
                return Err(e);
            }
        }
    }
}

/// What a launch produced.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchReport {
    pub deployment: DeploymentOutcome,
    pub image_url: String,
    pub yap_slug: Option<String>,
    pub follow_slug: Option<String>,
    /// Hashes of the replies posted, in thread order
    pub reply_hashes: Vec<String>,
}

/// Turns a cast event into a launched token, airdrops and a reply thread.
#[derive(Debug)]
pub struct Launcher<C> {
    orchestrator: DeploymentOrchestrator<C>,
    neynar: NeynarClient,
    coinvise: CoinviseClient,
    cards: CardRenderer,
    pool: PoolConfig,
    creator_fid: u64,
    deploy_deadline: Duration,
    deploy_max_attempts: u32,
}

impl<C: ChainClient> Launcher<C> {
    pub fn new(orchestrator: DeploymentOrchestrator<C>, config: &Config) -> Result<Self> {
        Ok(Self {
            orchestrator,
            neynar: NeynarClient::new(config.neynar_api_key.clone(), config.neynar_signer_uuid.clone()),
            coinvise: CoinviseClient::new(
                config.coinvise_api_key.clone(),
                config.coinvise_authenticated_user.clone(),
            ),
            cards: CardRenderer::new(&config.card_renderer_url)?,
            pool: config.chain.pool,
            creator_fid: config.chain.creator_fid,
            deploy_deadline: Duration::from_secs(config.deploy_timeout_secs),
            deploy_max_attempts: config.deploy_max_attempts,
        })
    }

    /// The text a token is launched with: the parent cast's text for replies.
    async fn description(&self, event: &CastEvent) -> String {
        if let Some(parent_hash) = event.parent_hash.as_deref().filter(|hash| !hash.is_empty()) {
            match self.neynar.fetch_cast_text(parent_hash).await {
                Ok(Some(text)) => {
                    info!("Fetched original cast text for {}", parent_hash);
                    return text;
                }
                Ok(None) => warn!("Parent cast {} has no text, using reply text", parent_hash),
                Err(e) => error!("Error fetching original cast {}: {}", parent_hash, e),
            }
        }
        event.text_or_default().to_string()
    }

    pub fn deployment_parameters(&self, event: &CastEvent, image_url: &str) -> DeploymentParameters {
        let token_name = event.token_source_hash().to_string();
        DeploymentParameters {
            symbol: token_name.clone(),
            name: token_name,
            total_supply: default_total_supply(),
            deployer: self.orchestrator.chain().signer_address(),
            fid: self.creator_fid,
            image: image_url.to_string(),
            cast_hash: event.hash.clone(),
            pool: self.pool,
        }
    }

    pub async fn launch(&self, event: &CastEvent) -> Result<LaunchReport> {
        info!("Launching token for cast {} by @{}", event.hash, event.author.username_or_default());

        let description = self.description(event).await;
        let now = Utc::now();
        let image_url = self.cards.card_url(&CastCard::from_event(event, &description, now));
        info!("Card image: {}", image_url);

        let params = self.deployment_parameters(event, &image_url);
        let deployment =
            deploy_with_retry(&self.orchestrator, &params, self.deploy_deadline, self.deploy_max_attempts).await?;

        // the token exists from here on, so downstream failures are reported but never fatal
        let registration = TokenRegistration::erc20(
            &params.name,
            &params.symbol,
            deployment.token_address,
            &description,
            &image_url,
            &deployment.position_id,
        );
        if let Err(e) = self.coinvise.register_token(&registration).await {
            error!("Error registering token {}: {}", deployment.token_address, e);
        }

        let follow_slug = self
            .create_airdrop(AirdropRequest::follow(
                deployment.transaction_hash,
                deployment.token_address,
                &params.name,
                &image_url,
                now,
            ))
            .await;
        let yap_slug = self
            .create_airdrop(AirdropRequest::yap(
                deployment.transaction_hash,
                deployment.token_address,
                &params.name,
                &image_url,
                now,
            ))
            .await;

        let thread = reply_thread(&params.name, &deployment, yap_slug.as_deref(), follow_slug.as_deref());
        let reply_hashes = self.post_thread(&event.hash, thread).await;
        info!("All casts done for {}: {} replies", deployment.token_address, reply_hashes.len());

        Ok(LaunchReport {
            deployment,
            image_url,
            yap_slug,
            follow_slug,
            reply_hashes,
        })
    }

    async fn create_airdrop(&self, airdrop: AirdropRequest) -> Option<String> {
        match self.coinvise.create_airdrop(&airdrop).await {
            Ok(slug) => Some(slug),
            Err(e) => {
                error!("Error triggering airdrop '{}': {}", airdrop.title, e);
                None
            }
        }
    }

    /// Posts each reply under the previous one, stopping at the first failure.
    async fn post_thread(&self, root_hash: &str, thread: Vec<(String, String)>) -> Vec<String> {
        let mut hashes = Vec::with_capacity(thread.len());
        let mut parent = root_hash.to_string();

        for (text, embed_url) in thread {
            match self.neynar.reply(&text, &parent, &embed_url).await {
                Ok(hash) => {
                    hashes.push(hash.clone());
                    parent = hash;
                }
                Err(e) => {
                    error!("Error replying under {}: {}, stopping thread", parent, e);
                    break;
                }
            }
        }
        hashes
    }
}

/// Replies to post, as (text, embed url), in thread order. Airdrops without a page are left out.
pub fn reply_thread(
    token_name: &str,
    deployment: &DeploymentOutcome,
    yap_slug: Option<&str>,
    follow_slug: Option<&str>,
) -> Vec<(String, String)> {
    let mut thread = vec![(
        messages::token_created_message(token_name, deployment.token_address),
        messages::token_frame_url(deployment.token_address),
    )];

    if let Some(slug) = yap_slug {
        thread.push((
            messages::yap_airdrop_message(token_name),
            messages::claim_frame_url(deployment.yap_campaign.id, slug),
        ));
    }
    if let Some(slug) = follow_slug {
        thread.push((
            messages::follow_airdrop_message(),
            messages::claim_frame_url(deployment.follow_campaign.id, slug),
        ));
    }
    thread
}
