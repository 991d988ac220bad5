use alloy::primitives::B256;
use castlaunch::{
    chain::{ChainClient, RpcChainClient},
    create2::{fetch_seed, find_salt},
    models::{CastWebhook, DeploymentParameters, deployment::default_total_supply},
    services::{DeploymentOrchestrator, Launcher},
    utils::{ChainConfig, Config, init_logging, load_creation_code},
};
use anyhow::Result;
use clap::Parser;
use std::{fs, path::PathBuf};
use tracing::info;

/// Token launcher for Farcaster casts.
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "launcher", about = "Launches Earnkit tokens for Farcaster casts.")]
enum Command {
    /// Searches a deployment salt without submitting anything.
    Salt {
        /// Token name.
        #[clap(long)]
        name: String,

        /// Token symbol. Defaults to the name.
        #[clap(long)]
        symbol: Option<String>,

        /// Provenance cast hash baked into the token.
        #[clap(long, default_value = "")]
        cast_hash: String,

        /// Image URI baked into the token.
        #[clap(long, default_value = "")]
        image: String,

        /// Search seed. Defaults to the hash of the block below the chain head.
        #[clap(long)]
        seed: Option<B256>,
    },

    /// Runs the full launch for a saved cast webhook payload.
    Launch {
        /// Path to the webhook JSON body.
        payload: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    match Command::parse() {
        Command::Salt {
            name,
            symbol,
            cast_hash,
            image,
            seed,
        } => run_salt(name, symbol, cast_hash, image, seed).await,
        Command::Launch { payload } => run_launch(payload).await,
    }
}

async fn run_salt(name: String, symbol: Option<String>, cast_hash: String, image: String, seed: Option<B256>) -> Result<()> {
    let config = ChainConfig::from_env()?;
    let chain = RpcChainClient::new(&config.rpc_url, &config.private_key)?;
    let creation_code = load_creation_code(&config.token_artifact_path)?;
    let orchestrator = DeploymentOrchestrator::new(chain, config.factory_address, creation_code);

    let params = DeploymentParameters {
        symbol: symbol.unwrap_or_else(|| name.clone()),
        name,
        total_supply: default_total_supply(),
        deployer: orchestrator.chain().signer_address(),
        fid: config.creator_fid,
        image,
        cast_hash,
        pool: config.pool,
    };

    let seed = match seed {
        Some(seed) => seed,
        None => fetch_seed(orchestrator.chain()).await?,
    };
    let predictor = orchestrator.predictor_for(&params);
    info!("Init code hash: {}", predictor.init_code_hash());

    let found = find_salt(&predictor, params.pool.paired_token, seed);
    println!("Found salt {} ==> {} ({} attempts)", found.salt, found.address, found.attempts);

    Ok(())
}

async fn run_launch(payload: PathBuf) -> Result<()> {
    let config = Config::from_env()?;
    let body = fs::read_to_string(&payload)
        .map_err(|e| anyhow::anyhow!("Failed to read payload {}: {}", payload.display(), e))?;
    let webhook: CastWebhook = serde_json::from_str(&body)?;

    let chain = RpcChainClient::new(&config.chain.rpc_url, &config.chain.private_key)?;
    let creation_code = load_creation_code(&config.chain.token_artifact_path)?;
    let orchestrator = DeploymentOrchestrator::new(chain, config.chain.factory_address, creation_code);
    let launcher = Launcher::new(orchestrator, &config)?;

    let report = launcher.launch(&webhook.data).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
