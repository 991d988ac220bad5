use alloy::primitives::{Address, Bytes};
use std::time::Duration;
use tokio::{
    sync::Mutex,
    time::{self, Instant},
};
use tracing::{info, warn};

use super::{factory, receipt::decode_deployment_receipt};
use crate::{
    chain::ChainClient,
    constants::CAMPAIGN_LIMIT,
    create2::{Create2Predictor, FoundSalt, fetch_seed, find_salt},
    error::DeployError,
    models::{CampaignDefinition, DeploymentOutcome, DeploymentParameters},
};

/// Launches tokens through the factory: salt search, submission, receipt decoding.
///
/// One orchestrator per signing key. Submissions are serialized so concurrent launches
/// never race for the same nonce.
#[derive(Debug)]
pub struct DeploymentOrchestrator<C> {
    chain: C,
    factory: Address,
    creation_code: Bytes,
    campaigns: [CampaignDefinition; 2],
    campaign_limit: u64,
    submission_lock: Mutex<()>,
}

impl<C: ChainClient> DeploymentOrchestrator<C> {
    pub fn new(chain: C, factory: Address, creation_code: Bytes) -> Self {
        Self {
            chain,
            factory,
            creation_code,
            campaigns: [CampaignDefinition::default(); 2],
            campaign_limit: CAMPAIGN_LIMIT,
            submission_lock: Mutex::new(()),
        }
    }

    /// Yap campaign first, follow campaign second.
    pub fn with_campaigns(mut self, campaigns: [CampaignDefinition; 2], campaign_limit: u64) -> Self {
        self.campaigns = campaigns;
        self.campaign_limit = campaign_limit;
        self
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    /// Predictor for the token these parameters deploy. Hashes the init code once.
    pub fn predictor_for(&self, params: &DeploymentParameters) -> Create2Predictor {
        Create2Predictor::new(self.factory, params.deployer, params.init_code_hash(&self.creation_code))
    }

    /// Seeds from the chain and searches for a salt that sorts the token before the paired token.
    pub async fn find_salt(&self, params: &DeploymentParameters) -> Result<FoundSalt, DeployError> {
        let seed = fetch_seed(&self.chain).await?;
        let predictor = self.predictor_for(params);
        Ok(find_salt(&predictor, params.pool.paired_token, seed))
    }

    /// Deploys one token and decodes what the factory created for it.
    pub async fn deploy(&self, params: &DeploymentParameters) -> Result<DeploymentOutcome, DeployError> {
        self.deploy_with_deadline(params, None).await
    }

    /// Like [`deploy`](Self::deploy), bounded by `deadline`.
    ///
    /// Running out of time before submission is [`DeployError::DeadlineExceeded`]. Once a
    /// transaction is broadcast the remaining time only bounds the receipt wait, and expiry
    /// is reported as [`DeployError::Unconfirmed`] so the caller never submits twice.
    pub async fn deploy_within(
        &self,
        params: &DeploymentParameters,
        deadline: Duration,
    ) -> Result<DeploymentOutcome, DeployError> {
        self.deploy_with_deadline(params, Some((Instant::now() + deadline, deadline.as_secs())))
            .await
    }

    async fn deploy_with_deadline(
        &self,
        params: &DeploymentParameters,
        deadline: Option<(Instant, u64)>,
    ) -> Result<DeploymentOutcome, DeployError> {
        // reject unencodable pool settings before touching the chain
        factory::pool_config(&params.pool)?;

        let signer = self.chain.signer_address();
        if params.deployer != signer {
            warn!(
                "Deployer {} differs from signing account {}, factory may derive a different address",
                params.deployer, signer
            );
        }

        let prepare = async {
            info!("Searching salt for {} ({}) from fid {}", params.name, params.symbol, params.fid);
            let found = self.find_salt(params).await?;
            let calldata = factory::deploy_calldata(params, found.salt, &self.campaigns, self.campaign_limit)?;
            let submission = self.submission_lock.lock().await;
            Ok::<_, DeployError>((found, calldata, submission))
        };
        let (found, calldata, submission) = match deadline {
            Some((at, secs)) => time::timeout_at(at, prepare)
                .await
                .map_err(|_| DeployError::DeadlineExceeded(secs))??,
            None => prepare.await?,
        };

        // not cancelled: a broadcast transaction must yield its hash
        let tx_hash = self.chain.submit_transaction(self.factory, calldata).await?;
        info!("Transaction sent for {}. Waiting for confirmation...", params.name);

        let receipt = match deadline {
            Some((at, secs)) => time::timeout_at(at, self.chain.wait_for_receipt(tx_hash))
                .await
                .map_err(|_| DeployError::Unconfirmed {
                    tx_hash,
                    reason: format!("no receipt within the {} second deadline", secs),
                })??,
            None => self.chain.wait_for_receipt(tx_hash).await?,
        };
        drop(submission);

        info!(
            "{} deployed successfully. Transaction Hash: {}",
            params.name, receipt.transaction_hash
        );

        let outcome = decode_deployment_receipt(&receipt, self.factory)?;
        if outcome.token_address != found.address {
            warn!(
                "Token deployed at {} but salt predicted {}",
                outcome.token_address, found.address
            );
        }
        info!(
            "Token {} | position {} | yap campaign {} | follow campaign {}",
            outcome.token_address, outcome.position_id, outcome.yap_campaign.id, outcome.follow_campaign.id
        );

        Ok(outcome)
    }
}
