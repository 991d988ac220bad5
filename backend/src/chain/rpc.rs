use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, B256, Bytes},
    providers::{Provider, ProviderBuilder, SendableTx},
    rpc::types::{TransactionInput, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::TransportError,
};
use anyhow::Result;
use reqwest::Url;
use std::time::Duration;
use tokio::time::{self, Instant};

use super::client::{ChainClient, ChainReceipt, ReceiptLog};
use crate::{constants::*, error::ChainError};

/// [`ChainClient`] over JSON-RPC, signing with a local private key.
#[derive(Debug, Clone)]
pub struct RpcChainClient {
    rpc_url: Url,
    signer: PrivateKeySigner,
}

impl RpcChainClient {
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let url = rpc_url
            .parse::<Url>()
            .map_err(|e| anyhow::anyhow!("Invalid RPC URL '{}': {}", rpc_url, e))?;
        let signer = private_key
            .parse::<PrivateKeySigner>()
            .map_err(|e| anyhow::anyhow!("Invalid signing key: {}", e))?;

        Ok(Self { rpc_url: url, signer })
    }

    fn create_provider(&self) -> impl Provider {
        ProviderBuilder::new().connect_http(self.rpc_url.clone())
    }

}

fn transport<E: std::fmt::Display>(err: E) -> ChainError {
    ChainError::Transport(err.to_string())
}

/// An error response from the node is a deterministic revert; anything else is I/O.
fn estimation_failure(err: &TransportError) -> ChainError {
    match err.as_error_resp() {
        Some(payload) => ChainError::Rejected(format!("gas estimation reverted: {}", payload.message)),
        None => transport(err),
    }
}

/// Errors that a fresh attempt with a refetched nonce can fix.
fn is_nonce_conflict(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("replacement transaction underpriced") || message.contains("nonce too low")
}

/// The identical signed transaction is already pending.
fn is_already_known(message: &str) -> bool {
    message.to_lowercase().contains("already known")
}

impl ChainClient for RpcChainClient {
    fn signer_address(&self) -> Address {
        self.signer.address()
    }

    async fn latest_block_number(&self) -> Result<u64, ChainError> {
        self.create_provider().get_block_number().await.map_err(transport)
    }

    async fn block_hash(&self, number: u64) -> Result<Option<B256>, ChainError> {
        let block = self
            .create_provider()
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(transport)?;
        Ok(block.map(|block| block.header.hash))
    }

    async fn submit_transaction(&self, to: Address, input: Bytes) -> Result<B256, ChainError> {
        let provider = ProviderBuilder::new()
            .wallet(self.signer.clone())
            .connect_http(self.rpc_url.clone());
        let from = self.signer.address();

        let tx_base = TransactionRequest::default()
            .from(from)
            .to(to)
            .input(TransactionInput::new(input));

        let mut last_error = String::new();
        for attempt in 0..MAX_SUBMIT_ATTEMPTS {
            let estimate = time::timeout(
                Duration::from_secs(GAS_ESTIMATION_TIMEOUT_SECS),
                provider.estimate_gas(tx_base.clone().gas_limit(GAS_ESTIMATION_LIMIT)),
            )
            .await;

            let estimated_gas = match estimate {
                Ok(Ok(gas)) => gas,
                Ok(Err(e)) => match estimation_failure(&e) {
                    ChainError::Transport(reason) => {
                        tracing::error!("Gas estimation failed on attempt {}: {}", attempt + 1, e);
                        last_error = reason;
                        continue;
                    }
                    rejected => {
                        tracing::error!("Gas estimation reverted: {}", e);
                        return Err(rejected);
                    }
                },
                Err(_) => {
                    tracing::error!("Gas estimation timed out on attempt {}", attempt + 1);
                    last_error = "gas estimation timed out".to_string();
                    continue;
                }
            };

            // 1.2x buffer over the estimate
            let gas_limit = estimated_gas + estimated_gas / 5;

            // sign locally so the hash is known before broadcast
            let envelope = match provider.fill(tx_base.clone().gas_limit(gas_limit)).await {
                Ok(SendableTx::Envelope(envelope)) => envelope,
                Ok(SendableTx::Builder(_)) => {
                    return Err(ChainError::Rejected("signer did not produce a signed transaction".to_string()));
                }
                Err(e) => {
                    tracing::error!("Failed to prepare transaction on attempt {}: {}", attempt + 1, e);
                    last_error = e.to_string();
                    continue;
                }
            };
            let tx_hash = *envelope.tx_hash();
            tracing::info!(
                "Attempt {} - Sending deployment {} from {} with gas limit {}",
                attempt + 1,
                tx_hash,
                from,
                gas_limit
            );

            match provider.send_tx_envelope(envelope).await {
                Ok(_) => {
                    tracing::info!("Deployment transaction sent with hash: {}", tx_hash);
                    return Ok(tx_hash);
                }
                Err(e) if is_already_known(&e.to_string()) => {
                    tracing::info!("Deployment transaction {} already in the mempool", tx_hash);
                    return Ok(tx_hash);
                }
                Err(e) if is_nonce_conflict(&e.to_string()) => {
                    tracing::warn!(
                        "Nonce conflict detected on attempt {}: {}. Retrying with fresh nonce...",
                        attempt + 1,
                        e
                    );
                    last_error = e.to_string();
                    time::sleep(Duration::from_millis(200 * (attempt as u64 + 1))).await;
                }
                Err(e) => {
                    tracing::error!("Failed to send transaction on attempt {}: {}", attempt + 1, e);
                    last_error = e.to_string();
                }
            }
        }

        Err(ChainError::Transport(format!(
            "transaction not accepted after {} attempts: {}",
            MAX_SUBMIT_ATTEMPTS, last_error
        )))
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<ChainReceipt, ChainError> {
        let provider = self.create_provider();
        let deadline = Instant::now() + Duration::from_secs(RECEIPT_TIMEOUT_SECS);

        loop {
            match provider.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => {
                    if !receipt.status() {
                        tracing::error!("Deployment transaction reverted: {}", tx_hash);
                        return Err(ChainError::Unconfirmed {
                            tx_hash,
                            reason: "transaction reverted".to_string(),
                        });
                    }

                    let logs = receipt
                        .inner
                        .logs()
                        .iter()
                        .map(|log| ReceiptLog::new(log.inner.address, log.topics().to_vec()))
                        .collect();

                    tracing::info!(
                        "Deployment transaction confirmed in block {:?}: {}",
                        receipt.block_number,
                        tx_hash
                    );
                    return Ok(ChainReceipt {
                        transaction_hash: receipt.transaction_hash,
                        block_number: receipt.block_number,
                        logs,
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Failed to fetch receipt for {}: {}, retrying...", tx_hash, e);
                }
            }

            if Instant::now() >= deadline {
                return Err(ChainError::Unconfirmed {
                    tx_hash,
                    reason: format!("no receipt after {} seconds", RECEIPT_TIMEOUT_SECS),
                });
            }
            time::sleep(Duration::from_secs(RECEIPT_POLL_INTERVAL_SECS)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::transports::{RpcError, TransportErrorKind};

    // anvil's first dev account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_signer_address_from_key() {
        let client = RpcChainClient::new("http://localhost:8545", DEV_KEY).unwrap();
        assert_eq!(
            client.signer_address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(RpcChainClient::new("not a url", DEV_KEY).is_err());
        assert!(RpcChainClient::new("http://localhost:8545", "0x1234").is_err());
    }

    #[test]
    fn test_nonce_conflicts() {
        assert!(is_nonce_conflict("server returned an error response: nonce too low"));
        assert!(is_nonce_conflict("Replacement transaction underpriced"));
        assert!(!is_nonce_conflict("execution reverted"));
        assert!(!is_nonce_conflict("server returned an error response: already known"));
    }

    #[test]
    fn test_already_known_is_not_resubmitted() {
        assert!(is_already_known("server returned an error response: error code -32000: already known"));
        assert!(!is_already_known("nonce too low"));
    }

    #[test]
    fn test_estimation_revert_is_rejected_not_transport() {
        let revert = RpcError::ErrorResp(
            serde_json::from_str(r#"{"code": 3, "message": "execution reverted: salt already used"}"#).unwrap(),
        );
        assert_eq!(
            estimation_failure(&revert),
            ChainError::Rejected("gas estimation reverted: execution reverted: salt already used".to_string())
        );

        let refused = TransportErrorKind::custom_str("connection refused");
        assert!(matches!(estimation_failure(&refused), ChainError::Transport(_)));
    }
}
