use alloy::primitives::B256;
use thiserror::Error;

/// Failures reported by a [`ChainClient`](crate::chain::ChainClient).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The endpoint could not be reached or rejected the request.
    #[error("chain endpoint request failed: {0}")]
    Transport(String),

    /// The node refused the transaction before broadcast, e.g. gas estimation reverted.
    #[error("transaction rejected by the node: {0}")]
    Rejected(String),

    /// The transaction was accepted but never confirmed, or it reverted.
    #[error("transaction {tx_hash} was not confirmed: {reason}")]
    Unconfirmed { tx_hash: B256, reason: String },
}

/// What was wrong with a deployment receipt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReceiptDefect {
    #[error("receipt has no logs")]
    NoLogs,

    #[error("expected at least 2 campaign created logs, found {found}")]
    MissingCampaigns { found: usize },

    #[error("no log emitted by the factory contract")]
    MissingFactoryLog,

    #[error("log {log_index} has no topic {topic_index}")]
    MissingTopic { log_index: usize, topic_index: usize },
}

/// Errors surfaced by a token deployment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeployError {
    #[error("chain endpoint unreachable: {0}")]
    Connectivity(String),

    #[error("no block hash available to seed the salt search")]
    SeedUnavailable,

    #[error("invalid deployment parameters: {0}")]
    InvalidParameters(String),

    #[error("deployment rejected by the chain: {0}")]
    Rejected(String),

    #[error("transaction {tx_hash} was not confirmed: {reason}")]
    Unconfirmed { tx_hash: B256, reason: String },

    #[error("malformed deployment receipt for {tx_hash}: {defect}")]
    MalformedReceipt { tx_hash: B256, defect: ReceiptDefect },

    /// The deadline passed before anything was submitted.
    #[error("deployment was not submitted within {0} seconds")]
    DeadlineExceeded(u64),
}

impl DeployError {
    /// Whether the whole flow may be started again with a fresh seed.
    ///
    /// Unconfirmed and malformed outcomes mean a transaction reached the chain,
    /// so running the flow again could launch a second token. A rejection repeats
    /// deterministically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DeployError::Connectivity(_) | DeployError::SeedUnavailable | DeployError::DeadlineExceeded(_)
        )
    }
}

impl From<ChainError> for DeployError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Transport(reason) => DeployError::Connectivity(reason),
            ChainError::Rejected(reason) => DeployError::Rejected(reason),
            ChainError::Unconfirmed { tx_hash, reason } => DeployError::Unconfirmed { tx_hash, reason },
        }
    }
}

/// Errors from the Neynar and Coinvise HTTP APIs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {service} failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{service} response is missing {field}")]
    MissingField { service: &'static str, field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_errors_map_to_distinct_deploy_errors() {
        let transport: DeployError = ChainError::Transport("connection refused".into()).into();
        assert_eq!(transport, DeployError::Connectivity("connection refused".into()));

        let unconfirmed: DeployError = ChainError::Unconfirmed {
            tx_hash: B256::repeat_byte(0x11),
            reason: "reverted".into(),
        }
        .into();
        assert!(matches!(unconfirmed, DeployError::Unconfirmed { .. }));

        let rejected: DeployError = ChainError::Rejected("execution reverted".into()).into();
        assert_eq!(rejected, DeployError::Rejected("execution reverted".into()));
    }

    #[test]
    fn test_only_pre_submission_failures_are_retryable() {
        assert!(DeployError::Connectivity("timeout".into()).is_retryable());
        assert!(DeployError::SeedUnavailable.is_retryable());
        assert!(DeployError::DeadlineExceeded(180).is_retryable());

        let tx_hash = B256::ZERO;
        assert!(!DeployError::Unconfirmed { tx_hash, reason: "dropped".into() }.is_retryable());
        assert!(
            !DeployError::MalformedReceipt { tx_hash, defect: ReceiptDefect::MissingFactoryLog }
                .is_retryable()
        );
        assert!(!DeployError::InvalidParameters("tick".into()).is_retryable());
        assert!(!DeployError::Rejected("execution reverted".into()).is_retryable());
    }
}
