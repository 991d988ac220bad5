use alloy::primitives::{Address, B256, Bytes};
use std::future::Future;

use crate::error::ChainError;

/// One log entry of a mined transaction, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLog {
    pub address: Address,
    pub topics: Vec<B256>,
}

impl ReceiptLog {
    pub fn new(address: Address, topics: Vec<B256>) -> Self {
        Self { address, topics }
    }
}

/// Receipt of a successfully mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub logs: Vec<ReceiptLog>,
}

/// The chain operations a deployment needs.
///
/// Implementations sign with a single key. Callers serialize submissions per client so
/// nonces never collide.
pub trait ChainClient: Send + Sync {
    /// Account that signs submitted transactions.
    fn signer_address(&self) -> Address;

    fn latest_block_number(&self) -> impl Future<Output = Result<u64, ChainError>> + Send;

    /// Hash of the block at `number`, `None` when the node does not have it.
    fn block_hash(&self, number: u64) -> impl Future<Output = Result<Option<B256>, ChainError>> + Send;

    /// Signs and broadcasts a call to `to`, returning the transaction hash.
    fn submit_transaction(&self, to: Address, input: Bytes) -> impl Future<Output = Result<B256, ChainError>> + Send;

    /// Waits until `tx_hash` is mined. A revert is reported as [`ChainError::Unconfirmed`].
    fn wait_for_receipt(&self, tx_hash: B256) -> impl Future<Output = Result<ChainReceipt, ChainError>> + Send;
}
