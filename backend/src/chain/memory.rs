use alloy::primitives::{Address, B256, Bytes, keccak256};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use super::client::{ChainClient, ChainReceipt, ReceiptLog};
use crate::error::ChainError;

/// A transaction accepted by [`InMemoryChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransaction {
    pub to: Address,
    pub input: Bytes,
    pub tx_hash: B256,
}

#[derive(Debug, Default)]
struct MemoryState {
    head: u64,
    block_hashes: HashMap<u64, B256>,
    receipt_logs: Vec<ReceiptLog>,
    unconfirmed_reason: Option<String>,
    unreachable: bool,
    stalled_receipts: bool,
    submissions: Vec<SubmittedTransaction>,
    in_flight: usize,
    max_in_flight: usize,
    block_lookups: Vec<u64>,
}

/// Scripted chain for exercising deployments without a node.
///
/// Every submitted transaction is recorded and mines with the configured logs.
#[derive(Debug)]
pub struct InMemoryChain {
    signer: Address,
    state: Mutex<MemoryState>,
}

impl InMemoryChain {
    pub fn new(signer: Address) -> Self {
        Self {
            signer,
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Sets the head to `number` and records its parent's hash.
    pub fn with_head(self, number: u64, parent_hash: B256) -> Self {
        {
            let mut state = self.state();
            state.head = number;
            state.block_hashes.insert(number.saturating_sub(1), parent_hash);
        }
        self
    }

    pub fn with_block_hash(self, number: u64, hash: B256) -> Self {
        self.state().block_hashes.insert(number, hash);
        self
    }

    pub fn with_receipt_logs(self, logs: Vec<ReceiptLog>) -> Self {
        self.state().receipt_logs = logs;
        self
    }

    /// Transactions are accepted but never confirmed.
    pub fn with_unconfirmed(self, reason: &str) -> Self {
        self.state().unconfirmed_reason = Some(reason.to_string());
        self
    }

    /// Every request fails with a transport error.
    pub fn with_unreachable(self) -> Self {
        self.state().unreachable = true;
        self
    }

    /// Receipts never arrive.
    pub fn with_stalled_receipts(self) -> Self {
        self.state().stalled_receipts = true;
        self
    }

    pub fn submissions(&self) -> Vec<SubmittedTransaction> {
        self.state().submissions.clone()
    }

    /// Block numbers whose hash was requested, in order.
    pub fn block_lookups(&self) -> Vec<u64> {
        self.state().block_lookups.clone()
    }

    /// Most transactions that were submitted but not yet waited on at any one time.
    pub fn max_in_flight(&self) -> usize {
        self.state().max_in_flight
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_reachable(state: &MemoryState) -> Result<(), ChainError> {
        if state.unreachable {
            return Err(ChainError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

impl ChainClient for InMemoryChain {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn latest_block_number(&self) -> Result<u64, ChainError> {
        let state = self.state();
        Self::check_reachable(&state)?;
        Ok(state.head)
    }

    async fn block_hash(&self, number: u64) -> Result<Option<B256>, ChainError> {
        let mut state = self.state();
        Self::check_reachable(&state)?;
        state.block_lookups.push(number);
        Ok(state.block_hashes.get(&number).copied())
    }

    async fn submit_transaction(&self, to: Address, input: Bytes) -> Result<B256, ChainError> {
        let mut state = self.state();
        Self::check_reachable(&state)?;

        let nonce = state.submissions.len() as u64;
        let tx_hash = keccak256([&input[..], &nonce.to_be_bytes()[..]].concat());
        state.submissions.push(SubmittedTransaction { to, input, tx_hash });
        state.in_flight += 1;
        state.max_in_flight = state.max_in_flight.max(state.in_flight);
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<ChainReceipt, ChainError> {
        let stalled = self.state().stalled_receipts;
        if stalled {
            std::future::pending::<()>().await;
        }
        // pending until other tasks get a turn
        tokio::task::yield_now().await;

        let mut state = self.state();
        state.in_flight = state.in_flight.saturating_sub(1);
        Self::check_reachable(&state)?;

        if let Some(reason) = &state.unconfirmed_reason {
            return Err(ChainError::Unconfirmed {
                tx_hash,
                reason: reason.clone(),
            });
        }
        if !state.submissions.iter().any(|tx| tx.tx_hash == tx_hash) {
            return Err(ChainError::Unconfirmed {
                tx_hash,
                reason: "unknown transaction".to_string(),
            });
        }

        Ok(ChainReceipt {
            transaction_hash: tx_hash,
            block_number: Some(state.head + 1),
            logs: state.receipt_logs.clone(),
        })
    }
}
