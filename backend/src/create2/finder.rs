use alloy::primitives::{Address, B256, U256};
use tracing::{debug, info};

use super::predictor::AddressPredictor;

/// A salt whose predicted address sorts before the paired token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundSalt {
    pub salt: B256,
    pub counter: U256,
    pub address: Address,
    /// Candidates evaluated, including this one
    pub attempts: u64,
}

/// Result of evaluating one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Accepted(FoundSalt),
    Rejected { counter: U256, address: Address },
    /// The candidate could not be evaluated. The search moves on to the next counter.
    Failed { counter: U256, reason: String },
}

/// Left-padded 32-byte big-endian encoding of a search counter.
pub fn salt_for_counter(counter: U256) -> B256 {
    B256::from(counter.to_be_bytes::<32>())
}

/// Whether `candidate` sorts strictly before `paired_token`.
///
/// Addresses are fixed width, so comparing their lowercase hex strings and comparing
/// their bytes give the same order.
pub fn sorts_before(candidate: Address, paired_token: Address) -> bool {
    candidate < paired_token
}

/// Walks the candidate space upwards from a seed, one salt per item.
///
/// Yields every attempt in order and ends right after the first accepted salt. The
/// counter wraps at 2^256, so the search has no upper bound.
#[derive(Debug)]
pub struct SaltSearch<'a, P> {
    predictor: &'a P,
    paired_token: Address,
    counter: U256,
    attempts: u64,
    finished: bool,
}

impl<'a, P: AddressPredictor> SaltSearch<'a, P> {
    pub fn new(predictor: &'a P, paired_token: Address, seed: B256) -> Self {
        Self {
            predictor,
            paired_token,
            counter: U256::from_be_bytes(seed.0),
            attempts: 0,
            finished: false,
        }
    }

    /// Counter of the next candidate to evaluate.
    pub fn counter(&self) -> U256 {
        self.counter
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Drives the search to its accepted salt.
    pub fn run(mut self) -> FoundSalt {
        loop {
            match self.next() {
                Some(Attempt::Accepted(found)) => return found,
                Some(Attempt::Failed { counter, reason }) => {
                    debug!("Salt candidate {} failed: {}, skipping", counter, reason);
                }
                Some(Attempt::Rejected { .. }) | None => {}
            }
        }
    }
}

impl<P: AddressPredictor> Iterator for SaltSearch<'_, P> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let counter = self.counter;
        let salt = salt_for_counter(counter);
        self.counter = counter.wrapping_add(U256::from(1u8));
        self.attempts += 1;

        let attempt = match self.predictor.predict(&salt) {
            Ok(address) if sorts_before(address, self.paired_token) => {
                self.finished = true;
                Attempt::Accepted(FoundSalt {
                    salt,
                    counter,
                    address,
                    attempts: self.attempts,
                })
            }
            Ok(address) => Attempt::Rejected { counter, address },
            Err(err) => Attempt::Failed {
                counter,
                reason: err.to_string(),
            },
        };

        Some(attempt)
    }
}

/// Finds the first salt at or after `seed` whose predicted address sorts before `paired_token`.
pub fn find_salt<P: AddressPredictor>(predictor: &P, paired_token: Address, seed: B256) -> FoundSalt {
    let found = SaltSearch::new(predictor, paired_token, seed).run();
    info!(
        "Found valid salt {} -> {} after {} attempts",
        found.salt, found.address, found.attempts
    );
    found
}
