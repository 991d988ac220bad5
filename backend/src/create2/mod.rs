//! Deterministic deployment salts.
//!
//! The factory deploys each token with CREATE2 using `keccak256(deployer ++ salt)` as the
//! effective salt. Uniswap orders pool tokens by address, and the factory only accepts
//! tokens that sort before the paired token, so a launch needs a salt whose predicted
//! address satisfies that ordering.

pub mod finder;
pub mod predictor;
pub mod seed;

pub use finder::{Attempt, FoundSalt, SaltSearch, find_salt, salt_for_counter, sorts_before};
pub use predictor::{AddressPredictor, Create2Predictor, predict_address, salt_hash};
pub use seed::fetch_seed;
