use alloy::primitives::{Address, B256, keccak256};
use std::{convert::Infallible, fmt};

/// Maps a candidate salt to the address a deployment with that salt would produce.
pub trait AddressPredictor {
    type Error: fmt::Display;

    fn predict(&self, salt: &B256) -> Result<Address, Self::Error>;
}

/// `keccak256(leftPad32(deployer) ++ salt)`, the salt the factory hands to CREATE2.
pub fn salt_hash(deployer: Address, salt: &B256) -> B256 {
    keccak256([deployer.into_word().as_slice(), salt.as_slice()].concat())
}

/// Address of a token deployed by `factory` on behalf of `deployer`.
///
/// `keccak256(0xff ++ factory ++ salt_hash(deployer, salt) ++ init_code_hash)[12:]`
pub fn predict_address(factory: Address, deployer: Address, salt: &B256, init_code_hash: &B256) -> Address {
    factory.create2(salt_hash(deployer, salt), *init_code_hash)
}

/// Predictor for one token's init code, deployed through the factory.
#[derive(Debug, Clone, Copy)]
pub struct Create2Predictor {
    /// Factory contract executing CREATE2
    factory: Address,
    /// Account calling the factory, mixed into the salt
    deployer: Address,
    /// Keccak256 of creation code plus constructor arguments
    init_code_hash: B256,
}

impl Create2Predictor {
    pub fn new(factory: Address, deployer: Address, init_code_hash: B256) -> Self {
        Self {
            factory,
            deployer,
            init_code_hash,
        }
    }

    pub fn init_code_hash(&self) -> B256 {
        self.init_code_hash
    }
}

impl AddressPredictor for Create2Predictor {
    type Error = Infallible;

    fn predict(&self, salt: &B256) -> Result<Address, Self::Error> {
        Ok(predict_address(self.factory, self.deployer, salt, &self.init_code_hash))
    }
}
