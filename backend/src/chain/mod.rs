pub mod client;
pub mod memory;
pub mod rpc;

pub use client::{ChainClient, ChainReceipt, ReceiptLog};
pub use memory::{InMemoryChain, SubmittedTransaction};
pub use rpc::RpcChainClient;
