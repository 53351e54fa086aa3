//! On-chain transport for the reverse hash service client, reading and
//! writing nodes through an `OnchainIdentityTreeStore`-shaped contract.

mod client;
mod contract;
mod signer;

pub use client::{ClientConfig, DefaultMiddleware, OnchainBackend, OnchainError, DEFAULT_RPC_URL};
pub use contract::OnchainIdentityTreeStore;

#[cfg(any(test, feature = "test-support"))]
pub use signer::test_support;
