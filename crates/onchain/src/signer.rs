//! The original client threaded a bespoke `CliSigner` callback interface
//! (an address plus a sign-this-transaction function) through the
//! on-chain client. `ethers::signers::Signer` and `LocalWallet` already
//! cover that role idiomatically, so `OnchainBackend` takes a `LocalWallet`
//! directly rather than reintroducing that abstraction.

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use ethers::signers::LocalWallet;

    /// A funded local-network signer, matching the fixture key used by
    /// this library's own integration tests.
    pub fn test_wallet(chain_id: u64) -> LocalWallet {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        key.parse::<LocalWallet>()
            .expect("fixture private key is well-formed")
            .with_chain_id(chain_id)
    }
}
