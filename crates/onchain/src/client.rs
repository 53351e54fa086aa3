use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider, ProviderError};
use ethers::signers::{LocalWallet, Signer, WalletError};
use ethers::types::{Address, U256};
use rhs_core::{Backend, BackendError, Deadline, Hash, Node};
use thiserror::Error;

use crate::contract::OnchainIdentityTreeStore;

/// Default RPC endpoint used when a deployment does not specify one,
/// matching the convention of pointing at a local development node.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Gas, timeout and confirmation policy for on-chain submission. Mirrors
/// the knobs a signing client needs beyond just "which contract".
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub receipt_timeout: Duration,
    pub confirmation_timeout: Duration,
    pub confirmation_block_count: u64,
    pub default_gas_limit: u64,
    pub min_gas_price: U256,
    pub max_gas_price: U256,
    pub rpc_response_timeout: Duration,
    pub wait_receipt_cycle_time: Duration,
    pub wait_block_cycle_time: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            receipt_timeout: Duration::from_secs(5),
            confirmation_timeout: Duration::from_secs(10),
            confirmation_block_count: 6,
            default_gas_limit: 21_000,
            min_gas_price: U256::from(1_000_000_000u64),
            max_gas_price: U256::from(2_000_000_000u64),
            rpc_response_timeout: Duration::from_secs(5),
            wait_receipt_cycle_time: Duration::from_secs(1),
            wait_block_cycle_time: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum OnchainError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("invalid private key: {0}")]
    Wallet(#[from] WalletError),
}

/// The smart-contract-backed [`Backend`]: an RPC client, a signer, and the
/// transaction policy in [`ClientConfig`].
pub struct OnchainBackend<M> {
    contract: OnchainIdentityTreeStore<M>,
    config: ClientConfig,
}

/// The middleware stack `OnchainBackend::connect` builds: an HTTP JSON-RPC
/// provider wrapped with a local wallet signer.
pub type DefaultMiddleware = SignerMiddleware<Provider<Http>, LocalWallet>;

impl OnchainBackend<DefaultMiddleware> {
    /// Connects to `rpc_url` (or [`DEFAULT_RPC_URL`] if empty) and binds
    /// `contract_address`, signing transactions with `wallet`.
    pub async fn connect(
        rpc_url: &str,
        contract_address: Address,
        wallet: LocalWallet,
        config: ClientConfig,
    ) -> Result<Self, OnchainError> {
        let url = if rpc_url.is_empty() { DEFAULT_RPC_URL } else { rpc_url };
        let provider = Provider::<Http>::try_from(url)
            .map_err(|e| OnchainError::Provider(ProviderError::CustomError(e.to_string())))?
            .interval(config.rpc_response_timeout);
        let chain_id = provider.get_chainid().await?.as_u64();
        let client = Arc::new(SignerMiddleware::new(provider, wallet.with_chain_id(chain_id)));
        let contract = OnchainIdentityTreeStore::new(contract_address, client);
        Ok(Self { contract, config })
    }
}

impl<M: Middleware + 'static> OnchainBackend<M> {
    /// Wraps an already-constructed contract binding, for callers that
    /// want a middleware stack other than [`DefaultMiddleware`].
    pub fn with_contract(contract: OnchainIdentityTreeStore<M>, config: ClientConfig) -> Self {
        Self { contract, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl<M: Middleware + 'static> Backend for OnchainBackend<M> {
    async fn get_node(&self, deadline: &Deadline, hash: Hash) -> Result<Node, BackendError> {
        if deadline.is_cancelled() {
            return Err(BackendError::Cancelled);
        }

        let id = hash.to_big_int();
        let raw_children = self
            .contract
            .get_node(id)
            .call()
            .await
            .map_err(map_contract_error)?;

        let mut children = Vec::with_capacity(raw_children.len());
        for child in raw_children {
            children.push(Hash::from_big_int(child).map_err(|e| BackendError::Protocol(e.to_string()))?);
        }

        // Unlike a previous implementation of this lookup, children are
        // always carried through: a node is meaningless without them.
        Ok(Node { hash, children })
    }

    async fn save_nodes(&self, deadline: &Deadline, nodes: &[Node]) -> Result<(), BackendError> {
        if deadline.is_cancelled() {
            return Err(BackendError::Cancelled);
        }

        let preimages: Vec<Vec<U256>> = nodes
            .iter()
            .map(|node| node.children.iter().map(Hash::to_big_int).collect())
            .collect();

        let call = self
            .contract
            .save_nodes(preimages)
            .gas(self.config.default_gas_limit)
            .gas_price(self.config.max_gas_price);

        let pending = call.send().await.map_err(map_contract_error)?;
        debug!("saveNodes tx {:?} submitted, awaiting {} confirmation(s)", pending.tx_hash(), self.config.confirmation_block_count);
        pending
            .confirmations(self.config.confirmation_block_count as usize)
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(())
    }
}

fn map_contract_error<M: Middleware>(
    error: ethers::contract::ContractError<M>,
) -> BackendError {
    let message = error.to_string();
    if message.contains("Node not found") {
        BackendError::NotFound
    } else {
        BackendError::Transport(message)
    }
}
