//! Backend abstraction: anywhere a tree's nodes live, reachable by hash.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::hash::Hash;
use crate::node::{Node, NodeError};
use crate::proof::{Proof, ProofError};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("node not found")]
    NotFound,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request was cancelled")]
    Cancelled,
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error(transparent)]
    Node(#[from] NodeError),
}

/// A timeout and a cancellation signal threaded through every backend call.
/// Either, both, or neither may be set; a default `Deadline` never expires.
#[derive(Clone, Debug, Default)]
pub struct Deadline {
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl Deadline {
    /// A deadline with no timeout and no cancellation.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn after(timeout: Duration) -> Self {
        Self { timeout: Some(timeout), cancellation: None }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// Dereferences hashes to nodes and accepts node batches for storage.
///
/// Implementations are expected to be safe to call concurrently and to own
/// whatever transport or signing resources they need internally.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn get_node(&self, deadline: &Deadline, hash: Hash) -> Result<Node, BackendError>;

    async fn save_nodes(&self, deadline: &Deadline, nodes: &[Node]) -> Result<(), BackendError>;

    /// Convenience that walks this backend from `root` down to `key`,
    /// delegating to the shared proof engine.
    async fn generate_proof(
        &self,
        deadline: &Deadline,
        root: Hash,
        key: Hash,
    ) -> Result<Proof, ProofError>
    where
        Self: Sized,
    {
        crate::proof::generate_proof(self, deadline, root, key).await
    }
}
