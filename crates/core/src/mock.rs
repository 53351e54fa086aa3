//! An in-memory [`Backend`] for exercising the proof engine and the
//! higher-level crates without a real HTTP or on-chain service. Gated
//! behind the `test-support` feature so it can be a dev-dependency of
//! sibling crates too.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::backend::{Backend, BackendError, Deadline};
use crate::hash::Hash;
use crate::node::Node;

#[derive(Default)]
pub struct MockBackend {
    nodes: RwLock<HashMap<Hash, Node>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, node: Node) {
        self.nodes.write().expect("mock backend lock poisoned").insert(node.hash, node);
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get_node(&self, _deadline: &Deadline, hash: Hash) -> Result<Node, BackendError> {
        self.nodes
            .read()
            .expect("mock backend lock poisoned")
            .get(&hash)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn save_nodes(&self, _deadline: &Deadline, nodes: &[Node]) -> Result<(), BackendError> {
        let mut guard = self.nodes.write().expect("mock backend lock poisoned");
        for node in nodes {
            guard.insert(node.hash, node.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u64) -> Hash {
        Hash::from_big_int(n.into()).unwrap()
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let backend = MockBackend::new();
        let node = Node { hash: h(1), children: vec![h(2), h(3)] };
        backend.save_nodes(&Deadline::none(), &[node.clone()]).await.unwrap();
        let fetched = backend.get_node(&Deadline::none(), h(1)).await.unwrap();
        assert_eq!(fetched, node);
    }

    #[tokio::test]
    async fn unknown_hash_is_not_found() {
        let backend = MockBackend::new();
        let err = backend.get_node(&Deadline::none(), h(1)).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
    }
}
