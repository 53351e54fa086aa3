//! Proof engine: walks a tree of hash-addressed nodes from a root down to
//! a key, producing an existence or non-existence proof.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::backend::{Backend, BackendError, Deadline};
use crate::hash::Hash;
use crate::node::NodeKind;

/// A tree's depth is bounded by the bit width of a key, one bit per level.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Error)]
pub enum ProofError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("unexpected {kind:?} node at {hash} during traversal")]
    UnexpectedNodeKind { kind: NodeKind, hash: Hash },
    #[error("tree depth exceeded {MAX_DEPTH} levels without terminating")]
    TreeDepthExceeded,
}

/// The leaf a non-existence proof actually found at the point the sought
/// key diverged from the tree, proving the tree is shaped so that the
/// sought key cannot be present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAux {
    pub key: Hash,
    pub value: Hash,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    pub existence: bool,
    pub siblings: Vec<Hash>,
    pub node_aux: Option<NodeAux>,
}

impl Serialize for Proof {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireProof::from(self.clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Proof {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireProof::deserialize(deserializer).map(Proof::from)
    }
}

/// `siblings` is always an array on this crate's own output but tolerates
/// `null`/absent on input; `aux_node` is omitted entirely, not nulled,
/// when there is no auxiliary leaf.
#[derive(Serialize, Deserialize)]
struct WireProof {
    existence: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    siblings: Vec<Hash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aux_node: Option<NodeAux>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Hash>, D::Error> {
    Ok(Option::<Vec<Hash>>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<Proof> for WireProof {
    fn from(proof: Proof) -> Self {
        WireProof { existence: proof.existence, siblings: proof.siblings, aux_node: proof.node_aux }
    }
}

impl From<WireProof> for Proof {
    fn from(wire: WireProof) -> Self {
        Proof { existence: wire.existence, siblings: wire.siblings, node_aux: wire.aux_node }
    }
}

/// Walks `backend` from `root` looking for `key`, one bit of `key` per
/// tree level, returning an existence proof if found or a non-existence
/// proof (with an optional auxiliary leaf) otherwise.
pub async fn generate_proof<B: Backend + ?Sized>(
    backend: &B,
    deadline: &Deadline,
    root: Hash,
    key: Hash,
) -> Result<Proof, ProofError> {
    let mut next = root;
    let mut siblings = Vec::new();

    for depth in 0..MAX_DEPTH {
        if next == Hash::ZERO {
            debug!("traversal hit an empty subtree at depth {depth}, key {key} absent");
            return Ok(Proof { existence: false, siblings, node_aux: None });
        }

        let node = backend.get_node(deadline, next).await?;

        match node.kind() {
            NodeKind::Leaf => {
                let leaf_key = node.children[0];
                let leaf_value = node.children[1];
                return Ok(if leaf_key == key {
                    Proof { existence: true, siblings, node_aux: None }
                } else {
                    debug!("leaf at depth {depth} holds key {leaf_key}, not {key}");
                    Proof {
                        existence: false,
                        siblings,
                        node_aux: Some(NodeAux { key: leaf_key, value: leaf_value }),
                    }
                });
            }
            NodeKind::Middle => {
                if key.test_bit(depth) {
                    siblings.push(node.children[0]);
                    next = node.children[1];
                } else {
                    siblings.push(node.children[1]);
                    next = node.children[0];
                }
            }
            kind => {
                return Err(ProofError::UnexpectedNodeKind { kind, hash: node.hash });
            }
        }
    }

    Err(ProofError::TreeDepthExceeded)
}

/// A caller-supplied hash function for the two node shapes a proof needs
/// to recombine. This crate has no opinion on which field hash
/// (Poseidon, in the identity-tree ecosystem this traversal comes from)
/// backs a deployment; callers plug in their own.
pub trait NodeHasher {
    fn hash_middle(&self, left: Hash, right: Hash) -> Hash;
    fn hash_leaf(&self, key: Hash, value: Hash) -> Hash;
}

/// Recomputes the root a `Proof` is consistent with, given the key/value
/// pair it was generated for. Comparing the result against the root the
/// proof was requested against is how a caller verifies the proof.
pub fn reconstruct_root(
    proof: &Proof,
    key: Hash,
    value: Hash,
    hasher: &dyn NodeHasher,
) -> Hash {
    let mut mid = if proof.existence {
        hasher.hash_leaf(key, value)
    } else if let Some(aux) = &proof.node_aux {
        hasher.hash_leaf(aux.key, aux.value)
    } else {
        Hash::ZERO
    };

    for (depth, sibling) in proof.siblings.iter().enumerate().rev() {
        mid = if key.test_bit(depth) {
            hasher.hash_middle(*sibling, mid)
        } else {
            hasher.hash_middle(mid, *sibling)
        };
    }

    mid
}
