//! Node model: the hash-addressed records a reverse hash service stores.
//!
//! A node's shape alone determines its kind — two children is an internal
//! fork, three children with a trailing `H_ONE` marker is a leaf, three
//! children otherwise is a tree-state record (outside this crate's proof
//! algorithm), anything else is unrecognised.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::{Hash, HashError};

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// A node is addressed by `hash` and carries the hashes it was built from.
/// `hash` is the node's own address, not one of its children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireNode", into = "WireNode")]
pub struct Node {
    pub hash: Hash,
    pub children: Vec<Hash>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Two children: left and right subtree roots.
    Middle,
    /// Three children, the third being `Hash::ONE`: `[key, value, H_ONE]`.
    Leaf,
    /// Three children, not a leaf marker: `[claims_root, revocation_root,
    /// roots_root]` in the identity-state convention this library treats
    /// as an opaque boundary.
    State,
    /// Any other children count, including zero (an unpopulated node
    /// reference) — not valid input to the proof traversal.
    Unknown,
}

impl NodeKind {
    pub fn classify(children: &[Hash]) -> NodeKind {
        match children.len() {
            2 => NodeKind::Middle,
            3 if children[2] == Hash::ONE => NodeKind::Leaf,
            3 => NodeKind::State,
            _ => NodeKind::Unknown,
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        NodeKind::classify(&self.children)
    }
}

/// Wire shape: `children` is nullable and, like the service it talks to,
/// treated the same whether it arrives as `null` or `[]` — both classify
/// as [`NodeKind::Unknown`].
#[derive(Serialize, Deserialize)]
struct WireNode {
    hash: String,
    children: Option<Vec<String>>,
}

impl TryFrom<WireNode> for Node {
    type Error = NodeError;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        let hash = Hash::from_hex(&wire.hash)?;
        let children = wire
            .children
            .unwrap_or_default()
            .iter()
            .map(|s| Hash::from_hex(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node { hash, children })
    }
}

impl From<Node> for WireNode {
    fn from(node: Node) -> Self {
        WireNode {
            hash: node.hash.hex(),
            children: if node.children.is_empty() {
                None
            } else {
                Some(node.children.iter().map(Hash::hex).collect())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(n: u64) -> Hash {
        Hash::from_big_int(n.into()).unwrap()
    }

    #[test]
    fn classifies_middle() {
        let node = Node { hash: h(1), children: vec![h(2), h(3)] };
        assert_eq!(node.kind(), NodeKind::Middle);
    }

    #[test]
    fn classifies_leaf() {
        let node = Node { hash: h(1), children: vec![h(2), h(3), Hash::ONE] };
        assert_eq!(node.kind(), NodeKind::Leaf);
    }

    #[test]
    fn classifies_state() {
        let node = Node { hash: h(1), children: vec![h(2), h(3), h(4)] };
        assert_eq!(node.kind(), NodeKind::State);
    }

    #[test]
    fn classifies_unknown_for_other_shapes() {
        assert_eq!(
            Node { hash: h(1), children: vec![] }.kind(),
            NodeKind::Unknown
        );
        assert_eq!(
            Node { hash: h(1), children: vec![h(2)] }.kind(),
            NodeKind::Unknown
        );
        assert_eq!(
            Node { hash: h(1), children: vec![h(2), h(3), h(4), h(5)] }.kind(),
            NodeKind::Unknown
        );
    }

    #[test]
    fn wire_round_trip_with_children() {
        let node = Node { hash: h(7), children: vec![h(2), h(3)] };
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"children\":["));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn empty_children_serialize_as_null() {
        let node = Node { hash: h(7), children: vec![] };
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"children\":null"));
    }

    #[test]
    fn null_and_empty_children_both_classify_unknown() {
        let from_null: Node = serde_json::from_str(
            &format!(r#"{{"hash":"{}","children":null}}"#, h(7).hex()),
        )
        .unwrap();
        let from_empty: Node = serde_json::from_str(
            &format!(r#"{{"hash":"{}","children":[]}}"#, h(7).hex()),
        )
        .unwrap();
        assert_eq!(from_null.kind(), NodeKind::Unknown);
        assert_eq!(from_empty.kind(), NodeKind::Unknown);
    }
}
