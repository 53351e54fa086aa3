//! A recursive read of an entire tree, and the reverse operation:
//! flattening an already-known tree shape into the node batch a backend's
//! `save_nodes` expects.

use rhs_core::{Backend, BackendError, Deadline, Hash, Node, NodeKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("node {0} does not have the three children a state node requires")]
    NotAStateNode(Hash),
}

/// The result of reading a whole subtree back from a backend.
///
/// Unlike [`rhs_core::generate_proof`], which treats a state or unknown
/// node as a traversal error, a full-tree read records it as
/// [`FetchedTree::Opaque`] and stops there: a whole-tree walk can
/// legitimately cross into a different logical tree at that boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchedTree {
    Empty,
    Leaf { hash: Hash, key: Hash, value: Hash },
    Middle { hash: Hash, left: Box<FetchedTree>, right: Box<FetchedTree> },
    Opaque(Hash),
}

impl FetchedTree {
    pub fn root_hash(&self) -> Hash {
        match self {
            FetchedTree::Empty => Hash::ZERO,
            FetchedTree::Leaf { hash, .. }
            | FetchedTree::Middle { hash, .. }
            | FetchedTree::Opaque(hash) => *hash,
        }
    }
}

/// Recursively reads the subtree rooted at `root`.
pub async fn fetch_tree<B: Backend + ?Sized>(
    backend: &B,
    deadline: &Deadline,
    root: Hash,
) -> Result<FetchedTree, WalkError> {
    if root == Hash::ZERO {
        return Ok(FetchedTree::Empty);
    }

    let node = backend.get_node(deadline, root).await?;

    match node.kind() {
        NodeKind::Leaf => {
            Ok(FetchedTree::Leaf { hash: root, key: node.children[0], value: node.children[1] })
        }
        NodeKind::Middle => {
            let left = Box::pin(fetch_tree(backend, deadline, node.children[0])).await?;
            let right = Box::pin(fetch_tree(backend, deadline, node.children[1])).await?;
            Ok(FetchedTree::Middle { hash: root, left: Box::new(left), right: Box::new(right) })
        }
        NodeKind::State | NodeKind::Unknown => Ok(FetchedTree::Opaque(root)),
    }
}

/// Builds the two-child node record for a branch whose own address and
/// children are already known.
pub fn middle_node(hash: Hash, left: Hash, right: Hash) -> Node {
    Node { hash, children: vec![left, right] }
}

/// Builds the three-child `[key, value, H_ONE]` node record for a leaf
/// whose own address is already known.
pub fn leaf_node(hash: Hash, key: Hash, value: Hash) -> Node {
    Node { hash, children: vec![key, value, Hash::ONE] }
}

/// Flattens a fetched (or otherwise assembled) tree into the node batch a
/// backend's `save_nodes` expects. Opaque boundaries are not resubmitted:
/// they belong to whichever tree they were read from.
pub fn collect_for_save(tree: &FetchedTree) -> Vec<Node> {
    let mut out = Vec::new();
    collect_into(tree, &mut out);
    out
}

fn collect_into(tree: &FetchedTree, out: &mut Vec<Node>) {
    match tree {
        FetchedTree::Empty | FetchedTree::Opaque(_) => {}
        FetchedTree::Leaf { hash, key, value } => out.push(leaf_node(*hash, *key, *value)),
        FetchedTree::Middle { hash, left, right } => {
            out.push(middle_node(*hash, left.root_hash(), right.root_hash()));
            collect_into(left, out);
            collect_into(right, out);
        }
    }
}

/// The three roots an identity state node carries: claims tree, revocation
/// tree, and a roots-of-roots tree. Reading one is how a caller crosses
/// from a state hash into the revocation tree this crate proves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateNode {
    pub claims_tree_root: Hash,
    pub revocation_tree_root: Hash,
    pub roots_tree_root: Hash,
}

pub async fn read_state_node<B: Backend + ?Sized>(
    backend: &B,
    deadline: &Deadline,
    state: Hash,
) -> Result<StateNode, WalkError> {
    let node = backend.get_node(deadline, state).await?;
    if node.kind() != NodeKind::State {
        return Err(WalkError::NotAStateNode(node.hash));
    }
    Ok(StateNode {
        claims_tree_root: node.children[0],
        revocation_tree_root: node.children[1],
        roots_tree_root: node.children[2],
    })
}
