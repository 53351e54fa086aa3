//! Whole-tree read and publish helpers. These sit above [`rhs_core::Backend`]
//! for callers that already have (or want to build) an entire tree rather
//! than a single-key proof.

mod tree;

pub use tree::{
    collect_for_save, fetch_tree, leaf_node, middle_node, read_state_node, FetchedTree, StateNode,
    WalkError,
};
