//! Facade crate: re-exports the node model, backend trait and proof
//! engine from `rhs-core`, plus whichever transport and tree-walking
//! crates are enabled via feature flags.

pub use rhs_core::{
    generate_proof, reconstruct_root, Backend, BackendError, Deadline, Hash, HashError, Node,
    NodeAux, NodeError, NodeHasher, NodeKind, Proof, ProofError, Q,
};

#[cfg(feature = "http")]
pub use rhs_http::{HttpBackend, HttpBackendBuilder, HttpError};

#[cfg(feature = "onchain")]
pub use rhs_onchain::{
    ClientConfig, DefaultMiddleware, OnchainBackend, OnchainError, DEFAULT_RPC_URL,
};

#[cfg(feature = "walker")]
pub use rhs_walker::{
    collect_for_save, fetch_tree, leaf_node, middle_node, read_state_node, FetchedTree, StateNode,
    WalkError,
};
