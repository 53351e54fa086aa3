//! Shared node model, backend trait, and proof engine for reverse hash
//! service clients. See `rhs-http` and `rhs-onchain` for the two transport
//! implementations, and `rhs-walker` for tree-shaped read/publish helpers
//! built on top of a [`Backend`].

pub mod backend;
pub mod hash;
pub mod node;
pub mod proof;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use backend::{Backend, BackendError, Deadline};
pub use hash::{Hash, HashError, Q};
pub use node::{Node, NodeError, NodeKind};
pub use proof::{generate_proof, reconstruct_root, NodeAux, NodeHasher, Proof, ProofError, MAX_DEPTH};
