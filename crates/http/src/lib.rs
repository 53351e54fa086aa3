//! HTTP transport for the reverse hash service client. Wire paths are
//! always normalised: node lookups go through `/node/{hex}` regardless of
//! how the base URL is spelled.

mod client;
mod wire;

pub use client::{HttpBackend, HttpBackendBuilder, HttpError};
