//! Fetches an inclusion or non-inclusion proof for a single key from an
//! HTTP reverse hash service and prints it as JSON.
//!
//! ```text
//! RHS_URL=http://localhost:8080 RHS_ROOT=<hex> RHS_KEY=<decimal> \
//!     cargo run --example generate_proof --features http
//! ```

use anyhow::{Context, Result};
use rhs_client::{generate_proof, Deadline, Hash, HttpBackend};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let base_url = std::env::var("RHS_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_owned());
    let backend = HttpBackend::new(base_url).context("building HTTP backend")?;

    let root_hex = std::env::var("RHS_ROOT").context("RHS_ROOT must be set")?;
    let root = Hash::from_hex(&root_hex).context("parsing RHS_ROOT")?;

    let key_decimal = std::env::var("RHS_KEY").context("RHS_KEY must be set")?;
    let key = Hash::from_decimal(&key_decimal).context("parsing RHS_KEY")?;

    let proof = generate_proof(&backend, &Deadline::none(), root, key)
        .await
        .context("generating proof")?;

    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(())
}
