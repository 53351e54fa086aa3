//! Reads an entire tree back from an HTTP reverse hash service and
//! reports how many nodes it contains.
//!
//! ```text
//! RHS_URL=http://localhost:8080 RHS_ROOT=<hex> \
//!     cargo run --example walk_tree --features "http walker"
//! ```

use anyhow::{Context, Result};
use rhs_client::{collect_for_save, fetch_tree, Deadline, Hash, HttpBackend};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let base_url = std::env::var("RHS_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_owned());
    let backend = HttpBackend::new(base_url).context("building HTTP backend")?;

    let root_hex = std::env::var("RHS_ROOT").context("RHS_ROOT must be set")?;
    let root = Hash::from_hex(&root_hex).context("parsing RHS_ROOT")?;

    let tree = fetch_tree(&backend, &Deadline::none(), root)
        .await
        .context("walking tree")?;
    let nodes = collect_for_save(&tree);

    println!("read {} node(s) rooted at {root}", nodes.len());
    Ok(())
}
