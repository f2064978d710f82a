//! # Star Registry Node
//!
//! ## Startup Sequence
//!
//! 1. Install logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment
//! 3. Lock the data directory and open the ledger store
//! 4. Write genesis if the ledger is empty
//! 5. Audit the stored chain and report failing heights
//! 6. Run until Ctrl+C

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{NodeConfig, RuntimeServices, StarRegistryNode, SubsystemContainer};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Star Registry Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env().context("invalid node configuration")?;
    let services = RuntimeServices::production().context("runtime services unavailable")?;
    let container =
        SubsystemContainer::new(config, services).context("failed to initialize subsystems")?;
    let node = StarRegistryNode::new(container);

    let report = node.start().context("startup sequence failed")?;
    info!(
        "Genesis {} | height {}",
        report.genesis_hash, report.chain_height
    );
    if !report.is_healthy() {
        warn!(
            "Serving with {} corrupted block(s)",
            report.failing_heights.len()
        );
    }

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}
