//! Merkle Proof Service
//!
//! Serves precomputed Merkle proofs by wallet address from a static JSON file.

mod api;
mod state;

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use proof_table::{ProofIndex, ProofTable};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "proof-service")]
#[command(about = "Serve precomputed Merkle proofs by wallet address")]
struct Args {
    /// Proof table JSON file
    #[arg(long, env = "DATA_FILE", default_value = "data.json")]
    data_file: PathBuf,

    /// API listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    listen: String,

    /// Prometheus metrics listen address (disabled when unset)
    #[arg(long, env = "METRICS_LISTEN")]
    metrics_listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    tracing::info!("Starting proof service");
    tracing::info!(data_file = %args.data_file.display(), "Proof table");

    // Load failures are fatal
    let table = match ProofTable::load(&args.data_file) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load proof table");
            return Err(e.into());
        }
    };

    let index = ProofIndex::new(table);
    if index.duplicate_count() > 0 {
        tracing::warn!(
            duplicates = index.duplicate_count(),
            "Duplicate addresses in proof table, first entry wins"
        );
    }
    tracing::info!(
        root_hash = %index.root_hash(),
        wallets = index.wallet_count(),
        addresses = index.address_count(),
        "Loaded proof table"
    );

    if let Some(addr) = args.metrics_listen {
        PrometheusBuilder::new().with_http_listener(addr).install()?;
        tracing::info!(listen = %addr, "Metrics exporter");
        record_table_metrics(&index);
    }

    let app_state = state::AppState::new(index);

    // Start API server
    let api_handle = tokio::spawn(api::run_server(args.listen.clone(), app_state));

    // Wait for shutdown
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal");
        }
        result = api_handle => {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "API server error");
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, "API server task failed");
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}

/// Publish proof table gauges to the installed recorder
fn record_table_metrics(index: &ProofIndex) {
    #[allow(clippy::cast_precision_loss)]
    let wallets = index.wallet_count() as f64;
    metrics::gauge!("proof_table_wallets").set(wallets);
}
