//! `reelguard-server` entry point.
//!
//! Filtering reverse proxy for an upstream media catalog: annotates items
//! with a sensitivity level scraped from a content-advisory source and
//! suppresses anything above the configured threshold or carrying a
//! blocked certification.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use reelguard_core::{ReelguardConfig, SensitivityStore};
use reelguard_server::{App, spawn_workers};

#[derive(Debug, Parser)]
#[command(name = "reelguard-server", version, about)]
struct Cli {
    /// Path to reelguard.toml (defaults to REELGUARD_CONFIG or
    /// ~/.config/reelguard/reelguard.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => ReelguardConfig::load_from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ReelguardConfig::load().context("loading config")?,
    };
    if let Some(bind) = cli.bind {
        cfg.bind_addr = bind;
    }

    // Store lifecycle: opened once at startup, shared by reference, closed
    // on shutdown when the last handle drops.
    let db_path = cfg.resolved_db_path();
    let store = Arc::new(
        SensitivityStore::connect_and_init_at_path(&db_path)
            .with_context(|| format!("initializing store at {}", db_path.display()))?,
    );

    let app = Arc::new(App::from_config(&cfg, store).context("wiring service")?);

    let server = tiny_http::Server::http(&cfg.bind_addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", cfg.bind_addr))?;
    let server = Arc::new(server);

    tracing::info!(
        bind = %cfg.bind_addr,
        upstream = %cfg.upstream.base_url,
        threshold = %cfg.threshold(),
        workers = cfg.worker_threads,
        version = reelguard_core::VERSION,
        "reelguard listening"
    );

    let handles = spawn_workers(server, app, cfg.worker_threads);
    for handle in handles {
        // Workers only exit when the listener shuts down.
        let _ = handle.join();
    }

    Ok(())
}
