//! Atlas - main entry point.
//!
//! Loads configuration, creates the RuntimeBackend, and runs the
//! interactive browser on stdin/stdout.

use std::sync::Arc;

use atlas_core::{load_config, AppConfig};
use atlas_engine::QueryEngine;
use atlas_fetch::fetcher_from_config;
use atlas_ui::{run_browser, CliArgs, RuntimeBackend, HELP};
use clap::Parser;
use tokio::io::BufReader;

// =============================================================================
// Initialization
// =============================================================================

/// Load config.toml and apply command-line overrides.
fn load_settings(args: &CliArgs) -> Result<AppConfig, String> {
    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) if args.config.is_some() => return Err(format!("Failed to load config: {}", e)),
        Err(e) => {
            tracing::warn!("Config unavailable: {} - using defaults", e);
            AppConfig::default()
        }
    };
    args.apply(&mut config);
    Ok(config)
}

/// Create the backend.
///
/// This sets up:
/// 1. Fetcher - HTTP or local file, per config
/// 2. QueryEngine - owns the dataset and query
/// 3. RuntimeBackend - async interface for the frontend
fn create_backend(config: &AppConfig) -> Result<Arc<RuntimeBackend>, String> {
    let fetcher = fetcher_from_config(&config.source)
        .map_err(|e| format!("Failed to create fetcher: {}", e))?;

    let engine = Arc::new(QueryEngine::new());
    tracing::info!("Query engine created");

    Ok(Arc::new(RuntimeBackend::new(engine, fetcher)))
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Logs go to stderr so the rendered list owns stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = CliArgs::parse();

    let config = match load_settings(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    let guard = rt.enter();

    let backend = match create_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!("Failed to create backend: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}\n", HELP);
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    let result = rt.block_on(run_browser(backend, &config.display, stdin, stdout));

    // A blocked stdin read would otherwise hold shutdown open
    drop(guard);
    rt.shutdown_background();

    if let Err(e) = result {
        tracing::error!("IO error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
