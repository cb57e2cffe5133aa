//! # centralpain - Central Pain Criteria Assessment Tool
//!
//! The main binary around the deterministic criteria evaluator.
//!
//! This application provides:
//! - CLI interface: one-shot evaluation and an interactive assessment form
//! - HTTP request/response boundary for embedding
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/centralpain (THE BINARY)         │
//! │                                                      │
//! │      ┌─────────────┐          ┌─────────────┐        │
//! │      │    CLI      │          │  HTTP API   │        │
//! │      │   (clap)    │          │   (axum)    │        │
//! │      └──────┬──────┘          └──────┬──────┘        │
//! │             └───────────┬────────────┘               │
//! │                         ▼                            │
//! │               ┌───────────────────┐                  │
//! │               │ centralpain-core  │                  │
//! │               │    (THE LOGIC)    │                  │
//! │               └───────────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! centralpain evaluate --injury yes --chronic-pain yes --hypersensitivity yes \
//!     --mood-cognitive no --block-performed no
//! centralpain evaluate -f criteria.json --json-mode
//! centralpain assess
//! centralpain server --port 8080
//! ```

use centralpain::cli;
use centralpain::config::{AppConfig, DEFAULT_LOG_FILTER, LogFormat, LoggingConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = AppConfig::load(cli.config.as_deref());
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging, cli.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let fallback = match (&logging.filter, verbose) {
        (_, true) => "centralpain=debug,tower_http=debug".to_string(),
        (Some(filter), false) => filter.clone(),
        (None, false) => DEFAULT_LOG_FILTER.to_string(),
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    // Logs go to stderr so stdout stays clean for results and JSON output.
    match logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Central Pain Criteria Assessment Tool v{}

  Centralized pain following peripheral nerve injury
  A supplement to, not a replacement for, clinical judgment.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
