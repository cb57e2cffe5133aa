//! # centralpain CLI Module
//!
//! This module implements the CLI interface for centralpain.
//!
//! ## Available Commands
//!
//! - `evaluate` - Evaluate criteria given as flags or a JSON file
//! - `assess` - Interactive assessment form
//! - `criteria` - List the diagnostic criteria
//! - `catalog` - List every recommendation bundle
//! - `server` - Start the HTTP server

mod commands;

use crate::config::AppConfig;
use centralpain_core::AssessmentError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Central Pain Criteria Assessment Tool
///
/// Evaluates whether pain following a peripheral nerve injury meets the
/// criteria for centralized pain. A supplement to, not a replacement for,
/// clinical judgment.
#[derive(Parser, Debug)]
#[command(name = "centralpain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file (default: ./centralpain.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Criteria supplied on the command line. Unset flags stay unset.
#[derive(Args, Debug, Clone, Default)]
pub struct CriteriaArgs {
    /// Documented peripheral nerve injury/compression (yes/no)
    #[arg(long)]
    pub injury: Option<String>,

    /// Neuropathic pain for 3 months or longer (yes/no)
    #[arg(long)]
    pub chronic_pain: Option<String>,

    /// Hyperalgesia/allodynia beyond the injury zone (yes/no)
    #[arg(long)]
    pub hypersensitivity: Option<String>,

    /// Associated mood/cognitive disturbances (yes/no)
    #[arg(long)]
    pub mood_cognitive: Option<String>,

    /// Peripheral nerve block performed (yes/no)
    #[arg(long)]
    pub block_performed: Option<String>,

    /// Response to the nerve block: limited (<50% reduction) or good (>=50%)
    #[arg(long)]
    pub block_response: Option<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a criteria set
    Evaluate {
        /// JSON file with the criteria ("-" reads stdin); flags override its values
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Fill in the assessment form interactively
    Assess,

    /// List the diagnostic criteria
    Criteria,

    /// List every recommendation bundle
    Catalog,

    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli, config: AppConfig) -> Result<(), AssessmentError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Evaluate { file, criteria }) => {
            cmd_evaluate(json_mode, file.as_deref(), &criteria)
        }
        Some(Commands::Assess) => cmd_assess(json_mode),
        Some(Commands::Criteria) => cmd_criteria(json_mode),
        Some(Commands::Catalog) => cmd_catalog(json_mode),
        Some(Commands::Server { host, port }) => {
            let mut server = config.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            cmd_server(&server).await
        }
        None => {
            // No subcommand - show the criteria by default
            cmd_criteria(json_mode)
        }
    }
}
