pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use scentwise_core::config::{AppConfig, LoadOptions, LoggingConfig};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "scentwise",
    about = "Scentwise recommendation CLI",
    long_about = "Inspect configuration, check readiness, and query similar-scent, upsell, and personal candle recommendations.",
    after_help = "Examples:\n  scentwise doctor --json\n  scentwise similar lavender-fields --limit 3\n  scentwise recommend cust-cozy-nights"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, catalog loading, and scoring sanity checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List the products in the active catalog")]
    Catalog,
    #[command(about = "Rank products that smell most like the given product")]
    Similar {
        product_id: String,
        #[arg(long, help = "Maximum number of results (clamped to the configured maximum)")]
        limit: Option<usize>,
    },
    #[command(about = "Rank products that pair well with the given product")]
    Upsell {
        product_id: String,
        #[arg(long, help = "Maximum number of results (clamped to the configured maximum)")]
        limit: Option<usize>,
    },
    #[command(about = "Rank products against a customer's stored scent preferences")]
    Recommend {
        customer_id: String,
        #[arg(long, help = "Maximum number of results (clamped to the configured maximum)")]
        limit: Option<usize>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_else(|_| LoggingConfig::default());
    if let Err(error) = logging::init_logging(&logging) {
        eprintln!("{error:#}");
    }

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Catalog => commands::catalog::run(),
        Command::Similar { product_id, limit } => commands::similar::run(&product_id, limit),
        Command::Upsell { product_id, limit } => commands::upsell::run(&product_id, limit),
        Command::Recommend { customer_id, limit } => {
            commands::recommend::run(&customer_id, limit)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
