pub mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use stockroom_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use stockroom_store::FileStore;

use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    about = "Interactive single-user inventory tracker",
    long_about = "Track products in a flat-file catalog through an interactive menu: \
                  add, view, search, update, delete, and adjust stock levels.",
    after_help = "Examples:\n  stockroom\n  stockroom --data-file /var/lib/stockroom/data.json\n  stockroom --low-stock-threshold 10"
)]
pub struct Cli {
    #[arg(long, value_name = "PATH", help = "Read configuration from this file only")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Catalog data file (overrides config)")]
    data_file: Option<PathBuf>,
    #[arg(long, value_name = "QTY", help = "Warn about products at or below this quantity")]
    low_stock_threshold: Option<u32>,
    #[arg(long, value_name = "LEVEL", help = "Log level: trace|debug|info|warn|error")]
    log_level: Option<String>,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides {
            data_file: cli.data_file,
            low_stock_threshold: cli.low_stock_threshold,
            log_level: cli.log_level,
        },
    }) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match start_session(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn start_session(config: AppConfig) -> anyhow::Result<()> {
    let store = FileStore::new(&config.storage.data_file);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(config, store, stdin.lock(), stdout.lock());
    session.run().context("console i/o failed")
}

fn init_logging(config: &AppConfig) {
    use stockroom_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(io::stderr)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(io::stderr)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(io::stderr)
                .json()
                .init();
        }
    }
}
