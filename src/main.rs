//! Futures testnet trading bot - main entry point
//!
//! Loads configuration, sets up logging, connects to the exchange and hands
//! the terminal to the operator console.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use futures_testnet_bot::console::{self, ConsoleOptions, OperatorConsole, Theme};
use futures_testnet_bot::{Config, ExchangeGateway};

#[derive(Parser, Debug)]
#[command(name = "futures-testnet-bot")]
#[command(about = "Interactive futures trading console (testnet by default)", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trade on the production endpoint (CAUTION - REAL MONEY!)
    #[arg(long)]
    live: bool,

    /// Disable colored console output
    #[arg(long)]
    no_color: bool,

    /// Fetch and show the current price while entering an order
    #[arg(long)]
    price_preview: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool, log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_filename = format!(
        "trading_bot_{}.log",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = log_dir.join(&log_filename);

    // Filter out noisy external crates
    let level = if verbose { "debug" } else { "info" };
    let filter_str = format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn",
        level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let file_appender = tracing_appender::rolling::never(log_dir, &log_filename);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Log file: {}", log_path.display());
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.live {
        config.exchange.testnet = false;
    }
    if cli.no_color {
        config.console.color = false;
    }
    if cli.price_preview {
        config.console.price_preview = true;
    }

    setup_logging(cli.verbose, &config.logging.dir)?;
    if !config.exchange.testnet {
        warn!("LIVE mode selected: orders will be sent to {}", config.exchange.base_url());
    }

    let theme = Theme::from_flag(config.console.color);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let credentials = match config.exchange.credentials() {
        Some(creds) => {
            info!("Using API credentials from environment/config");
            creds
        }
        None => console::prompt_credentials(&mut input, &mut output, &theme)
            .context("Failed to read API credentials")?,
    };

    let gateway = match ExchangeGateway::connect(credentials, &config.exchange) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Startup failed: {}", e);
            writeln!(
                output,
                "{}",
                theme.failure.apply_to(format!("Failed to connect: {}", e))
            )?;
            std::process::exit(1);
        }
    };

    let options = ConsoleOptions {
        price_preview: config.console.price_preview,
        testnet: config.exchange.testnet,
    };
    let mut operator = OperatorConsole::new(gateway, input, output, theme, options);
    operator.run().context("Console terminated")?;

    info!("Session ended");
    Ok(())
}
