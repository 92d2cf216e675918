//! Bitsweb main entry point

use anyhow::Context;
use bitsweb_api::start_server;
use bitsweb_config::{default_config_path, Config};
use bitsweb_core::AppContext;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "bitsweb")]
#[command(version)]
#[command(about = "Web front end for the Bits transactions API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Hint: {}", e.suggestion());
            std::process::exit(2);
        }
    };

    init_logging(&config.logging.level);
    if args.config.exists() {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!("Default window: last {} month(s)", config.date_range.months_back);

    let context = Arc::new(AppContext::from_config(&config));
    let rt = Runtime::new().context("Failed to start the async runtime")?;
    rt.block_on(start_server(config, context))
        .context("Server exited with an error")?;

    Ok(())
}
