use clap::Parser;
use log::warn;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use zoid::core::config::{self, CliOverrides, ZoidConfig};
use zoid::tui;

#[derive(Parser)]
#[command(name = "zoid", version, about = "Terminal chat client for a local text-generation backend")]
struct Args {
    /// Backend base URL (e.g. http://127.0.0.1:5000)
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds between health probes
    #[arg(long, value_name = "SECS")]
    health_interval: Option<u64>,

    /// Where to write the debug log
    #[arg(long, default_value = "zoid.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Zoid {} starting up", env!("CARGO_PKG_VERSION"));

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        ZoidConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        health_interval_secs: args.health_interval,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!(
        "Backend {} (health every {:?})",
        resolved.base_url,
        resolved.health_interval
    );

    tui::run(resolved)
}
