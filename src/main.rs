use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::exit;

use pool_monitor_bot::app;
use pool_monitor_bot::config::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Account file; defaults to POOL_MONITOR_CONFIG or ./config.json
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 1. Parse command line arguments and setup logging
    let args = Args::parse();
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();

    let mut settings = Settings::from_env();
    if let Some(path) = args.config {
        settings.config_file = path;
    }

    exit(app::run(&settings).await.code());
}
