use std::env;
use std::process::ExitCode;

use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use trading_config::{ConfigHandle, ConfigLoader, ConfigSource, TradingConfig};

const DEFAULT_CONFIG_PATH: &str = "configs/config.json";
const ENV_PREFIX: &str = "TRADING";

struct Args {
    config_paths: Vec<String>,
    show_config: bool,
    watch: bool,
    log_level: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_paths: Vec::new(),
        show_config: false,
        watch: false,
        log_level: None,
    };

    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            args.config_paths.push(path.to_string());
        } else if let Some(level) = arg.strip_prefix("--log-level=") {
            args.log_level = Some(level.to_string());
        } else if arg == "--show-config" {
            args.show_config = true;
        } else if arg == "--watch" {
            args.watch = true;
        } else {
            eprintln!("Ignoring unknown argument: {}", arg);
        }
    }

    if args.config_paths.is_empty() {
        args.config_paths.push(DEFAULT_CONFIG_PATH.to_string());
    }
    args
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = parse_args();
    init_tracing(args.log_level.as_deref());

    let sources = args.config_paths.iter().map(ConfigSource::file).collect();
    let loader = ConfigLoader::new().with_env_prefix(ENV_PREFIX);

    let handle = match ConfigHandle::load(loader, sources) {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let config = handle.current();
    log_summary(&config);

    if args.show_config {
        if let Err(e) = print_config(&config) {
            error!(error = %e, "Failed to render configuration");
            return ExitCode::FAILURE;
        }
    }

    if args.watch {
        watch(&handle).await;
    }

    ExitCode::SUCCESS
}

fn log_summary(config: &TradingConfig) {
    let pairs: Vec<String> = config.whitelist().iter().map(|p| p.to_string()).collect();
    info!(
        bot = %config.bot_name,
        exchange = %config.exchange.name,
        trading_mode = config.trading_mode.as_str(),
        dry_run = config.dry_run,
        stake_currency = %config.stake_currency,
        stake_amount = %config.stake_amount,
        max_open_trades = config.max_open_trades,
        pairs = ?pairs,
        "Configuration loaded"
    );
    if config.is_live() {
        warn!("Live trading is enabled, orders will be sent to the exchange");
    }
}

fn print_config(config: &TradingConfig) -> Result<(), serde_json::Error> {
    let rendered = serde_json::to_string_pretty(&config.redacted()?)?;
    println!("{}", rendered);
    Ok(())
}

/// Reloads the configuration on SIGHUP until Ctrl+C.
async fn watch(handle: &ConfigHandle) {
    info!("Watching for SIGHUP to reload configuration (press Ctrl+C to stop)...");

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "Failed to install SIGHUP handler");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                received = hangup.recv() => {
                    if received.is_none() {
                        break;
                    }
                    info!("SIGHUP received, reloading configuration");
                    // A failed reload is logged by the handle and the old config stays.
                    if let Ok(config) = handle.reload() {
                        log_summary(&config);
                    }
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = handle;
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("Stopped watching configuration");
}
