use std::io;

use bookcal::storage::config::Config;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode, run_day_mode, run_month_mode, run_token_mode};
mod tui;
use tui::run_tui;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    setup_logging();

    let cli_args = match parse_cli_mode() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let mut config = match Config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            tracing::error!("Failed to load config: {}", e);
            return Ok(());
        }
    };
    cli_args.apply_overrides(&mut config);

    match cli_args.mode {
        CliMode::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliMode::MonthText(month) => run_month_mode(config, month).await,
        CliMode::DaySlots(date) => run_day_mode(config, date).await,
        CliMode::SaveToken(token) => run_token_mode(&config, token),
        CliMode::Interactive { month } => run_tui(config, month).await,
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "bookcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("bookcal started");
}
