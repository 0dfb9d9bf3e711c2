use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use carbon_app::application::services::{ConfigService, LogLevel};
use carbon_app::presentation::bootstrap::{build_app_state, BootstrapOptions};
use carbon_app::presentation::cli::{Cli, Command, ConfigAction, GlobalArgs};
use carbon_app::presentation::commands;
use carbon_app::presentation::error::CommandError;
use carbon_app::presentation::output::{self, Render};
use carbon_infrastructure::config::{parse_api_base_url, TrackerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = err.code, recoverable = err.recoverable, "{}", err.message);
            eprintln!(
                "{}",
                serde_json::to_string(&err).unwrap_or_else(|_| err.to_string())
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let json = cli.global.json;
    let mut config = resolve_config(&cli.global)?;

    let config_service = Arc::new(ConfigService::new(&config.data_dir)?);
    config_service.apply_to(&mut config)?;
    if let Some(url) = &cli.global.api_url {
        config.api_base_url = Some(parse_api_base_url(url)?);
    }

    init_logging(&config.log_dir, config_service.get_log_level());
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        settings = %config_service.config_path().display(),
        offline = config.is_offline() || cli.global.offline,
        "Configuration resolved"
    );

    // Settings commands need no storage or network
    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => emit(&commands::config_show(&config, &config_service), json),
            ConfigAction::SetLogLevel { level } => {
                emit(&commands::set_log_level(&config_service, *level)?, json)
            }
            ConfigAction::SetApiUrl { url, clear } => {
                let url = if *clear { None } else { url.as_deref() };
                emit(&commands::set_api_url(&config_service, url)?, json)
            }
        };
    }

    let options = BootstrapOptions {
        offline: cli.global.offline,
        ephemeral: cli.global.ephemeral,
    };
    let state = build_app_state(config, config_service, options).await?;

    match cli.command {
        Command::Calculate { input } => {
            let input = commands::read_input(&input)?;
            emit(&commands::calculate(&state, input).await?, json)
        }
        Command::History { limit } => emit(&commands::history(&state, limit).await?, json),
        Command::Leaderboard { limit } => {
            emit(&commands::leaderboard(&state, limit).await?, json)
        }
        Command::Dashboard => emit(&commands::dashboard(&state).await?, json),
        Command::Login {
            user_id,
            display_name,
            token,
        } => emit(
            &commands::login(&state, &user_id, display_name, token).await?,
            json,
        ),
        Command::Logout => emit(&commands::logout(&state).await?, json),
        Command::Whoami => emit(&commands::whoami(&state).await?, json),
        Command::Config { .. } => Ok(()),
    }
}

/// Environment first, then command-line overrides
fn resolve_config(global: &GlobalArgs) -> Result<TrackerConfig, CommandError> {
    let mut config = TrackerConfig::from_env()?;

    if let Some(dir) = &global.data_dir {
        let logs_follow_data = config.log_dir == config.data_dir.join("logs");
        config.data_dir = dir.clone();
        if logs_follow_data {
            config.log_dir = dir.join("logs");
        }
    }

    Ok(config)
}

fn emit<T: Serialize + Render>(value: &T, json: bool) -> Result<(), CommandError> {
    output::print(value, json).map_err(|e| CommandError::infrastructure(e.to_string()))
}

fn init_logging(log_dir: &Path, level: LogLevel) {
    let directive = level.filter_directive();

    if let Err(e) = carbon_infrastructure::logging::init_logger(log_dir, &directive) {
        eprintln!("Failed to initialize file logging: {}", e);
        eprintln!("Falling back to console logging only");

        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&directive)),
            )
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .try_init();
    }
}
