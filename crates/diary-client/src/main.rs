//! diary CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use diary_client::cli::{Cli, Command, ConfigAction};
use diary_client::commands::{self, Context};
use diary_client::config::DiaryConfig;
use diary_client::error::{ClientError, ClientResult};
use diary_core::tracing::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(DiaryConfig::default_path);

    let config = match load_config(&cli, &config_path) {
        Ok(config) => config,
        Err(e) => return report(&e),
    };

    let mut tracing_config = TracingConfig::cli(cli.debug || config.debug);
    if let Some(format) = config.log_format {
        tracing_config = tracing_config.with_format(format);
    }
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli, config, &config_path).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn load_config(cli: &Cli, path: &Path) -> ClientResult<DiaryConfig> {
    let mut config = match cli.config {
        Some(_) => DiaryConfig::load_from(path),
        None => DiaryConfig::load(),
    }
    .map_err(ClientError::Config)?;

    if let Some(ref store) = cli.store {
        config.store.path = Some(store.clone());
    }
    Ok(config)
}

fn report(error: &ClientError) -> ExitCode {
    eprintln!("error: {}", error);
    if let Some(hint) = error.hint() {
        eprintln!("hint: {}", hint);
    }
    ExitCode::FAILURE
}

async fn run(cli: Cli, config: DiaryConfig, config_path: &Path) -> ClientResult<String> {
    let ctx = Context::from_config(&config, cli.json, Utc::now());

    match cli.command {
        None => commands::view::week(&ctx, None).await,
        Some(Command::Week { start }) => commands::view::week(&ctx, start).await,
        Some(Command::Day { date }) => commands::view::day(&ctx, date).await,
        Some(Command::Agenda { start }) => commands::view::agenda(&ctx, start).await,
        Some(Command::Import { start }) => commands::view::import(&ctx, start).await,
        Some(Command::Add(args)) => commands::add::add(&ctx, &args.into()).await,
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config, config_path),
        },
    }
}
