use std::process::ExitCode;
use std::sync::Arc;

use ais_cli::console::ConsoleInteraction;
use ais_cli::{Cli, CliConfig, final_result, run};
use ais_core::config::core_config::AppConfig;
use ais_core::model::outcome::OutcomeKind;
use clap::Parser;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::<CliConfig>::from_files(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            initialize_tracing(&CliConfig::default());
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };
    initialize_tracing(&config.app);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!("Failed to start runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(&cli, config, Arc::new(ConsoleInteraction::stdin())));

    match result {
        Ok(outcomes) => {
            for (outcome, input) in outcomes.iter().zip(&cli.input) {
                println!("{}: {}", input.display(), outcome.kind());
            }
            let result = final_result(&outcomes);
            println!("Final result: {result}");

            if result == OutcomeKind::Success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            println!("{error}");
            println!("Final result: FAILED");
            ExitCode::FAILURE
        }
    }
}

fn initialize_tracing(config: &CliConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new(config.trace_level.as_deref().unwrap_or("warn"))
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.trace_json.unwrap_or_default() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
