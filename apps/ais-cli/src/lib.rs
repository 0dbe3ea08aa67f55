use std::path::PathBuf;
use std::sync::Arc;

use ais_core::AisCore;
use ais_core::config::ConfigParsingError;
use ais_core::config::core_config::AppConfig;
use ais_core::model::batch::{SigningBatch, SigningMode};
use ais_core::model::outcome::{OutcomeKind, SigningOutcome};
use ais_core::provider::http_client::reqwest_client::ReqwestClient;
use ais_core::provider::user_interaction::UserInteraction;
use ais_core::service::signing::error::SigningServiceError;
use ais_crypto::HasherError;
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

pub mod console;
pub mod document;
pub mod transport;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration files, merged in order
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: Vec<PathBuf>,

    /// static, ondemand, ondemand-stepup, timestamp or etsi
    #[arg(short = 't', long = "type", value_name = "MODE")]
    pub mode: SigningMode,

    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: Vec<PathBuf>,

    /// Where signatures and timestamp tokens are written
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    pub trace_level: Option<String>,
    pub trace_json: Option<bool>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigParsingError),
    #[error("Cannot access `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Several inputs map to output `{}`", .0.display())]
    OutputCollision(PathBuf),
    #[error("HTTP client setup failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Digest computation failed: {0}")]
    Digest(#[from] HasherError),
    #[error(transparent)]
    Signing(#[from] SigningServiceError),
}

/// Signs every input file and writes the results to the output directory, if any
pub async fn run(
    cli: &Cli,
    config: AppConfig<CliConfig>,
    user_interaction: Arc<dyn UserInteraction>,
) -> Result<Vec<SigningOutcome>, CliError> {
    let http_client = transport::build_http_client(&config.core.service)?;
    let signature_config = config.core.signature.clone();

    let documents = document::load_digests(&cli.input, signature_config.digest_algorithm).await?;
    let batch = SigningBatch::new(&documents, cli.mode, &signature_config);

    let core = AisCore::new(
        config.core,
        Arc::new(ReqwestClient::new(http_client)),
        user_interaction,
    );
    let outcomes = core.signing_service.sign(&batch).await?;

    if let Some(output_dir) = &cli.output_dir {
        for path in document::write_outputs(&outcomes, &cli.input, output_dir).await? {
            tracing::info!(path = %path.display(), "Output written");
        }
    }

    Ok(outcomes)
}

/// First non-successful kind, `SUCCESS` when every document was signed
pub fn final_result(outcomes: &[SigningOutcome]) -> OutcomeKind {
    outcomes
        .iter()
        .map(SigningOutcome::kind)
        .find(|kind| *kind != OutcomeKind::Success)
        .unwrap_or(OutcomeKind::Success)
}
