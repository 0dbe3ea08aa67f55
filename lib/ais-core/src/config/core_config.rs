use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use figment::providers::{Data, Format};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

use super::ConfigParsingError;
use crate::model::document::DigestAlgorithm;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoCustomConfig;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppCustomConfigSerdeDTO<Custom> {
    #[serde(default)]
    app: Custom,
}

#[derive(Debug, Clone)]
pub struct AppConfig<Custom> {
    pub core: CoreConfig,
    pub app: Custom,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    pub service: ServiceConfig,
    pub signature: SignatureConfig,
    #[serde(default)]
    pub etsi: Option<EtsiConfig>,
}

/// DSS endpoints and transport budgets
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub sign_url: String,
    pub pending_url: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_poll_interval")]
    pub poll_interval: Duration,
    #[serde(default = "default_poll_rounds")]
    pub poll_rounds: u32,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,
    #[serde(default)]
    pub client_certificate: Option<PathBuf>,
    #[serde(default)]
    pub client_key: Option<PathBuf>,
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_poll_rounds() -> u32 {
    10
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureConfig {
    #[serde(default = "default_profile")]
    pub profile: String,
    pub claimed_identity_name: String,
    #[serde(default)]
    pub claimed_identity_key: Option<String>,
    #[serde(default)]
    pub distinguished_name: Option<String>,
    #[serde(default)]
    pub step_up: Option<StepUpConfig>,
    #[serde(default)]
    pub digest_algorithm: DigestAlgorithm,
    #[serde(default = "default_add_timestamp")]
    pub add_timestamp: bool,
    #[serde(default)]
    pub add_revocation_information: Option<String>,
    #[serde(default)]
    pub signature_standard: Option<String>,
}

fn default_profile() -> String {
    "http://ais.swisscom.ch/1.1".to_string()
}

fn default_add_timestamp() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpConfig {
    pub msisdn: String,
    pub message: String,
    pub language: String,
    #[serde(default)]
    pub serial_number: Option<String>,
}

/// Interactive (ETSI) signing: authorization server, token endpoint and
/// remote signing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtsiConfig {
    pub authorize_url: String,
    pub token_url: String,
    pub sign_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    pub credential_id: String,
    #[serde(default)]
    pub hash_algorithm_oid: Option<String>,
    pub profile: String,
    pub signature_format: String,
    pub conformance_level: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub nonce: Option<String>,
}

fn default_scope() -> String {
    "sign".to_string()
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    #[cfg(feature = "config_yaml")]
    pub fn yaml_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Yaml(Yaml::file(p))
    }

    #[cfg(feature = "config_yaml")]
    pub fn yaml_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Yaml(Yaml::string(s.as_ref()))
    }

    #[cfg(feature = "config_json")]
    pub fn json_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Json(Json::file(p))
    }

    #[cfg(feature = "config_json")]
    pub fn json_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Json(Json::string(s.as_ref()))
    }
}

impl<Custom> AppConfig<Custom>
where
    Custom: DeserializeOwned + Default,
{
    /// Merges the given files in order; `.yml`/`.yaml` and `.json` are recognised
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            let path = path.as_ref();

            #[cfg(feature = "config_yaml")]
            if path
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
            {
                inputs.push(InputFormat::yaml_file(path));
                continue;
            }

            #[cfg(feature = "config_json")]
            if path.extension().is_some_and(|ext| ext == "json") {
                inputs.push(InputFormat::json_file(path));
                continue;
            }

            return Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported file or missing file extension: {}",
                path.display()
            )));
        }

        AppConfig::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        AppConfig::parse(configs.into_iter().map(InputFormat::yaml_str))
    }

    pub fn parse(
        inputs: impl IntoIterator<Item = InputFormat>,
    ) -> Result<Self, ConfigParsingError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("AIS_").split("__").lowercase(false));
        }

        let core = figment
            .extract_inner::<CoreConfig>("core")
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;
        let custom = figment
            .extract::<AppCustomConfigSerdeDTO<Custom>>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;

        Ok(Self {
            core,
            app: custom.app,
        })
    }
}
