use ais_core::config::core_config::ServiceConfig;

use crate::CliError;

/// reqwest client with the configured timeouts and, when both PEM files are
/// set, a client identity for mutual TLS
pub fn build_http_client(config: &ServiceConfig) -> Result<reqwest::Client, CliError> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout);

    match (&config.client_certificate, &config.client_key) {
        (Some(certificate), Some(key)) => {
            let read = |path: &std::path::PathBuf| {
                std::fs::read(path).map_err(|source| CliError::Io {
                    path: path.to_owned(),
                    source,
                })
            };
            let identity = reqwest::Identity::from_pkcs8_pem(&read(certificate)?, &read(key)?)?;
            builder = builder.identity(identity);
            tracing::debug!(certificate = %certificate.display(), "Client identity loaded");
        }
        (None, None) => {}
        _ => {
            tracing::warn!("Client certificate and key must be configured together, ignoring");
        }
    }

    Ok(builder.build()?)
}
