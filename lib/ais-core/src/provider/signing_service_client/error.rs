use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningServiceClientError {
    #[error("Transport error: `{0:#}`")]
    Transport(anyhow::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
