use strum::Display;
use thiserror::Error;

/// Remote call during which a communication failure occurred
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq)]
pub enum Operation {
    GetToken,
    Sign,
    SignEtsi,
    PollPending,
}

/// Failures that abort the whole batch. Per-document results are never errors.
#[derive(Debug, Error)]
pub enum SigningServiceError {
    #[error("Communication failure for {operation} - {correlation_id}: {cause:#}")]
    CommunicationFailure {
        operation: Operation,
        correlation_id: String,
        cause: anyhow::Error,
    },

    #[error("Authorization failed - {correlation_id}: {reason}")]
    AuthorizationFailed {
        correlation_id: String,
        reason: String,
    },

    #[error(
        "Incomplete response: expected {expected} signatures, received {received} - {correlation_id}"
    )]
    ResponseIncomplete {
        expected: usize,
        received: usize,
        correlation_id: String,
    },

    #[error("No final response after {attempts} polling attempts - {correlation_id}")]
    PollingTimeout { attempts: u32, correlation_id: String },

    #[error("Malformed response - {correlation_id}: {reason}")]
    MalformedResponse {
        reason: String,
        correlation_id: String,
    },

    #[error("Invalid signing batch: {0}")]
    InvalidBatch(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),
}
