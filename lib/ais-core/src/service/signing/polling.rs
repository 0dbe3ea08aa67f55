use std::time::Duration;

use super::error::{Operation, SigningServiceError};
use super::mapper::client_error;
use super::session::{SessionPhase, SigningSession};
use crate::provider::signing_service_client::SigningServiceClient;
use crate::provider::signing_service_client::dto::{PendingRequest, ServiceResponse};
use crate::util::clock::Clock;

/// Fixed cadence, no backoff
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PollingPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

/// Polls the pending endpoint until the response is no longer pending.
///
/// The first poll is sent immediately, later ones after `interval`. Transport
/// errors are not retried.
pub(crate) async fn poll_until_done(
    client: &dyn SigningServiceClient,
    clock: &dyn Clock,
    session: &mut SigningSession,
    request: PendingRequest,
    policy: PollingPolicy,
) -> Result<ServiceResponse, SigningServiceError> {
    session.advance(SessionPhase::Polling);
    let mut request = request;

    while session.attempts() < policy.max_attempts {
        if session.attempts() > 0 {
            clock.sleep(policy.interval).await;
        }
        let attempt = session.record_attempt();
        session.renew_correlation_id();
        tracing::debug!(attempt, correlation_id = %session.correlation_id(), "Polling pending request");

        let response = client
            .poll_pending(request.clone())
            .await
            .map_err(|error| client_error(error, Operation::PollPending, session.correlation_id()))?;

        match response {
            ServiceResponse::Pending(handle) => {
                request.response_id.clone_from(&handle.response_id);
                session.refresh_pending(handle);
            }
            terminal => {
                tracing::info!(attempt, "Pending request completed");
                return Ok(terminal);
            }
        }
    }

    tracing::warn!(attempts = policy.max_attempts, "Polling budget exhausted");
    Err(SigningServiceError::PollingTimeout {
        attempts: policy.max_attempts,
        correlation_id: session.correlation_id().to_owned(),
    })
}
