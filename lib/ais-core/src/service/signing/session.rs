use std::sync::Arc;

use strum::Display;
use time::OffsetDateTime;

use crate::provider::signing_service_client::dto::PendingHandle;
use crate::util::random::RandomProvider;

#[derive(Debug, Copy, Clone, Display, PartialEq, Eq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Init,
    Authorizing,
    Submitting,
    Pending,
    Polling,
    Complete,
    Done,
    Failed,
}

impl SessionPhase {
    pub fn can_transition_to(&self, next: SessionPhase) -> bool {
        use SessionPhase::*;

        matches!(
            (self, next),
            (Init, Authorizing)
                | (Init | Authorizing, Submitting)
                | (Submitting, Complete | Pending)
                | (Pending, Polling)
                | (Polling, Complete)
                | (Complete, Done)
        ) || (next == Failed && *self != Failed)
    }
}

/// Mutable state of one batch. Owned by a single `sign` call.
pub(crate) struct SigningSession {
    phase: SessionPhase,
    correlation_id: String,
    attempts: u32,
    pending: Option<PendingHandle>,
    started_at: OffsetDateTime,
    random: Arc<dyn RandomProvider>,
}

impl SigningSession {
    pub(crate) fn new(random: Arc<dyn RandomProvider>, started_at: OffsetDateTime) -> Self {
        Self {
            phase: SessionPhase::Init,
            correlation_id: random.correlation_id(),
            attempts: 0,
            pending: None,
            started_at,
            random,
        }
    }

    pub(crate) fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub(crate) fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Every submission and poll runs under a fresh id
    pub(crate) fn renew_correlation_id(&mut self) -> &str {
        self.correlation_id = self.random.correlation_id();
        &self.correlation_id
    }

    pub(crate) fn advance(&mut self, next: SessionPhase) {
        if !self.phase.can_transition_to(next) {
            tracing::warn!(from = %self.phase, to = %next, correlation_id = %self.correlation_id, "Unexpected session transition");
        }
        tracing::debug!(from = %self.phase, to = %next, correlation_id = %self.correlation_id, "Session transition");
        self.phase = next;
    }

    pub(crate) fn set_pending(&mut self, handle: PendingHandle) {
        tracing::info!(response_id = %handle.response_id, correlation_id = %self.correlation_id, "Request accepted for asynchronous processing");
        self.pending = Some(handle);
        self.advance(SessionPhase::Pending);
    }

    /// Replaces the handle when a poll answers with a still pending response
    pub(crate) fn refresh_pending(&mut self, handle: PendingHandle) {
        if self
            .pending
            .as_ref()
            .is_some_and(|current| current.response_id != handle.response_id)
        {
            tracing::debug!(response_id = %handle.response_id, correlation_id = %self.correlation_id, "Response id changed");
        }
        self.pending = Some(handle);
    }

    pub(crate) fn pending(&self) -> Option<&PendingHandle> {
        self.pending.as_ref()
    }

    pub(crate) fn record_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    pub(crate) fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }
}
