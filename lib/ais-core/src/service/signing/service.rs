use super::SigningService;
use super::error::{Operation, SigningServiceError};
use super::mapper::{
    authorization_error, client_error, demultiplex, etsi_sign_request, hash_algorithm_oid,
    pending_request, sign_request,
};
use super::polling::poll_until_done;
use super::session::{SessionPhase, SigningSession};
use crate::model::batch::{SigningBatch, SigningMode};
use crate::model::outcome::SigningOutcome;
use crate::provider::signing_service_client::dto::ServiceResponse;

impl SigningService {
    /// Signs (or timestamps) every document of the batch.
    ///
    /// Returns one outcome per document in submission order. Service-reported
    /// failures are outcomes, everything that leaves the batch without a
    /// trustworthy per-document answer is an error.
    pub async fn sign(
        &self,
        batch: &SigningBatch<'_>,
    ) -> Result<Vec<SigningOutcome>, SigningServiceError> {
        batch.validate().map_err(SigningServiceError::InvalidBatch)?;

        let mut session = SigningSession::new(self.random.clone(), self.clock.now_utc());
        tracing::info!(
            mode = %batch.mode,
            documents = batch.documents.len(),
            correlation_id = %session.correlation_id(),
            "Signing batch"
        );

        let result = match batch.mode {
            SigningMode::Interactive => self.sign_interactive(batch, &mut session).await,
            _ => self.sign_dss(batch, &mut session).await,
        };

        let elapsed = self.clock.now_utc() - session.started_at();
        match result {
            Ok(outcomes) => {
                session.advance(SessionPhase::Done);
                for outcome in &outcomes {
                    tracing::info!(document = %outcome.document_id, outcome = %outcome.kind(), "Document processed");
                }
                tracing::info!(%elapsed, "Batch finished");
                Ok(outcomes)
            }
            Err(error) => {
                let phase = session.phase();
                let response_id = session.pending().map(|handle| handle.response_id.as_str());
                tracing::warn!(%elapsed, %phase, ?response_id, "Batch failed: {error}");
                session.advance(SessionPhase::Failed);
                Err(error)
            }
        }
    }

    async fn sign_dss(
        &self,
        batch: &SigningBatch<'_>,
        session: &mut SigningSession,
    ) -> Result<Vec<SigningOutcome>, SigningServiceError> {
        session.advance(SessionPhase::Submitting);
        let request = sign_request(batch, &self.signature_config, session.correlation_id());

        let response = self
            .client
            .sign(request)
            .await
            .map_err(|error| client_error(error, Operation::Sign, session.correlation_id()))?;

        let response = match response {
            ServiceResponse::Pending(handle) => {
                if let Some(consent_url) = &handle.consent_url {
                    self.user_interaction.consent_url(consent_url).await;
                }
                let request = pending_request(batch, &handle.response_id);
                session.set_pending(handle);

                poll_until_done(
                    self.client.as_ref(),
                    self.clock.as_ref(),
                    session,
                    request,
                    self.polling,
                )
                .await?
            }
            response => response,
        };

        session.advance(SessionPhase::Complete);
        demultiplex(batch.documents, response, session.correlation_id())
    }

    async fn sign_interactive(
        &self,
        batch: &SigningBatch<'_>,
        session: &mut SigningSession,
    ) -> Result<Vec<SigningOutcome>, SigningServiceError> {
        let etsi = self
            .etsi_config
            .as_ref()
            .ok_or_else(|| SigningServiceError::MissingConfiguration("etsi".to_string()))?;
        let hash_algorithm_oid = hash_algorithm_oid(
            etsi,
            batch.documents,
            self.signature_config.digest_algorithm,
        );

        session.advance(SessionPhase::Authorizing);
        let token = self
            .oauth_client
            .authorize(etsi, batch.documents, &hash_algorithm_oid)
            .await
            .map_err(|error| authorization_error(error, session.correlation_id()))?;
        tracing::info!(correlation_id = %session.correlation_id(), "Signature activation data obtained");

        session.advance(SessionPhase::Submitting);
        session.renew_correlation_id();
        let request = etsi_sign_request(etsi, batch.documents, token, hash_algorithm_oid);

        let response = self
            .client
            .sign_etsi(request)
            .await
            .map_err(|error| client_error(error, Operation::SignEtsi, session.correlation_id()))?;

        session.advance(SessionPhase::Complete);
        demultiplex(batch.documents, response, session.correlation_id())
    }
}
