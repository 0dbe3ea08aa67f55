use anyhow::{Context, anyhow};

use super::HTTPSigningServiceClient;
use super::dto::{
    EtsiSignRequestRestDTO, EtsiSignResponseRestDTO, PendingRequestEnvelopeRestDTO,
    SignRequestEnvelopeRestDTO, SignResponseEnvelopeRestDTO,
};
use crate::provider::signing_service_client::SigningServiceClient;
use crate::provider::signing_service_client::dto::{
    EtsiSignRequest, PendingRequest, ServiceResponse, SignRequest,
};
use crate::provider::signing_service_client::error::SigningServiceClientError;

#[async_trait::async_trait]
impl SigningServiceClient for HTTPSigningServiceClient {
    async fn sign(
        &self,
        request: SignRequest,
    ) -> Result<ServiceResponse, SigningServiceClientError> {
        let response: SignResponseEnvelopeRestDTO = self
            .http_client
            .post(&self.sign_url)
            .json(SignRequestEnvelopeRestDTO::try_from(request)?)
            .context("json error")
            .map_err(SigningServiceClientError::Transport)?
            .send()
            .await
            .context("send error")
            .map_err(SigningServiceClientError::Transport)?
            .error_for_status()
            .context("status error")
            .map_err(SigningServiceClientError::Transport)?
            .json()
            .context("parsing error")
            .map_err(SigningServiceClientError::Transport)?;

        tracing::debug!(request_id = ?response.sign_response.request_id, "Sign response received");
        response.sign_response.try_into()
    }

    async fn sign_etsi(
        &self,
        request: EtsiSignRequest,
    ) -> Result<ServiceResponse, SigningServiceClientError> {
        let url = self
            .etsi_sign_url
            .as_deref()
            .ok_or_else(|| {
                SigningServiceClientError::Transport(anyhow!("ETSI sign endpoint not configured"))
            })?;

        let response: EtsiSignResponseRestDTO = self
            .http_client
            .post(url)
            .sensitive()
            .json(EtsiSignRequestRestDTO::try_from(request)?)
            .context("json error")
            .map_err(SigningServiceClientError::Transport)?
            .send()
            .await
            .context("send error")
            .map_err(SigningServiceClientError::Transport)?
            .error_for_status()
            .context("status error")
            .map_err(SigningServiceClientError::Transport)?
            .json()
            .context("parsing error")
            .map_err(SigningServiceClientError::Transport)?;

        response.try_into()
    }

    async fn poll_pending(
        &self,
        request: PendingRequest,
    ) -> Result<ServiceResponse, SigningServiceClientError> {
        let response: SignResponseEnvelopeRestDTO = self
            .http_client
            .post(&self.pending_url)
            .json(PendingRequestEnvelopeRestDTO::from(request))
            .context("json error")
            .map_err(SigningServiceClientError::Transport)?
            .send()
            .await
            .context("send error")
            .map_err(SigningServiceClientError::Transport)?
            .error_for_status()
            .context("status error")
            .map_err(SigningServiceClientError::Transport)?
            .json()
            .context("parsing error")
            .map_err(SigningServiceClientError::Transport)?;

        response.sign_response.try_into()
    }
}
