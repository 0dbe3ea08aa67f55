//! Remote signing service: DSS sign and pending-status endpoints plus the
//! ETSI remote signing endpoint used by the interactive mode.

use dto::{EtsiSignRequest, PendingRequest, ServiceResponse, SignRequest};
use error::SigningServiceClientError;

pub mod dto;
pub mod error;
pub mod http_client;

/// Each call is a single attempt. Every response is decided once into
/// [`ServiceResponse::Complete`], [`ServiceResponse::Pending`] or [`ServiceResponse::Error`].
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait SigningServiceClient: Send + Sync {
    async fn sign(&self, request: SignRequest)
    -> Result<ServiceResponse, SigningServiceClientError>;

    async fn sign_etsi(
        &self,
        request: EtsiSignRequest,
    ) -> Result<ServiceResponse, SigningServiceClientError>;

    async fn poll_pending(
        &self,
        request: PendingRequest,
    ) -> Result<ServiceResponse, SigningServiceClientError>;
}
