//! The person in front of the client: supplies the authorization code for
//! interactive signing and gets told where to confirm a step-up request.

use thiserror::Error;
use url::Url;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait UserInteraction: Send + Sync {
    /// Presents the authorization URL and waits for the code obtained from it
    async fn authorization_code(&self, authorization_url: &Url)
    -> Result<String, UserInteractionError>;

    /// Called when the service reports a consent URL for a deferred step-up request
    async fn consent_url(&self, consent_url: &str);
}

#[derive(Debug, Error)]
pub enum UserInteractionError {
    #[error("No authorization code entered")]
    NoCode,
    #[error("User interaction failed: `{0}`")]
    Failed(String),
}
