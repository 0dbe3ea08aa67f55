use std::sync::Arc;

use polling::PollingPolicy;

use crate::config::core_config::{EtsiConfig, SignatureConfig};
use crate::provider::signing_service_client::SigningServiceClient;
use crate::provider::user_interaction::UserInteraction;
use crate::util::clock::Clock;
use crate::util::oauth_client::OAuthClient;
use crate::util::random::RandomProvider;

pub mod classifier;
pub mod error;
mod mapper;
pub mod polling;
pub mod service;
mod session;

pub struct SigningService {
    client: Arc<dyn SigningServiceClient>,
    oauth_client: OAuthClient,
    user_interaction: Arc<dyn UserInteraction>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomProvider>,
    polling: PollingPolicy,
    signature_config: SignatureConfig,
    etsi_config: Option<EtsiConfig>,
}

impl SigningService {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        client: Arc<dyn SigningServiceClient>,
        oauth_client: OAuthClient,
        user_interaction: Arc<dyn UserInteraction>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomProvider>,
        polling: PollingPolicy,
        signature_config: SignatureConfig,
        etsi_config: Option<EtsiConfig>,
    ) -> Self {
        Self {
            client,
            oauth_client,
            user_interaction,
            clock,
            random,
            polling,
            signature_config,
            etsi_config,
        }
    }
}
