use std::sync::Arc;

use config::core_config::CoreConfig;
use provider::http_client::HttpClient;
use provider::signing_service_client::SigningServiceClient;
use provider::signing_service_client::http_client::HTTPSigningServiceClient;
use provider::user_interaction::UserInteraction;
use service::signing::SigningService;
use service::signing::polling::PollingPolicy;
use util::clock::{Clock, DefaultClock};
use util::oauth_client::OAuthClient;
use util::random::{DefaultRandomProvider, RandomProvider};

pub mod config;
pub mod model;
pub mod provider;
pub mod service;
pub mod util;

pub struct AisCore {
    pub signing_service: SigningService,
}

impl AisCore {
    pub fn new(
        config: CoreConfig,
        http_client: Arc<dyn HttpClient>,
        user_interaction: Arc<dyn UserInteraction>,
    ) -> Self {
        Self::with_providers(
            config,
            http_client,
            user_interaction,
            Arc::new(DefaultClock),
            Arc::new(DefaultRandomProvider),
        )
    }

    pub fn with_providers(
        config: CoreConfig,
        http_client: Arc<dyn HttpClient>,
        user_interaction: Arc<dyn UserInteraction>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomProvider>,
    ) -> Self {
        let client: Arc<dyn SigningServiceClient> = Arc::new(HTTPSigningServiceClient::new(
            http_client.clone(),
            config.service.sign_url.to_owned(),
            config.service.pending_url.to_owned(),
            config.etsi.as_ref().map(|etsi| etsi.sign_url.to_owned()),
        ));
        let oauth_client = OAuthClient::new(http_client, random.clone(), user_interaction.clone());

        let polling = PollingPolicy {
            interval: config.service.poll_interval,
            max_attempts: config.service.poll_rounds,
        };

        Self {
            signing_service: SigningService::new(
                client,
                oauth_client,
                user_interaction,
                clock,
                random,
                polling,
                config.signature,
                config.etsi,
            ),
        }
    }
}
