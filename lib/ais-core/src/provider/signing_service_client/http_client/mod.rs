use std::sync::Arc;

use crate::provider::http_client::HttpClient;

mod dto;
mod mapper;
mod provider;

#[cfg(test)]
mod test;

/// DSS JSON binding over [`HttpClient`]
pub struct HTTPSigningServiceClient {
    http_client: Arc<dyn HttpClient>,
    sign_url: String,
    pending_url: String,
    etsi_sign_url: Option<String>,
}

impl HTTPSigningServiceClient {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        sign_url: String,
        pending_url: String,
        etsi_sign_url: Option<String>,
    ) -> Self {
        Self {
            http_client,
            sign_url,
            pending_url,
            etsi_sign_url,
        }
    }
}
