use std::sync::Arc;

use ais_crypto::hasher::sha::SHA256;
use ais_crypto::{Hasher, HasherError};
use anyhow::Context;
use ct_codecs::{Base64, Encoder};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::core_config::EtsiConfig;
use crate::model::document::DocumentDigest;
use crate::provider::http_client::HttpClient;
use crate::provider::user_interaction::{UserInteraction, UserInteractionError};
use crate::util::random::RandomProvider;

// RFC 7636 allows 43 to 128 characters
const CODE_VERIFIER_LENGTH: usize = 64;
const STATE_LENGTH: usize = 32;

/// Authorization-code-with-PKCE client for the interactive signing mode.
///
/// The resulting [`AccessToken`] is the signature activation data of exactly one sign request.
pub(crate) struct OAuthClient {
    http_client: Arc<dyn HttpClient>,
    random: Arc<dyn RandomProvider>,
    user_interaction: Arc<dyn UserInteraction>,
}

impl OAuthClient {
    pub(crate) fn new(
        http_client: Arc<dyn HttpClient>,
        random: Arc<dyn RandomProvider>,
        user_interaction: Arc<dyn UserInteraction>,
    ) -> Self {
        Self {
            http_client,
            random,
            user_interaction,
        }
    }

    pub(crate) async fn authorize(
        &self,
        config: &EtsiConfig,
        documents: &[DocumentDigest],
        hash_algorithm_oid: &str,
    ) -> Result<AccessToken, OAuthClientError> {
        let context = self.prepare_authorization(config, documents, hash_algorithm_oid)?;
        tracing::debug!(state = %context.state, nonce = %context.nonce, "Authorization URL prepared");

        let code = self
            .user_interaction
            .authorization_code(&context.url)
            .await?;
        let code = code.trim();
        if code.is_empty() {
            return Err(OAuthClientError::CodeEntry(UserInteractionError::NoCode));
        }

        self.exchange_code(config, &context, code).await
    }

    pub(crate) fn prepare_authorization(
        &self,
        config: &EtsiConfig,
        documents: &[DocumentDigest],
        hash_algorithm_oid: &str,
    ) -> Result<AuthorizationContext, OAuthClientError> {
        let state = config
            .state
            .clone()
            .unwrap_or_else(|| self.random.alphanumeric(STATE_LENGTH));
        let nonce = config
            .nonce
            .clone()
            .unwrap_or_else(|| self.random.alphanumeric(STATE_LENGTH));
        let code_verifier = self.random.alphanumeric(CODE_VERIFIER_LENGTH);
        let code_challenge = code_challenge(&code_verifier)?;

        let claims = AuthorizationClaims {
            credential_id: &config.credential_id,
            hash_algorithm_oid,
            document_digests: documents
                .iter()
                .map(|document| -> Result<_, OAuthClientError> {
                    Ok(DocumentDigestClaim {
                        hash: Base64::encode_to_string(&document.value)
                            .map_err(|e| OAuthClientError::Encoding(e.to_string()))?,
                        label: &document.label,
                    })
                })
                .collect::<Result<_, OAuthClientError>>()?,
        };

        let request = AuthorizationRequest {
            response_type: "code",
            client_id: &config.client_id,
            scope: &config.scope,
            state: &state,
            nonce: &nonce,
            redirect_uri: &config.redirect_uri,
            code_challenge: &code_challenge,
            code_challenge_method: "S256",
            claims: serde_json::to_string(&claims)?,
        };

        let mut url = Url::parse(&config.authorize_url)
            .map_err(|e| OAuthClientError::InvalidUrl(e.to_string()))?;
        url.set_query(Some(&serde_urlencoded::to_string(request)?));

        Ok(AuthorizationContext {
            url,
            state,
            nonce,
            code_verifier: SecretString::from(code_verifier),
            redirect_uri: config.redirect_uri.to_owned(),
        })
    }

    pub(crate) async fn exchange_code(
        &self,
        config: &EtsiConfig,
        context: &AuthorizationContext,
        code: &str,
    ) -> Result<AccessToken, OAuthClientError> {
        let request = TokenRequest {
            grant_type: "authorization_code",
            client_id: &config.client_id,
            client_secret: config.client_secret.expose_secret(),
            code,
            code_verifier: context.code_verifier.expose_secret(),
            redirect_uri: &context.redirect_uri,
        };

        let response = self
            .http_client
            .post(&config.token_url)
            .form(request)
            .context("form error")
            .map_err(OAuthClientError::Transport)?
            .send()
            .await
            .context("send error")
            .map_err(OAuthClientError::Transport)?;

        if !response.status.is_success() {
            tracing::warn!(status = %response.status, "Token endpoint rejected the authorization code");
            return Err(OAuthClientError::TokenRequestFailed {
                status: response.status.0,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        let token: TokenResponse = response
            .json()
            .context("parsing error")
            .map_err(OAuthClientError::Transport)?;
        tracing::debug!(token_type = %token.token_type, expires_in = ?token.expires_in, "Access token obtained");

        Ok(AccessToken(token.access_token))
    }
}

/// Base64url (no padding) SHA-256 of the verifier
pub(crate) fn code_challenge(code_verifier: &str) -> Result<String, OAuthClientError> {
    Ok(SHA256.hash_base64_url(code_verifier.as_bytes())?)
}

#[derive(Debug, Error)]
pub(crate) enum OAuthClientError {
    #[error("Invalid authorization URL: `{0}`")]
    InvalidUrl(String),
    #[error("OAuth client serialization failure: `{0}`")]
    Serialization(#[from] serde_urlencoded::ser::Error),
    #[error("Authorization claims serialization failure: `{0}`")]
    Claims(#[from] serde_json::Error),
    #[error("Encoding failure: `{0}`")]
    Encoding(String),
    #[error("Code challenge failure: `{0}`")]
    Hashing(#[from] HasherError),
    #[error("Authorization code entry failed: `{0}`")]
    CodeEntry(#[from] UserInteractionError),
    #[error("Token endpoint returned status {status}: {body}")]
    TokenRequestFailed { status: u16, body: String },
    #[error("Token exchange failed: `{0:#}`")]
    Transport(anyhow::Error),
}

/// Per-session values bound to one authorization request
#[derive(Debug)]
pub(crate) struct AuthorizationContext {
    pub url: Url,
    pub state: String,
    pub nonce: String,
    pub code_verifier: SecretString,
    pub redirect_uri: String,
}

/// Signature activation data. Not `Clone`: consumed by the one sign request it authorizes.
#[derive(Debug)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub(crate) fn into_secret(self) -> SecretString {
        self.0
    }
}

#[derive(Debug, Serialize)]
struct AuthorizationRequest<'a> {
    response_type: &'static str,
    client_id: &'a str,
    scope: &'a str,
    state: &'a str,
    nonce: &'a str,
    redirect_uri: &'a str,
    code_challenge: &'a str,
    code_challenge_method: &'static str,
    claims: String,
}

#[derive(Debug, Serialize)]
struct AuthorizationClaims<'a> {
    #[serde(rename = "credentialID")]
    credential_id: &'a str,
    #[serde(rename = "hashAlgorithmOID")]
    hash_algorithm_oid: &'a str,
    #[serde(rename = "documentDigests")]
    document_digests: Vec<DocumentDigestClaim<'a>>,
}

#[derive(Debug, Serialize)]
struct DocumentDigestClaim<'a> {
    hash: String,
    label: &'a str,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    code_verifier: &'a str,
    redirect_uri: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: SecretString,
    token_type: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[cfg(test)]
mod test;
