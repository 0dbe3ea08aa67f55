use std::collections::HashMap;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::model::document::DigestAlgorithm;
use crate::provider::http_client::reqwest_client::ReqwestClient;
use crate::provider::user_interaction::MockUserInteraction;
use crate::util::random::MockRandomProvider;

const VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
const CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";

fn etsi_config(base_url: &str) -> EtsiConfig {
    EtsiConfig {
        authorize_url: format!("{base_url}/authorize"),
        token_url: format!("{base_url}/token"),
        sign_url: format!("{base_url}/signHash"),
        client_id: "client-id".to_string(),
        client_secret: SecretString::from("client-secret"),
        redirect_uri: "https://localhost/redirect".to_string(),
        scope: "sign".to_string(),
        credential_id: "OnDemand-Qualified4".to_string(),
        hash_algorithm_oid: None,
        profile: "http://uri.etsi.org/19432/v1.1.1#/creationprofile#".to_string(),
        signature_format: "P".to_string(),
        conformance_level: "AdES-B-LTA".to_string(),
        state: None,
        nonce: None,
    }
}

fn documents() -> Vec<DocumentDigest> {
    vec![
        DocumentDigest {
            id: "doc-1".to_string(),
            algorithm: DigestAlgorithm::Sha256,
            value: vec![0xde, 0xad, 0xbe, 0xef],
            label: "contract.pdf".to_string(),
        },
        DocumentDigest {
            id: "doc-2".to_string(),
            algorithm: DigestAlgorithm::Sha256,
            value: vec![0x01, 0x02],
            label: "annex.pdf".to_string(),
        },
    ]
}

fn random_provider() -> MockRandomProvider {
    let mut random = MockRandomProvider::new();
    random.expect_alphanumeric().returning(|length| match length {
        CODE_VERIFIER_LENGTH => VERIFIER.to_string(),
        _ => "random-state".to_string(),
    });
    random
}

fn client(user_interaction: MockUserInteraction) -> OAuthClient {
    OAuthClient::new(
        Arc::new(ReqwestClient::default()),
        Arc::new(random_provider()),
        Arc::new(user_interaction),
    )
}

fn query(url: &Url) -> HashMap<String, String> {
    url.query_pairs().into_owned().collect()
}

#[test]
fn test_code_challenge_is_deterministic() {
    assert_eq!(code_challenge(VERIFIER).unwrap(), CHALLENGE);
    assert_eq!(
        code_challenge(VERIFIER).unwrap(),
        code_challenge(VERIFIER).unwrap()
    );
}

#[test]
fn test_prepare_authorization_url() {
    // given
    let client = client(MockUserInteraction::new());
    let config = etsi_config("https://idp.example.com");

    // when
    let context = client
        .prepare_authorization(&config, &documents(), DigestAlgorithm::Sha256.oid())
        .unwrap();

    // then
    assert_eq!(context.url.path(), "/authorize");
    let params = query(&context.url);
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["client_id"], "client-id");
    assert_eq!(params["scope"], "sign");
    assert_eq!(params["state"], "random-state");
    assert_eq!(params["nonce"], "random-state");
    assert_eq!(params["redirect_uri"], "https://localhost/redirect");
    assert_eq!(params["code_challenge"], CHALLENGE);
    assert_eq!(params["code_challenge_method"], "S256");

    let claims: Value = serde_json::from_str(&params["claims"]).unwrap();
    similar_asserts::assert_eq!(
        claims,
        json!({
            "credentialID": "OnDemand-Qualified4",
            "hashAlgorithmOID": "2.16.840.1.101.3.4.2.1",
            "documentDigests": [
                { "hash": "3q2+7w==", "label": "contract.pdf" },
                { "hash": "AQI=", "label": "annex.pdf" },
            ]
        })
    );
    assert_eq!(context.code_verifier.expose_secret(), VERIFIER);
}

#[test]
fn test_prepare_authorization_uses_pinned_state_and_nonce() {
    let client = client(MockUserInteraction::new());
    let mut config = etsi_config("https://idp.example.com");
    config.state = Some("pinned-state".to_string());
    config.nonce = Some("pinned-nonce".to_string());

    let context = client
        .prepare_authorization(&config, &documents(), DigestAlgorithm::Sha256.oid())
        .unwrap();

    let params = query(&context.url);
    assert_eq!(params["state"], "pinned-state");
    assert_eq!(params["nonce"], "pinned-nonce");
    assert_eq!(context.state, "pinned-state");
    assert_eq!(context.nonce, "pinned-nonce");
}

#[tokio::test]
async fn test_authorize_exchanges_code_for_token() {
    // given
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .and(body_string_contains("code=the-code"))
        .and(body_string_contains(format!("code_verifier={VERIFIER}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "sad-token",
            "token_type": "Bearer",
            "expires_in": 300,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut user_interaction = MockUserInteraction::new();
    user_interaction
        .expect_authorization_code()
        .once()
        .withf(|url| url.query().is_some_and(|query| query.contains("code_challenge=")))
        .returning(|_| Ok(" the-code\n".to_string()));

    let client = client(user_interaction);
    let config = etsi_config(&mock_server.uri());

    // when
    let token = client
        .authorize(&config, &documents(), DigestAlgorithm::Sha256.oid())
        .await
        .unwrap();

    // then
    assert_eq!(token.into_secret().expose_secret(), "sad-token");
}

#[tokio::test]
async fn test_authorize_token_endpoint_rejects_code() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut user_interaction = MockUserInteraction::new();
    user_interaction
        .expect_authorization_code()
        .returning(|_| Ok("the-code".to_string()));

    let result = client(user_interaction)
        .authorize(
            &etsi_config(&mock_server.uri()),
            &documents(),
            DigestAlgorithm::Sha256.oid(),
        )
        .await;

    assert!(matches!(
        result,
        Err(OAuthClientError::TokenRequestFailed { status: 400, body }) if body == "invalid_grant"
    ));
}

#[tokio::test]
async fn test_authorize_empty_code_skips_token_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut user_interaction = MockUserInteraction::new();
    user_interaction
        .expect_authorization_code()
        .returning(|_| Ok("  ".to_string()));

    let result = client(user_interaction)
        .authorize(
            &etsi_config(&mock_server.uri()),
            &documents(),
            DigestAlgorithm::Sha256.oid(),
        )
        .await;

    assert!(matches!(
        result,
        Err(OAuthClientError::CodeEntry(UserInteractionError::NoCode))
    ));
}

#[tokio::test]
async fn test_authorize_malformed_token_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut user_interaction = MockUserInteraction::new();
    user_interaction
        .expect_authorization_code()
        .returning(|_| Ok("the-code".to_string()));

    let result = client(user_interaction)
        .authorize(
            &etsi_config(&mock_server.uri()),
            &documents(),
            DigestAlgorithm::Sha256.oid(),
        )
        .await;

    assert!(matches!(result, Err(OAuthClientError::Transport(_))));
}
