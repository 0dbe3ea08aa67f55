use std::sync::Arc;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::HTTPSigningServiceClient;
use crate::model::batch::{CertificateRequest, StepUp};
use crate::model::document::DigestAlgorithm;
use crate::model::outcome::{ResultReason, SignatureValue};
use crate::provider::http_client::reqwest_client::ReqwestClient;
use crate::provider::signing_service_client::SigningServiceClient;
use crate::provider::signing_service_client::dto::{
    AdditionalProfile, DocumentHash, EtsiSignRequest, PendingHandle, PendingRequest,
    ReturnedSignature, ServiceResponse, SignRequest, SignatureType,
};
use crate::provider::signing_service_client::error::SigningServiceClientError;

const PROFILE: &str = "http://ais.swisscom.ch/1.1";

fn client(base_url: &str) -> HTTPSigningServiceClient {
    HTTPSigningServiceClient::new(
        Arc::new(ReqwestClient::default()),
        format!("{base_url}/sign"),
        format!("{base_url}/pending"),
        Some(format!("{base_url}/etsi/signHash")),
    )
}

fn static_request() -> SignRequest {
    SignRequest {
        request_id: "request-1".to_string(),
        profile: PROFILE.to_string(),
        claimed_identity: "ais-90days-trial".to_string(),
        signature_type: SignatureType::Cms,
        additional_profiles: vec![],
        add_timestamp: true,
        add_revocation_information: Some("BOTH".to_string()),
        signature_standard: Some("PAdES-baseline".to_string()),
        certificate_request: None,
        documents: vec![DocumentHash {
            id: "doc-1".to_string(),
            algorithm: DigestAlgorithm::Sha256,
            value: vec![0xde, 0xad, 0xbe, 0xef],
        }],
    }
}

async fn mount_sign(server: &MockServer, response: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/sign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sign_static_request_body_and_single_signature() {
    // given
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign"))
        .and(body_json(json!({
            "SignRequest": {
                "@RequestID": "request-1",
                "@Profile": PROFILE,
                "OptionalInputs": {
                    "ClaimedIdentity": { "Name": "ais-90days-trial" },
                    "SignatureType": "urn:ietf:rfc:3369",
                    "AddTimestamp": { "@Type": "urn:ietf:rfc:3161" },
                    "sc.AddRevocationInformation": { "@Type": "BOTH" },
                    "sc.SignatureStandard": "PAdES-baseline",
                },
                "InputDocuments": {
                    "DocumentHash": [{
                        "@ID": "doc-1",
                        "dsig.DigestMethod": { "@Algorithm": "http://www.w3.org/2001/04/xmlenc#sha256" },
                        "dsig.DigestValue": "3q2+7w==",
                    }]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SignResponse": {
                "@RequestID": "request-1",
                "@Profile": PROFILE,
                "Result": { "ResultMajor": "urn:oasis:names:tc:dss:1.0:resultmajor:Success" },
                "SignatureObject": {
                    "Base64Signature": { "@Type": "urn:ietf:rfc:3369", "$": "AQID" }
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // when
    let response = client(&mock_server.uri())
        .sign(static_request())
        .await
        .unwrap();

    // then
    assert_eq!(
        response,
        ServiceResponse::Complete(vec![ReturnedSignature {
            which_document: None,
            value: SignatureValue::Signature(vec![1, 2, 3]),
        }])
    );
}

#[tokio::test]
async fn test_sign_step_up_request_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign"))
        .and(body_json(json!({
            "SignRequest": {
                "@RequestID": "request-2",
                "@Profile": PROFILE,
                "OptionalInputs": {
                    "ClaimedIdentity": { "Name": "ais-90days-trial:OnDemand-Advanced" },
                    "SignatureType": "urn:ietf:rfc:3369",
                    "AdditionalProfile": [
                        "http://ais.swisscom.ch/1.0/profiles/ondemandcertificate",
                        "urn:oasis:names:tc:dss:1.0:profiles:asynchronousprocessing",
                        "http://ais.swisscom.ch/1.1/profiles/redirect",
                    ],
                    "sc.CertificateRequest": {
                        "sc.DistinguishedName": "cn=TEST User, c=CH",
                        "sc.StepUpAuthorisation": {
                            "sc.Phone": {
                                "sc.MSISDN": "41790000000",
                                "sc.Message": "Please confirm",
                                "sc.Language": "en",
                            }
                        }
                    }
                },
                "InputDocuments": {
                    "DocumentHash": [{
                        "@ID": "doc-1",
                        "dsig.DigestMethod": { "@Algorithm": "http://www.w3.org/2001/04/xmlenc#sha256" },
                        "dsig.DigestValue": "3q2+7w==",
                    }]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SignResponse": {
                "Result": {
                    "ResultMajor": "urn:oasis:names:tc:dss:1.0:profiles:asynchronousprocessing:resultmajor:Pending"
                },
                "OptionalOutputs": {
                    "async.ResponseID": "response-42",
                    "sc.StepUpAuthorisationInfo": {
                        "sc.Result": { "sc.ConsentURL": "https://consent.example.com/abc" }
                    }
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = SignRequest {
        request_id: "request-2".to_string(),
        claimed_identity: "ais-90days-trial:OnDemand-Advanced".to_string(),
        additional_profiles: vec![
            AdditionalProfile::OnDemandCertificate,
            AdditionalProfile::AsynchronousProcessing,
            AdditionalProfile::Redirect,
        ],
        add_timestamp: false,
        add_revocation_information: None,
        signature_standard: None,
        certificate_request: Some(CertificateRequest {
            distinguished_name: "cn=TEST User, c=CH".to_string(),
            step_up: Some(StepUp {
                msisdn: "41790000000".to_string(),
                message: "Please confirm".to_string(),
                language: "en".to_string(),
                serial_number: None,
            }),
        }),
        ..static_request()
    };

    let response = client(&mock_server.uri()).sign(request).await.unwrap();

    assert_eq!(
        response,
        ServiceResponse::Pending(PendingHandle {
            response_id: "response-42".to_string(),
            consent_url: Some("https://consent.example.com/abc".to_string()),
        })
    );
}

#[tokio::test]
async fn test_sign_batch_extended_signature_objects() {
    let mock_server = MockServer::start().await;
    mount_sign(
        &mock_server,
        json!({
            "SignResponse": {
                "Result": { "ResultMajor": "urn:oasis:names:tc:dss:1.0:resultmajor:Success" },
                "OptionalOutputs": {
                    "sc.SignatureObjects": {
                        "sc.ExtendedSignatureObject": [
                            { "@WhichDocument": "doc-2", "Base64Signature": { "@Type": "urn:ietf:rfc:3369", "$": "Ag==" } },
                            { "@WhichDocument": "doc-1", "Timestamp": { "RFC3161TimeStampToken": "AQ==" } }
                        ]
                    }
                }
            }
        }),
    )
    .await;

    let response = client(&mock_server.uri())
        .sign(static_request())
        .await
        .unwrap();

    assert_eq!(
        response,
        ServiceResponse::Complete(vec![
            ReturnedSignature {
                which_document: Some("doc-2".to_string()),
                value: SignatureValue::Signature(vec![2]),
            },
            ReturnedSignature {
                which_document: Some("doc-1".to_string()),
                value: SignatureValue::TimestampToken(vec![1]),
            },
        ])
    );
}

#[tokio::test]
async fn test_sign_error_response_is_returned_as_data() {
    let mock_server = MockServer::start().await;
    mount_sign(
        &mock_server,
        json!({
            "SignResponse": {
                "Result": {
                    "ResultMajor": "http://ais.swisscom.ch/1.0/resultmajor/SubsystemError",
                    "ResultMinor": "http://ais.swisscom.ch/1.1/resultminor/subsystem/StepUp/timeout",
                    "ResultMessage": { "@xml.lang": "en", "$": "User did not respond" }
                }
            }
        }),
    )
    .await;

    let response = client(&mock_server.uri())
        .sign(static_request())
        .await
        .unwrap();

    assert_eq!(
        response,
        ServiceResponse::Error(ResultReason {
            major: "http://ais.swisscom.ch/1.0/resultmajor/SubsystemError".to_string(),
            minor: Some(
                "http://ais.swisscom.ch/1.1/resultminor/subsystem/StepUp/timeout".to_string()
            ),
            message: Some("User did not respond".to_string()),
        })
    );
}

#[tokio::test]
async fn test_sign_missing_major_is_malformed() {
    let mock_server = MockServer::start().await;
    mount_sign(&mock_server, json!({ "SignResponse": { "Result": {} } })).await;

    let result = client(&mock_server.uri()).sign(static_request()).await;

    assert!(matches!(
        result,
        Err(SigningServiceClientError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_sign_pending_without_response_id_is_malformed() {
    let mock_server = MockServer::start().await;
    mount_sign(
        &mock_server,
        json!({
            "SignResponse": {
                "Result": {
                    "ResultMajor": "urn:oasis:names:tc:dss:1.0:profiles:asynchronousprocessing:resultmajor:Pending"
                }
            }
        }),
    )
    .await;

    let result = client(&mock_server.uri()).sign(static_request()).await;

    assert!(matches!(
        result,
        Err(SigningServiceClientError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_sign_server_error_is_transport_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server.uri()).sign(static_request()).await;

    assert!(matches!(result, Err(SigningServiceClientError::Transport(_))));
}

#[tokio::test]
async fn test_sign_unparseable_body_is_transport_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server.uri()).sign(static_request()).await;

    assert!(matches!(result, Err(SigningServiceClientError::Transport(_))));
}

#[tokio::test]
async fn test_poll_pending_request_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pending"))
        .and(body_json(json!({
            "async.PendingRequest": {
                "@Profile": PROFILE,
                "OptionalInputs": {
                    "ClaimedIdentity": { "Name": "ais-90days-trial:OnDemand-Advanced" },
                    "async.ResponseID": "response-42"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SignResponse": {
                "Result": {
                    "ResultMajor": "urn:oasis:names:tc:dss:1.0:profiles:asynchronousprocessing:resultmajor:Pending"
                },
                "OptionalOutputs": { "async.ResponseID": "response-42" }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server.uri())
        .poll_pending(PendingRequest {
            profile: PROFILE.to_string(),
            claimed_identity: "ais-90days-trial:OnDemand-Advanced".to_string(),
            response_id: "response-42".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        ServiceResponse::Pending(PendingHandle {
            response_id: "response-42".to_string(),
            consent_url: None,
        })
    );
}

fn etsi_request() -> EtsiSignRequest {
    EtsiSignRequest {
        credential_id: "OnDemand-Qualified4".to_string(),
        sad: SecretString::from("sad-token"),
        profile: "http://uri.etsi.org/19432/v1.1.1#/creationprofile#".to_string(),
        signature_format: "P".to_string(),
        conformance_level: "AdES-B-LTA".to_string(),
        hashes: vec![vec![0xde, 0xad, 0xbe, 0xef], vec![1, 2]],
        hash_algorithm_oid: "2.16.840.1.101.3.4.2.1".to_string(),
    }
}

#[tokio::test]
async fn test_sign_etsi() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/etsi/signHash"))
        .and(body_json(json!({
            "credentialID": "OnDemand-Qualified4",
            "SAD": "sad-token",
            "profile": "http://uri.etsi.org/19432/v1.1.1#/creationprofile#",
            "signatureFormat": "P",
            "conformanceLevel": "AdES-B-LTA",
            "documentDigests": {
                "hashes": ["3q2+7w==", "AQI="],
                "hashAlgorithmOID": "2.16.840.1.101.3.4.2.1"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "SignatureObject": ["AQ==", "Ag=="] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server.uri())
        .sign_etsi(etsi_request())
        .await
        .unwrap();

    assert_eq!(
        response,
        ServiceResponse::Complete(vec![
            ReturnedSignature {
                which_document: None,
                value: SignatureValue::Signature(vec![1]),
            },
            ReturnedSignature {
                which_document: None,
                value: SignatureValue::Signature(vec![2]),
            },
        ])
    );
}

#[tokio::test]
async fn test_sign_etsi_not_configured() {
    let client = HTTPSigningServiceClient::new(
        Arc::new(ReqwestClient::default()),
        "http://localhost/sign".to_string(),
        "http://localhost/pending".to_string(),
        None,
    );

    let result = client.sign_etsi(etsi_request()).await;

    assert!(matches!(result, Err(SigningServiceClientError::Transport(_))));
}
