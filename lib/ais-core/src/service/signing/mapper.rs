use std::collections::HashMap;

use super::classifier::classify;
use super::error::{Operation, SigningServiceError};
use crate::config::core_config::{EtsiConfig, SignatureConfig};
use crate::model::batch::{SigningBatch, SigningMode};
use crate::model::document::{DigestAlgorithm, DocumentDigest};
use crate::model::outcome::{OutcomeResult, SignatureValue, SigningOutcome};
use crate::provider::signing_service_client::dto::{
    AdditionalProfile, DocumentHash, EtsiSignRequest, PendingRequest, ReturnedSignature,
    ServiceResponse, SignRequest, SignatureType,
};
use crate::provider::signing_service_client::error::SigningServiceClientError;
use crate::util::oauth_client::{AccessToken, OAuthClientError};

pub(crate) fn client_error(
    error: SigningServiceClientError,
    operation: Operation,
    correlation_id: &str,
) -> SigningServiceError {
    match error {
        SigningServiceClientError::Transport(cause) => SigningServiceError::CommunicationFailure {
            operation,
            correlation_id: correlation_id.to_owned(),
            cause,
        },
        SigningServiceClientError::MalformedResponse(reason) => {
            SigningServiceError::MalformedResponse {
                reason,
                correlation_id: correlation_id.to_owned(),
            }
        }
    }
}

pub(crate) fn authorization_error(
    error: OAuthClientError,
    correlation_id: &str,
) -> SigningServiceError {
    match error {
        OAuthClientError::Transport(cause) => SigningServiceError::CommunicationFailure {
            operation: Operation::GetToken,
            correlation_id: correlation_id.to_owned(),
            cause,
        },
        other => SigningServiceError::AuthorizationFailed {
            correlation_id: correlation_id.to_owned(),
            reason: other.to_string(),
        },
    }
}

pub(crate) fn sign_request(
    batch: &SigningBatch<'_>,
    config: &SignatureConfig,
    request_id: &str,
) -> SignRequest {
    let (signature_type, mut additional_profiles) = match batch.mode {
        SigningMode::Timestamp => (SignatureType::Timestamp, vec![AdditionalProfile::Timestamping]),
        SigningMode::OnDemand => (SignatureType::Cms, vec![AdditionalProfile::OnDemandCertificate]),
        SigningMode::OnDemandWithStepUp => (
            SignatureType::Cms,
            vec![
                AdditionalProfile::OnDemandCertificate,
                AdditionalProfile::AsynchronousProcessing,
                AdditionalProfile::Redirect,
            ],
        ),
        SigningMode::Static | SigningMode::Interactive => (SignatureType::Cms, vec![]),
    };
    if batch.documents.len() > 1 {
        additional_profiles.push(AdditionalProfile::Batch);
    }

    let is_signature = signature_type == SignatureType::Cms;

    SignRequest {
        request_id: request_id.to_owned(),
        profile: batch.profile.to_owned(),
        claimed_identity: batch.claimed_identity.qualified(batch.mode),
        signature_type,
        additional_profiles,
        add_timestamp: is_signature && config.add_timestamp,
        add_revocation_information: config.add_revocation_information.to_owned(),
        signature_standard: config
            .signature_standard
            .to_owned()
            .filter(|_| is_signature),
        certificate_request: batch.certificate_request.to_owned(),
        documents: batch
            .documents
            .iter()
            .map(|document| DocumentHash {
                id: document.id.to_owned(),
                algorithm: document.algorithm,
                value: document.value.to_owned(),
            })
            .collect(),
    }
}

pub(crate) fn pending_request(batch: &SigningBatch<'_>, response_id: &str) -> PendingRequest {
    PendingRequest {
        profile: batch.profile.to_owned(),
        claimed_identity: batch.claimed_identity.name.to_owned(),
        response_id: response_id.to_owned(),
    }
}

/// Configured OID, otherwise the OID of the documents' digest algorithm
pub(crate) fn hash_algorithm_oid(
    config: &EtsiConfig,
    documents: &[DocumentDigest],
    fallback: DigestAlgorithm,
) -> String {
    config.hash_algorithm_oid.to_owned().unwrap_or_else(|| {
        documents
            .first()
            .map_or(fallback, |document| document.algorithm)
            .oid()
            .to_string()
    })
}

pub(crate) fn etsi_sign_request(
    config: &EtsiConfig,
    documents: &[DocumentDigest],
    token: AccessToken,
    hash_algorithm_oid: String,
) -> EtsiSignRequest {
    EtsiSignRequest {
        credential_id: config.credential_id.to_owned(),
        sad: token.into_secret(),
        profile: config.profile.to_owned(),
        signature_format: config.signature_format.to_owned(),
        conformance_level: config.conformance_level.to_owned(),
        hashes: documents
            .iter()
            .map(|document| document.value.to_owned())
            .collect(),
        hash_algorithm_oid,
    }
}

/// One outcome per document, in submission order.
///
/// Signatures are matched by document id when every one carries an id and by
/// position when none does. A mix of both is malformed.
/// An error response applies to every document of the batch.
pub(crate) fn demultiplex(
    documents: &[DocumentDigest],
    response: ServiceResponse,
    correlation_id: &str,
) -> Result<Vec<SigningOutcome>, SigningServiceError> {
    let malformed = |reason: String| SigningServiceError::MalformedResponse {
        reason,
        correlation_id: correlation_id.to_owned(),
    };

    match response {
        ServiceResponse::Error(reason) => {
            let kind = classify(
                &reason.major,
                reason.minor.as_deref(),
                reason.message.as_deref(),
            )
            .map_err(|e| malformed(e.to_string()))?;

            Ok(documents
                .iter()
                .map(|document| SigningOutcome {
                    document_id: document.id.to_owned(),
                    result: OutcomeResult::Failed {
                        kind,
                        reason: reason.clone(),
                    },
                })
                .collect())
        }
        ServiceResponse::Pending(_) => Err(malformed(
            "pending response where a final one was expected".to_string(),
        )),
        ServiceResponse::Complete(signatures) => {
            if signatures.len() < documents.len() {
                return Err(SigningServiceError::ResponseIncomplete {
                    expected: documents.len(),
                    received: signatures.len(),
                    correlation_id: correlation_id.to_owned(),
                });
            }
            if signatures.len() > documents.len() {
                return Err(malformed(format!(
                    "{} signatures returned for {} documents",
                    signatures.len(),
                    documents.len()
                )));
            }

            let labelled = signatures
                .iter()
                .filter(|signature| signature.which_document.is_some())
                .count();
            let values = if labelled == signatures.len() {
                match_by_document_id(documents, signatures).map_err(malformed)?
            } else if labelled == 0 {
                signatures
                    .into_iter()
                    .map(|signature| signature.value)
                    .collect()
            } else {
                return Err(malformed(format!(
                    "{labelled} of {} signatures carry a document id",
                    signatures.len()
                )));
            };

            Ok(documents
                .iter()
                .zip(values)
                .map(|(document, value)| SigningOutcome {
                    document_id: document.id.to_owned(),
                    result: OutcomeResult::Signed(value),
                })
                .collect())
        }
    }
}

fn match_by_document_id(
    documents: &[DocumentDigest],
    signatures: Vec<ReturnedSignature>,
) -> Result<Vec<SignatureValue>, String> {
    let mut by_id: HashMap<String, SignatureValue> = signatures
        .into_iter()
        .filter_map(|signature| Some((signature.which_document?, signature.value)))
        .collect();

    documents
        .iter()
        .map(|document| {
            by_id
                .remove(&document.id)
                .ok_or_else(|| format!("no signature returned for document `{}`", document.id))
        })
        .collect()
}
