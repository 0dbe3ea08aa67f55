use ct_codecs::{Base64, Decoder, Encoder};
use secrecy::ExposeSecret;

use super::dto::{
    Base64SignatureRestDTO, CertificateRequestRestDTO, ClaimedIdentityRestDTO,
    DigestMethodRestDTO, DocumentHashRestDTO, EtsiDocumentDigestsRestDTO, EtsiSignRequestRestDTO,
    EtsiSignResponseRestDTO, InputDocumentsRestDTO, OptionalInputsRestDTO,
    PendingOptionalInputsRestDTO, PendingRequestEnvelopeRestDTO, PendingRequestRestDTO,
    PhoneRestDTO, SignRequestEnvelopeRestDTO, SignRequestRestDTO, SignResponseRestDTO,
    StepUpAuthorisationRestDTO, TimestampRestDTO, TypeRestDTO,
};
use crate::model::batch::CertificateRequest;
use crate::model::outcome::{ResultReason, SignatureValue, is_pending_major, is_success_major};
use crate::provider::signing_service_client::dto::{
    EtsiSignRequest, PendingHandle, PendingRequest, ReturnedSignature, ServiceResponse,
    SignRequest, SignatureType,
};
use crate::provider::signing_service_client::error::SigningServiceClientError;

fn encode(value: &[u8]) -> Result<String, SigningServiceClientError> {
    Base64::encode_to_string(value)
        .map_err(|e| SigningServiceClientError::Transport(anyhow::anyhow!("encoding error: {e}")))
}

fn decode(value: &str) -> Result<Vec<u8>, SigningServiceClientError> {
    Base64::decode_to_vec(value, Some(b"\r\n ".as_slice()))
        .map_err(|e| SigningServiceClientError::MalformedResponse(format!("invalid base64: {e}")))
}

impl TryFrom<SignRequest> for SignRequestEnvelopeRestDTO {
    type Error = SigningServiceClientError;

    fn try_from(value: SignRequest) -> Result<Self, SigningServiceClientError> {
        let document_hash = value
            .documents
            .into_iter()
            .map(|document| {
                Ok(DocumentHashRestDTO {
                    id: document.id,
                    digest_method: DigestMethodRestDTO {
                        algorithm: document.algorithm.uri().to_string(),
                    },
                    digest_value: encode(&document.value)?,
                })
            })
            .collect::<Result<Vec<_>, SigningServiceClientError>>()?;

        Ok(Self {
            sign_request: SignRequestRestDTO {
                request_id: value.request_id,
                profile: value.profile,
                optional_inputs: OptionalInputsRestDTO {
                    claimed_identity: ClaimedIdentityRestDTO {
                        name: value.claimed_identity,
                    },
                    signature_type: value.signature_type.uri().to_string(),
                    additional_profile: value
                        .additional_profiles
                        .iter()
                        .map(|profile| profile.uri().to_string())
                        .collect(),
                    add_timestamp: value.add_timestamp.then(|| TypeRestDTO {
                        r#type: SignatureType::Timestamp.uri().to_string(),
                    }),
                    add_revocation_information: value
                        .add_revocation_information
                        .map(|r#type| TypeRestDTO { r#type }),
                    signature_standard: value.signature_standard,
                    certificate_request: value.certificate_request.map(Into::into),
                },
                input_documents: InputDocumentsRestDTO { document_hash },
            },
        })
    }
}

impl From<CertificateRequest> for CertificateRequestRestDTO {
    fn from(value: CertificateRequest) -> Self {
        Self {
            distinguished_name: value.distinguished_name,
            step_up_authorisation: value.step_up.map(|step_up| StepUpAuthorisationRestDTO {
                phone: PhoneRestDTO {
                    msisdn: step_up.msisdn,
                    message: step_up.message,
                    language: step_up.language,
                    serial_number: step_up.serial_number,
                },
            }),
        }
    }
}

impl From<PendingRequest> for PendingRequestEnvelopeRestDTO {
    fn from(value: PendingRequest) -> Self {
        Self {
            pending_request: PendingRequestRestDTO {
                profile: value.profile,
                optional_inputs: PendingOptionalInputsRestDTO {
                    claimed_identity: ClaimedIdentityRestDTO {
                        name: value.claimed_identity,
                    },
                    response_id: value.response_id,
                },
            },
        }
    }
}

impl TryFrom<EtsiSignRequest> for EtsiSignRequestRestDTO {
    type Error = SigningServiceClientError;

    fn try_from(value: EtsiSignRequest) -> Result<Self, SigningServiceClientError> {
        Ok(Self {
            credential_id: value.credential_id,
            sad: value.sad.expose_secret().to_owned(),
            profile: value.profile,
            signature_format: value.signature_format,
            conformance_level: value.conformance_level,
            document_digests: EtsiDocumentDigestsRestDTO {
                hashes: value
                    .hashes
                    .iter()
                    .map(|hash| encode(hash))
                    .collect::<Result<_, _>>()?,
                hash_algorithm_oid: value.hash_algorithm_oid,
            },
        })
    }
}

impl TryFrom<SignResponseRestDTO> for ServiceResponse {
    type Error = SigningServiceClientError;

    fn try_from(value: SignResponseRestDTO) -> Result<Self, SigningServiceClientError> {
        let result = value.result.unwrap_or_default();
        let major = result
            .result_major
            .filter(|major| !major.trim().is_empty())
            .ok_or_else(|| {
                SigningServiceClientError::MalformedResponse("missing ResultMajor".to_string())
            })?;
        let outputs = value.optional_outputs.unwrap_or_default();

        if is_pending_major(&major) {
            let response_id = outputs
                .response_id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    SigningServiceClientError::MalformedResponse(
                        "pending response without async.ResponseID".to_string(),
                    )
                })?;
            let consent_url = outputs
                .step_up_authorisation_info
                .and_then(|info| info.result)
                .and_then(|result| result.consent_url);

            return Ok(ServiceResponse::Pending(PendingHandle {
                response_id,
                consent_url,
            }));
        }

        if !is_success_major(&major) {
            return Ok(ServiceResponse::Error(ResultReason {
                major,
                minor: result.result_minor,
                message: result.result_message.map(|message| message.value),
            }));
        }

        let extended = outputs
            .signature_objects
            .map(|objects| objects.extended_signature_object)
            .unwrap_or_default();

        let signatures = if !extended.is_empty() {
            extended
                .into_iter()
                .map(|object| {
                    Ok(ReturnedSignature {
                        which_document: object.which_document,
                        value: signature_value(object.base64_signature, object.timestamp)?,
                    })
                })
                .collect::<Result<Vec<_>, SigningServiceClientError>>()?
        } else if let Some(object) = value.signature_object {
            vec![ReturnedSignature {
                which_document: None,
                value: signature_value(object.base64_signature, object.timestamp)?,
            }]
        } else {
            vec![]
        };

        Ok(ServiceResponse::Complete(signatures))
    }
}

fn signature_value(
    signature: Option<Base64SignatureRestDTO>,
    timestamp: Option<TimestampRestDTO>,
) -> Result<SignatureValue, SigningServiceClientError> {
    match (signature, timestamp) {
        (Some(signature), _) => Ok(SignatureValue::Signature(decode(&signature.value)?)),
        (None, Some(timestamp)) => Ok(SignatureValue::TimestampToken(decode(&timestamp.token)?)),
        (None, None) => Err(SigningServiceClientError::MalformedResponse(
            "signature object without signature or timestamp".to_string(),
        )),
    }
}

impl TryFrom<EtsiSignResponseRestDTO> for ServiceResponse {
    type Error = SigningServiceClientError;

    fn try_from(value: EtsiSignResponseRestDTO) -> Result<Self, SigningServiceClientError> {
        let signatures = value
            .signature_object
            .iter()
            .map(|signature| {
                Ok(ReturnedSignature {
                    which_document: None,
                    value: SignatureValue::Signature(decode(signature)?),
                })
            })
            .collect::<Result<Vec<_>, SigningServiceClientError>>()?;

        Ok(ServiceResponse::Complete(signatures))
    }
}
