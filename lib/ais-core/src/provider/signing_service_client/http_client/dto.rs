use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, serde_as, skip_serializing_none};

#[derive(Clone, Debug, Serialize)]
pub(super) struct SignRequestEnvelopeRestDTO {
    #[serde(rename = "SignRequest")]
    pub sign_request: SignRequestRestDTO,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct SignRequestRestDTO {
    #[serde(rename = "@RequestID")]
    pub request_id: String,
    #[serde(rename = "@Profile")]
    pub profile: String,
    #[serde(rename = "OptionalInputs")]
    pub optional_inputs: OptionalInputsRestDTO,
    #[serde(rename = "InputDocuments")]
    pub input_documents: InputDocumentsRestDTO,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub(super) struct OptionalInputsRestDTO {
    #[serde(rename = "ClaimedIdentity")]
    pub claimed_identity: ClaimedIdentityRestDTO,
    #[serde(rename = "SignatureType")]
    pub signature_type: String,
    #[serde(rename = "AdditionalProfile", skip_serializing_if = "Vec::is_empty")]
    pub additional_profile: Vec<String>,
    #[serde(rename = "AddTimestamp")]
    pub add_timestamp: Option<TypeRestDTO>,
    #[serde(rename = "sc.AddRevocationInformation")]
    pub add_revocation_information: Option<TypeRestDTO>,
    #[serde(rename = "sc.SignatureStandard")]
    pub signature_standard: Option<String>,
    #[serde(rename = "sc.CertificateRequest")]
    pub certificate_request: Option<CertificateRequestRestDTO>,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct ClaimedIdentityRestDTO {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct TypeRestDTO {
    #[serde(rename = "@Type")]
    pub r#type: String,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub(super) struct CertificateRequestRestDTO {
    #[serde(rename = "sc.DistinguishedName")]
    pub distinguished_name: String,
    #[serde(rename = "sc.StepUpAuthorisation")]
    pub step_up_authorisation: Option<StepUpAuthorisationRestDTO>,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct StepUpAuthorisationRestDTO {
    #[serde(rename = "sc.Phone")]
    pub phone: PhoneRestDTO,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
pub(super) struct PhoneRestDTO {
    #[serde(rename = "sc.MSISDN")]
    pub msisdn: String,
    #[serde(rename = "sc.Message")]
    pub message: String,
    #[serde(rename = "sc.Language")]
    pub language: String,
    #[serde(rename = "sc.SerialNumber")]
    pub serial_number: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct InputDocumentsRestDTO {
    #[serde(rename = "DocumentHash")]
    pub document_hash: Vec<DocumentHashRestDTO>,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct DocumentHashRestDTO {
    #[serde(rename = "@ID")]
    pub id: String,
    #[serde(rename = "dsig.DigestMethod")]
    pub digest_method: DigestMethodRestDTO,
    #[serde(rename = "dsig.DigestValue")]
    pub digest_value: String,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct DigestMethodRestDTO {
    #[serde(rename = "@Algorithm")]
    pub algorithm: String,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct PendingRequestEnvelopeRestDTO {
    #[serde(rename = "async.PendingRequest")]
    pub pending_request: PendingRequestRestDTO,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct PendingRequestRestDTO {
    #[serde(rename = "@Profile")]
    pub profile: String,
    #[serde(rename = "OptionalInputs")]
    pub optional_inputs: PendingOptionalInputsRestDTO,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct PendingOptionalInputsRestDTO {
    #[serde(rename = "ClaimedIdentity")]
    pub claimed_identity: ClaimedIdentityRestDTO,
    #[serde(rename = "async.ResponseID")]
    pub response_id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct SignResponseEnvelopeRestDTO {
    #[serde(rename = "SignResponse")]
    pub sign_response: SignResponseRestDTO,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct SignResponseRestDTO {
    #[serde(rename = "@RequestID", default)]
    pub request_id: Option<String>,
    #[serde(rename = "Result", default)]
    pub result: Option<ResultRestDTO>,
    #[serde(rename = "OptionalOutputs", default)]
    pub optional_outputs: Option<OptionalOutputsRestDTO>,
    #[serde(rename = "SignatureObject", default)]
    pub signature_object: Option<SignatureObjectRestDTO>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct ResultRestDTO {
    #[serde(rename = "ResultMajor", default)]
    pub result_major: Option<String>,
    #[serde(rename = "ResultMinor", default)]
    pub result_minor: Option<String>,
    #[serde(rename = "ResultMessage", default)]
    pub result_message: Option<ResultMessageRestDTO>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct ResultMessageRestDTO {
    #[serde(rename = "$")]
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct OptionalOutputsRestDTO {
    #[serde(rename = "async.ResponseID", default)]
    pub response_id: Option<String>,
    #[serde(rename = "sc.StepUpAuthorisationInfo", default)]
    pub step_up_authorisation_info: Option<StepUpAuthorisationInfoRestDTO>,
    #[serde(rename = "sc.SignatureObjects", default)]
    pub signature_objects: Option<SignatureObjectsRestDTO>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct StepUpAuthorisationInfoRestDTO {
    #[serde(rename = "sc.Result", default)]
    pub result: Option<StepUpResultRestDTO>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct StepUpResultRestDTO {
    #[serde(rename = "sc.ConsentURL", default)]
    pub consent_url: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub(super) struct SignatureObjectsRestDTO {
    #[serde_as(as = "OneOrMany<_>")]
    #[serde(rename = "sc.ExtendedSignatureObject", default)]
    pub extended_signature_object: Vec<ExtendedSignatureObjectRestDTO>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct ExtendedSignatureObjectRestDTO {
    #[serde(rename = "@WhichDocument", default)]
    pub which_document: Option<String>,
    #[serde(rename = "Base64Signature", default)]
    pub base64_signature: Option<Base64SignatureRestDTO>,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<TimestampRestDTO>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct SignatureObjectRestDTO {
    #[serde(rename = "Base64Signature", default)]
    pub base64_signature: Option<Base64SignatureRestDTO>,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<TimestampRestDTO>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct Base64SignatureRestDTO {
    #[serde(rename = "$")]
    pub value: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct TimestampRestDTO {
    #[serde(rename = "RFC3161TimeStampToken")]
    pub token: String,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct EtsiSignRequestRestDTO {
    #[serde(rename = "credentialID")]
    pub credential_id: String,
    #[serde(rename = "SAD")]
    pub sad: String,
    pub profile: String,
    #[serde(rename = "signatureFormat")]
    pub signature_format: String,
    #[serde(rename = "conformanceLevel")]
    pub conformance_level: String,
    #[serde(rename = "documentDigests")]
    pub document_digests: EtsiDocumentDigestsRestDTO,
}

#[derive(Clone, Debug, Serialize)]
pub(super) struct EtsiDocumentDigestsRestDTO {
    pub hashes: Vec<String>,
    #[serde(rename = "hashAlgorithmOID")]
    pub hash_algorithm_oid: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct EtsiSignResponseRestDTO {
    #[serde(rename = "SignatureObject", default)]
    pub signature_object: Vec<String>,
}
