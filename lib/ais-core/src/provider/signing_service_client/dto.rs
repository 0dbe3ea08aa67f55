use secrecy::SecretString;

use crate::model::batch::CertificateRequest;
use crate::model::document::DigestAlgorithm;
use crate::model::outcome::{ResultReason, SignatureValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignRequest {
    pub request_id: String,
    pub profile: String,
    pub claimed_identity: String,
    pub signature_type: SignatureType,
    pub additional_profiles: Vec<AdditionalProfile>,
    pub add_timestamp: bool,
    pub add_revocation_information: Option<String>,
    pub signature_standard: Option<String>,
    pub certificate_request: Option<CertificateRequest>,
    pub documents: Vec<DocumentHash>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentHash {
    pub id: String,
    pub algorithm: DigestAlgorithm,
    pub value: Vec<u8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SignatureType {
    Cms,
    Timestamp,
}

impl SignatureType {
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Cms => "urn:ietf:rfc:3369",
            Self::Timestamp => "urn:ietf:rfc:3161",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdditionalProfile {
    Batch,
    OnDemandCertificate,
    AsynchronousProcessing,
    Redirect,
    Timestamping,
}

impl AdditionalProfile {
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Batch => "http://ais.swisscom.ch/1.0/profiles/batchprocessing",
            Self::OnDemandCertificate => "http://ais.swisscom.ch/1.0/profiles/ondemandcertificate",
            Self::AsynchronousProcessing => {
                "urn:oasis:names:tc:dss:1.0:profiles:asynchronousprocessing"
            }
            Self::Redirect => "http://ais.swisscom.ch/1.1/profiles/redirect",
            Self::Timestamping => "urn:oasis:names:tc:dss:1.0:profiles:timestamping",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub profile: String,
    pub claimed_identity: String,
    pub response_id: String,
}

#[derive(Debug)]
pub struct EtsiSignRequest {
    pub credential_id: String,
    /// Signature activation data
    pub sad: SecretString,
    pub profile: String,
    pub signature_format: String,
    pub conformance_level: String,
    pub hashes: Vec<Vec<u8>>,
    pub hash_algorithm_oid: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceResponse {
    /// Final signatures, in the order the service returned them
    Complete(Vec<ReturnedSignature>),
    Pending(PendingHandle),
    Error(ResultReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnedSignature {
    /// Document id echoed by the service, absent for single-document and ETSI responses
    pub which_document: Option<String>,
    pub value: SignatureValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingHandle {
    pub response_id: String,
    pub consent_url: Option<String>,
}
