use strum::{Display, EnumString};

/// Closed set of per-document results
#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, Hash)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Success,
    UserTimeout,
    UserCancel,
    SerialNumberMismatch,
    InsufficientDataWithAbsentMsisdn,
    UserAuthenticationFailed,
    SubsystemError,
}

pub const RESULT_MAJOR_SUCCESS: &str = "urn:oasis:names:tc:dss:1.0:resultmajor:Success";
pub const RESULT_MAJOR_PENDING: &str =
    "urn:oasis:names:tc:dss:1.0:profiles:asynchronousprocessing:resultmajor:Pending";

/// Two-level status reported by the signing service, kept verbatim
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultReason {
    pub major: String,
    pub minor: Option<String>,
    pub message: Option<String>,
}

/// Any major whose last segment is `Success`
pub fn is_success_major(major: &str) -> bool {
    major == RESULT_MAJOR_SUCCESS || last_segment(major) == "Success"
}

pub fn is_pending_major(major: &str) -> bool {
    major == RESULT_MAJOR_PENDING
}

fn last_segment(uri: &str) -> &str {
    uri.rsplit([':', '/', '#']).next().unwrap_or(uri)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureValue {
    /// CMS signature (`urn:ietf:rfc:3369`)
    Signature(Vec<u8>),
    /// RFC 3161 timestamp token
    TimestampToken(Vec<u8>),
}

impl SignatureValue {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Signature(value) | Self::TimestampToken(value) => value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutcomeResult {
    Signed(SignatureValue),
    Failed {
        kind: OutcomeKind,
        reason: ResultReason,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningOutcome {
    pub document_id: String,
    pub result: OutcomeResult,
}

impl SigningOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match &self.result {
            OutcomeResult::Signed(_) => OutcomeKind::Success,
            OutcomeResult::Failed { kind, .. } => *kind,
        }
    }

    pub fn signature(&self) -> Option<&SignatureValue> {
        match &self.result {
            OutcomeResult::Signed(value) => Some(value),
            OutcomeResult::Failed { .. } => None,
        }
    }
}
