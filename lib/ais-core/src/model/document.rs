use ais_crypto::Hasher;
use ais_crypto::hasher::sha::{SHA256, SHA384, SHA512};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Digest of one document to be signed. The orchestrator only borrows these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentDigest {
    /// Unique within a batch
    pub id: String,
    pub algorithm: DigestAlgorithm,
    pub value: Vec<u8>,
    pub label: String,
}

#[derive(
    Debug, Default, Copy, Clone, Display, EnumString, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum DigestAlgorithm {
    #[serde(rename = "SHA256")]
    #[strum(serialize = "SHA256")]
    Sha256,
    #[serde(rename = "SHA384")]
    #[strum(serialize = "SHA384")]
    Sha384,
    #[default]
    #[serde(rename = "SHA512")]
    #[strum(serialize = "SHA512")]
    Sha512,
}

impl DigestAlgorithm {
    /// XML-DSig algorithm identifier used by the DSS interface
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Sha256 => "http://www.w3.org/2001/04/xmlenc#sha256",
            Self::Sha384 => "http://www.w3.org/2001/04/xmldsig-more#sha384",
            Self::Sha512 => "http://www.w3.org/2001/04/xmlenc#sha512",
        }
    }

    /// Object identifier used by the ETSI remote signing interface
    pub fn oid(&self) -> &'static str {
        match self {
            Self::Sha256 => "2.16.840.1.101.3.4.2.1",
            Self::Sha384 => "2.16.840.1.101.3.4.2.2",
            Self::Sha512 => "2.16.840.1.101.3.4.2.3",
        }
    }

    pub fn hasher(&self) -> &'static dyn Hasher {
        match self {
            Self::Sha256 => &SHA256,
            Self::Sha384 => &SHA384,
            Self::Sha512 => &SHA512,
        }
    }
}
