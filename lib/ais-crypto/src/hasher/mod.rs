use ct_codecs::{Base64, Base64UrlSafeNoPadding, Encoder};
use thiserror::Error;

pub mod sha;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Hasher: Send + Sync {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError>;

    /// Digest encoded as standard base64 (with padding)
    fn hash_base64(&self, input: &[u8]) -> Result<String, HasherError> {
        let digest = self.hash(input)?;
        Base64::encode_to_string(digest).map_err(|e| HasherError::Encoding(e.to_string()))
    }

    /// Digest encoded as URL-safe base64 without padding, as used for PKCE challenges
    fn hash_base64_url(&self, input: &[u8]) -> Result<String, HasherError> {
        let digest = self.hash(input)?;
        Base64UrlSafeNoPadding::encode_to_string(digest)
            .map_err(|e| HasherError::Encoding(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("Could not encode digest: `{0}`")]
    Encoding(String),
}

#[cfg(test)]
mod test;
