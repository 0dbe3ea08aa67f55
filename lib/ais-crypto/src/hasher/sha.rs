use sha2::{Digest, Sha256, Sha384, Sha512};

use super::{Hasher, HasherError};

pub struct SHA256;

pub struct SHA384;

pub struct SHA512;

impl Hasher for SHA256 {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(Sha256::digest(input).to_vec())
    }
}

impl Hasher for SHA384 {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(Sha384::digest(input).to_vec())
    }
}

impl Hasher for SHA512 {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(Sha512::digest(input).to_vec())
    }
}
