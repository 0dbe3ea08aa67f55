use rand::distributions::{Alphanumeric, DistString};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub fn generate_alphanumeric(length: usize) -> String {
    Alphanumeric.sample_string(&mut get_rng(), length)
}

fn get_rng() -> impl RngCore + CryptoRng {
    ChaCha20Rng::from_entropy()
}
