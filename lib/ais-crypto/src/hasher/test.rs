use super::Hasher;
use super::sha::{SHA256, SHA384, SHA512};

#[test]
fn test_sha256_known_vector() {
    let digest = SHA256.hash(b"abc").unwrap();

    assert_eq!(
        digest,
        [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad
        ]
    );
}

#[test]
fn test_digest_lengths() {
    assert_eq!(SHA256.hash(b"").unwrap().len(), 32);
    assert_eq!(SHA384.hash(b"").unwrap().len(), 48);
    assert_eq!(SHA512.hash(b"").unwrap().len(), 64);
}

#[test]
fn test_hash_base64_url_matches_rfc7636_example() {
    // RFC 7636, Appendix B
    let challenge = SHA256
        .hash_base64_url(b"dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk")
        .unwrap();

    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeUutr50tkHPzHNt7dI0");
}

#[test]
fn test_hash_base64_is_padded() {
    let encoded = SHA256.hash_base64(b"abc").unwrap();

    assert_eq!(encoded, "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=");
}
