// Public-key encoding into JWK records

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rsa::traits::PublicKeyParts;

use crate::types::{JsonWebKey, KeyPair};

pub const KEY_TYPE: &str = "RSA";
pub const KEY_USE: &str = "sig";
pub const ALGORITHM: &str = "RS256";

/// Project a key pair's public components into a JWK.
///
/// `n` and `e` are the minimal big-endian bytes of the modulus and exponent,
/// base64url without padding.
pub fn encode(key: &KeyPair) -> JsonWebKey {
    let n_bytes = key.public_key.n().to_bytes_be();
    let e_bytes = key.public_key.e().to_bytes_be();

    JsonWebKey {
        kty: KEY_TYPE.to_string(),
        key_use: KEY_USE.to_string(),
        alg: ALGORITHM.to_string(),
        kid: key.kid.clone(),
        n: URL_SAFE_NO_PAD.encode(n_bytes),
        e: URL_SAFE_NO_PAD.encode(e_bytes),
    }
}
