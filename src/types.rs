// Data structures for the JWKS issuer

use chrono::{DateTime, Utc};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// RSA key pair with metadata.
///
/// Fields are fixed at creation and only readable from outside the crate.
#[derive(Clone)]
pub struct KeyPair {
    pub(crate) kid: String,                // Key ID
    pub(crate) expires_at: DateTime<Utc>,  // Expiry timestamp
    pub(crate) private_key: RsaPrivateKey, // RSA private key
    pub(crate) public_key: RsaPublicKey,   // RSA public key
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("kid", &self.kid)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// The two fixed signing slots: one active, one already expired.
#[derive(Clone, Debug)]
pub struct KeyStore {
    pub(crate) active: KeyPair,
    pub(crate) expired: KeyPair,
}

/// Which slot a caller wants to sign with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    Active,
    Expired,
}

/// JSON Web Key structure for JWKS response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    pub kty: String, // Key type (RSA)
    #[serde(rename = "use")]
    pub key_use: String, // Key usage (sig for signature)
    pub alg: String, // Algorithm (RS256)
    pub kid: String, // Key ID
    pub n: String,   // Modulus (base64url)
    pub e: String,   // Exponent (base64url)
}

/// JWKS response format
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwksResponse {
    pub keys: Vec<JsonWebKey>,
}

/// JWT Claims structure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expires at
}

/// Auth endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Query parameters for auth endpoint, keyed by name.
///
/// A repeated name keeps its last value; `?expired` alone maps to `""`.
pub type AuthQuery = HashMap<String, String>;
