// Token issuance (RS256 compact JWTs) and consumer-side parsing

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use rsa::pkcs1::EncodeRsaPrivateKey;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::{Claims, KeyPair};

/// Placeholder identity every token is issued for.
pub const SUBJECT: &str = "user";

/// Distance of `exp` from `iat`, forward or backward.
pub fn token_lifetime() -> Duration {
    Duration::minutes(5)
}

/// Issue a token signed by `key`, expiring five minutes from now, or five
/// minutes ago when `expired_mode` is set.
pub fn issue(key: &KeyPair, expired_mode: bool) -> Result<String> {
    issue_at(key, expired_mode, Utc::now())
}

/// Same as [`issue`] with an explicit issuing instant.
pub fn issue_at(key: &KeyPair, expired_mode: bool, now: DateTime<Utc>) -> Result<String> {
    let iat = now.timestamp();
    let lifetime = token_lifetime().num_seconds();
    let exp = if expired_mode {
        iat - lifetime
    } else {
        iat + lifetime
    };

    let claims = Claims {
        sub: SUBJECT.to_string(),
        iat,
        exp,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(key.kid.clone());

    let der = key
        .private_key
        .to_pkcs1_der()
        .map_err(|e| Error::Signing(format!("private key export: {e}")))?;
    let encoding_key = EncodingKey::from_rsa_der(der.as_bytes());

    let token =
        encode(&header, &claims, &encoding_key).map_err(|e| Error::Signing(e.to_string()))?;

    tracing::debug!(kid = %key.kid, expired_mode, exp, "issued token");
    Ok(token)
}

/// The three base64url segments of a compact token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub header: &'a str,
    pub claims: &'a str,
    pub signature: &'a str,
}

/// Split a compact token into exactly three non-empty segments.
pub fn parse(token: &str) -> Result<TokenParts<'_>> {
    let segments: Vec<&str> = token.split('.').collect();
    let &[header, claims, signature] = segments.as_slice() else {
        return Err(Error::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    if [header, claims, signature].iter().any(|s| s.is_empty()) {
        return Err(Error::MalformedToken("empty segment".to_string()));
    }

    Ok(TokenParts {
        header,
        claims,
        signature,
    })
}

impl TokenParts<'_> {
    pub fn header(&self) -> Result<Header> {
        decode_segment(self.header, "header")
    }

    pub fn claims(&self) -> Result<Claims> {
        decode_segment(self.claims, "claims")
    }

    /// The bytes the signature covers.
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.claims)
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str, what: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| Error::MalformedToken(format!("{what}: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| Error::MalformedToken(format!("{what}: {e}")))
}
