// Key management functionality for the JWKS issuer

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, rngs::OsRng};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::{Error, Result};
use crate::types::{AuthQuery, KeyIntent, KeyPair, KeyStore};

/// RSA modulus size for generated keys.
pub const KEY_BITS: usize = 2048;

/// Query parameter that selects the expired slot.
pub const EXPIRED_PARAM: &str = "expired";

/// Bytes of entropy in a generated key identifier.
const KID_BYTES: usize = 16;

/// Distance of both slots' expiry from the creation instant.
pub fn key_lifetime() -> Duration {
    Duration::hours(24)
}

impl KeyPair {
    /// Generate a new RSA key pair with a random kid and the given expiry.
    pub fn generate(expires_at: DateTime<Utc>) -> Result<Self> {
        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, KEY_BITS)
            .map_err(|e| Error::KeyGeneration(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);

        Ok(KeyPair {
            kid: new_kid()?,
            expires_at,
            private_key,
            public_key,
        })
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Check if the key pair has expired as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if the key pair is still valid as of `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }
}

impl KeyStore {
    /// Generate the active and expired slots around a single creation instant.
    pub fn create() -> Result<Self> {
        let now = Utc::now();
        let active = KeyPair::generate(now + key_lifetime())?;
        let expired = KeyPair::generate(now - key_lifetime())?;

        tracing::info!(
            active_kid = %active.kid,
            active_expires_at = %active.expires_at,
            expired_kid = %expired.kid,
            expired_expires_at = %expired.expires_at,
            "generated signing keys"
        );

        Ok(KeyStore { active, expired })
    }

    pub fn active(&self) -> &KeyPair {
        &self.active
    }

    pub fn expired(&self) -> &KeyPair {
        &self.expired
    }

    /// All key pairs in slot order: active, then expired.
    pub fn keys(&self) -> impl Iterator<Item = &KeyPair> {
        [&self.active, &self.expired].into_iter()
    }

    /// Pick the signing key for `intent`, along with whether the token
    /// should be issued already expired.
    pub fn select(&self, intent: KeyIntent) -> (&KeyPair, bool) {
        match intent {
            KeyIntent::Active => (&self.active, false),
            KeyIntent::Expired => (&self.expired, true),
        }
    }
}

impl KeyIntent {
    /// Any occurrence of `expired`, with or without a value, asks for the expired slot.
    pub fn from_query(query: &AuthQuery) -> Self {
        if query.contains_key(EXPIRED_PARAM) {
            KeyIntent::Expired
        } else {
            KeyIntent::Active
        }
    }
}

/// Random URL-safe key identifier.
fn new_kid() -> Result<String> {
    let mut bytes = [0u8; KID_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::KeyGeneration(format!("entropy source failed: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
pub(crate) fn shared_store() -> &'static KeyStore {
    use std::sync::OnceLock;

    static STORE: OnceLock<KeyStore> = OnceLock::new();
    STORE.get_or_init(|| KeyStore::create().expect("key generation failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_orders_expiries_around_now() {
        let store = shared_store();
        let now = Utc::now();

        assert!(store.active().expires_at() > now);
        assert!(store.expired().expires_at() < now);
        assert!(store.active().is_valid_at(now));
        assert!(store.expired().is_expired_at(now));
    }

    #[test]
    fn test_expiries_are_24h_from_same_instant() {
        let store = shared_store();
        let span = store.active().expires_at() - store.expired().expires_at();
        assert_eq!(span, key_lifetime() * 2);
    }

    #[test]
    fn test_kids_are_unique_and_url_safe() {
        let store = shared_store();
        assert_ne!(store.active().kid(), store.expired().kid());

        for key in store.keys() {
            let decoded = URL_SAFE_NO_PAD.decode(key.kid()).expect("kid not base64url");
            assert_eq!(decoded.len(), KID_BYTES);
            assert!(!key.kid().contains('='));
        }
    }

    #[test]
    fn test_keys_are_2048_bit() {
        use rsa::traits::PublicKeyParts;

        for key in shared_store().keys() {
            assert_eq!(key.public_key().size() * 8, KEY_BITS);
        }
    }

    #[test]
    fn test_keys_iterates_active_first() {
        let store = shared_store();
        let kids: Vec<&str> = store.keys().map(KeyPair::kid).collect();
        assert_eq!(kids, vec![store.active().kid(), store.expired().kid()]);
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let key = shared_store().active();
        let at = key.expires_at();

        assert!(key.is_valid_at(at - Duration::seconds(1)));
        assert!(key.is_expired_at(at));
        assert!(key.is_expired_at(at + Duration::seconds(1)));
    }

    #[test]
    fn test_select_branches_on_intent() {
        let store = shared_store();

        let (key, expired_mode) = store.select(KeyIntent::Active);
        assert_eq!(key.kid(), store.active().kid());
        assert!(!expired_mode);

        let (key, expired_mode) = store.select(KeyIntent::Expired);
        assert_eq!(key.kid(), store.expired().kid());
        assert!(expired_mode);
    }

    #[test]
    fn test_intent_from_query_is_presence_check() {
        let absent = AuthQuery::from([("expiredx".to_string(), "1".to_string())]);
        assert_eq!(KeyIntent::from_query(&absent), KeyIntent::Active);
        assert_eq!(KeyIntent::from_query(&AuthQuery::new()), KeyIntent::Active);

        for value in ["", "true", "false", "0", "anything"] {
            let query = AuthQuery::from([(EXPIRED_PARAM.to_string(), value.to_string())]);
            assert_eq!(KeyIntent::from_query(&query), KeyIntent::Expired, "value {value:?}");
        }
    }

    #[test]
    fn test_debug_omits_private_material() {
        let rendered = format!("{:?}", shared_store().active());
        assert!(rendered.contains("kid"));
        assert!(!rendered.contains("private_key"));
    }
}
