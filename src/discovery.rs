// Discovery filter: which public keys get published

use chrono::{DateTime, Utc};

use crate::jwk;
use crate::types::{JwksResponse, KeyStore};

/// Public entries for every key pair still valid at `now`, in slot order.
///
/// Evaluated per call; an empty set is a legitimate result.
pub fn published_keys(store: &KeyStore, now: DateTime<Utc>) -> JwksResponse {
    let keys = store
        .keys()
        .filter(|key| key.is_valid_at(now))
        .map(jwk::encode)
        .collect();

    JwksResponse { keys }
}
