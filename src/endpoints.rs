// JWKS and auth endpoint handlers

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::discovery;
use crate::error::Error;
use crate::token;
use crate::types::{AuthQuery, AuthResponse, JwksResponse, KeyIntent, KeyStore};

/// Application state: the keystore, created once at startup and read-only afterwards
pub type AppState = Arc<KeyStore>;

/// JWKS endpoint handler - serves public keys in JWKS format
/// Only returns keys that have not expired
pub async fn jwks_handler(State(keys): State<AppState>) -> Json<JwksResponse> {
    let response = discovery::published_keys(&keys, Utc::now());
    tracing::debug!(published = response.keys.len(), "served jwks");
    Json(response)
}

/// Auth endpoint handler - issues JWTs for authentication
/// Any `expired` query parameter switches to the expired key and a past expiry
pub async fn auth_handler(
    State(keys): State<AppState>,
    Query(params): Query<AuthQuery>,
) -> Result<Json<AuthResponse>, Error> {
    let intent = KeyIntent::from_query(&params);
    let (key, expired_mode) = keys.select(intent);

    let token = token::issue(key, expired_mode).inspect_err(|e| {
        tracing::error!(kid = %key.kid(), error = %e, "token signing failed");
    })?;

    Ok(Json(AuthResponse { token }))
}
