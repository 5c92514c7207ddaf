//! Error types for key generation, token signing and token parsing.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors produced by the issuer.
#[derive(Debug, Error)]
pub enum Error {
    /// RSA key or key identifier generation failed. Fatal at startup.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Private key export or the RS256 signing primitive failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A compact token could not be split or decoded.
    #[error("malformed token: {0}")]
    MalformedToken(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = match &self {
            Error::Signing(_) => "could not create token".to_string(),
            other => other.to_string(),
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
