// Library module for the JWKS issuer

pub mod config;
pub mod discovery;
pub mod endpoints;
pub mod error;
pub mod jwk;
pub mod key_management;
pub mod logging;
pub mod server;
pub mod token;
pub mod types;

pub use error::{Error, Result};
pub use types::{KeyIntent, KeyPair, KeyStore};
