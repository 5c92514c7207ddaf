// JWKS issuer
//
// Serves an RSA public key set at /.well-known/jwks.json and issues RS256
// JWTs at /auth. `POST /auth?expired` signs with a key that is already
// expired and backdates the token, for exercising JWT consumers.

use clap::Parser;
use jwks_issuer::{config::ServerConfig, logging, server};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Logging setup error: {e:#}");
        std::process::exit(1);
    }

    if let Err(e) = server::start_server(&config).await {
        tracing::error!("Server error: {e:#}");
        std::process::exit(1);
    }
}
