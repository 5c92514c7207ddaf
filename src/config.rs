// Command-line and environment configuration

use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser, Debug, Clone)]
#[command(name = "jwks-issuer", version, about = "JWKS discovery and RS256 token issuance server")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "JWKS_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "jwks_issuer=debug")
    #[arg(long, env = "JWKS_LOG", default_value = "info")]
    pub log_level: String,
}
