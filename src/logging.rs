// Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins when set, otherwise `default_filter`.
pub fn build_filter(default_filter: &str) -> anyhow::Result<EnvFilter> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    Ok(filter)
}

/// Install the global fmt subscriber.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let filter = build_filter(default_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(())
}
