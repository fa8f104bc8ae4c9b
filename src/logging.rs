use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. An explicit filter wins over `RUST_LOG`;
/// without either, `info` is used.
pub fn init(filter: Option<&str>) -> Result<()> {
    let env_filter = match filter {
        Some(f) => EnvFilter::try_new(f).map_err(|e| eyre!("invalid log filter {f:?}: {e}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| eyre!("failed to init logging: {e}"))
}
