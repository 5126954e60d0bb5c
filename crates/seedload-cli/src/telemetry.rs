//! Console logging for the loader binary.
//!
//! Events emitted by `seedload` (batch progress, phase timings, report
//! location) and by `sqlx` are printed through `tracing_subscriber::fmt`.
//! Verbosity follows `RUST_LOG` and defaults to `info`.

use tracing_subscriber::{
    EnvFilter, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
};

pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_timer(ChronoLocal::rfc_3339()),
        )
        .try_init()?;
    Ok(())
}
