//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and `tower_http`. Output is human-readable or JSON.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "pinproxy={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
