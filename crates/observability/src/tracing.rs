//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use usra_core::TelemetryConfig;

/// Filter from `RUST_LOG`, else the configured directive, else `info`.
pub fn env_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &TelemetryConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    // JSON logs + timestamps unless configured for humans.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_a_no_op() {
        let config = TelemetryConfig {
            filter: "usra_auth=debug".to_string(),
            json: false,
        };
        init(&config);
        init(&config);
        ::tracing::debug!("still alive");
    }

    #[test]
    fn invalid_directive_falls_back() {
        let config = TelemetryConfig {
            filter: "[[[".to_string(),
            json: true,
        };
        // Must not panic.
        let _ = env_filter(&config);
    }
}
