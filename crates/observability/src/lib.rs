//! Tracing and logging setup shared by every process that embeds the engine.

use usra_core::TelemetryConfig;

/// Initialize process-wide tracing from `config`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &TelemetryConfig) {
    tracing::init(config);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
