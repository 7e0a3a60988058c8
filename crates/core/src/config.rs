//! Engine configuration.
//!
//! Values come from environment variables with sensible defaults, mirroring how
//! the binaries that embed the engine are configured.

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{DomainError, DomainResult};

/// Local offset of the association (Asia/Riyadh, no DST).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 180;

pub const ENV_UTC_OFFSET_MINUTES: &str = "USRA_UTC_OFFSET_MINUTES";
pub const ENV_LOG_FILTER: &str = "USRA_LOG_FILTER";
pub const ENV_LOG_JSON: &str = "USRA_LOG_JSON";

/// Tracing output settings consumed by `usra-observability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Offset used to turn an instant into the local calendar date.
    pub utc_offset_minutes: i32,
    pub telemetry: TelemetryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            config.utc_offset_minutes = raw.trim().parse().map_err(|e| {
                DomainError::config(format!("{ENV_UTC_OFFSET_MINUTES}={raw:?}: {e}"))
            })?;
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            config.telemetry.filter = filter;
        }
        if let Some(raw) = lookup(ENV_LOG_JSON) {
            config.telemetry.json = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(DomainError::config(format!(
                        "{ENV_LOG_JSON}={raw:?}: expected a boolean"
                    )));
                }
            };
        }

        config.utc_offset()?;
        Ok(config)
    }

    pub fn utc_offset(&self) -> DomainResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                DomainError::config(format!(
                    "utc offset out of range: {} minutes",
                    self.utc_offset_minutes
                ))
            })
    }

    /// Local calendar date at the clock's current instant.
    ///
    /// This is the `now` that assignment status is derived against.
    pub fn today(&self, clock: &dyn Clock) -> DomainResult<NaiveDate> {
        let offset = self.utc_offset()?;
        Ok(clock.now().with_timezone(&offset).date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = EngineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.utc_offset_minutes, 180);
        assert!(config.telemetry.json);
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ENV_UTC_OFFSET_MINUTES, "0"),
            (ENV_LOG_FILTER, "usra_auth=debug"),
            (ENV_LOG_JSON, "false"),
        ]))
        .unwrap();
        assert_eq!(config.utc_offset_minutes, 0);
        assert_eq!(config.telemetry.filter, "usra_auth=debug");
        assert!(!config.telemetry.json);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_UTC_OFFSET_MINUTES, "three")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));

        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_UTC_OFFSET_MINUTES, "100000")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));

        let err =
            EngineConfig::from_lookup(lookup_from(&[(ENV_LOG_JSON, "maybe")])).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }

    #[test]
    fn today_uses_local_offset() {
        // 22:30 UTC is already the next day in Riyadh.
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 7, 6, 22, 30, 0).unwrap());
        let riyadh = EngineConfig::default();
        assert_eq!(
            riyadh.today(&clock).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 7).unwrap()
        );

        let utc = EngineConfig {
            utc_offset_minutes: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            utc.today(&clock).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 6).unwrap()
        );
    }
}
