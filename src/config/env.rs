//! Process configuration loaded from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `FLOOR_AUTO_HIDE_MINUTES` | 10 | initial auto-hide threshold, 0 = never |
//! | `FLOOR_LANGUAGE` | en | initial label language (`en`, `de`) |
//! | `FLOOR_REFRESH_SECS` | 30 | station re-evaluation tick, clamped to 1..=60 |
//! | `FLOOR_FEED_BUFFER` | 32 | request queue length per feed collection |
//!
//! Bad values never stop the process: they are logged and replaced by the default.
//!
//! ```ignore
//! FLOOR_AUTO_HIDE_MINUTES=0 FLOOR_LANGUAGE=de cargo run
//! ```

use super::settings::{Language, Settings, DEFAULT_AUTO_HIDE_MINUTES};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const MAX_REFRESH_SECS: u64 = 60;
pub const DEFAULT_FEED_BUFFER: usize = 32;
/// Floor for hand-built configs; the environment only offers whole seconds.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct FloorConfig {
    /// Settings published before any manager edits them.
    pub settings: Settings,
    /// How often stations recompute alert phases without a feed event.
    pub refresh_interval: Duration,
    pub feed_buffer: usize,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            feed_buffer: DEFAULT_FEED_BUFFER,
        }
    }
}

impl FloorConfig {
    /// Read the configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FloorConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let auto_hide_minutes =
            parse_or("FLOOR_AUTO_HIDE_MINUTES", &lookup, DEFAULT_AUTO_HIDE_MINUTES);
        let language = parse_or("FLOOR_LANGUAGE", &lookup, Language::default());
        let refresh_secs = parse_or("FLOOR_REFRESH_SECS", &lookup, DEFAULT_REFRESH_SECS)
            .clamp(1, MAX_REFRESH_SECS);
        let feed_buffer = parse_or("FLOOR_FEED_BUFFER", &lookup, DEFAULT_FEED_BUFFER).max(1);

        Self {
            settings: Settings {
                auto_hide_minutes,
                language,
            },
            refresh_interval: Duration::from_secs(refresh_secs),
            feed_buffer,
        }
    }
}

impl FloorConfig {
    /// Pulls hand-built values into the range the runtime accepts: a non-zero
    /// refresh tick no longer than [`MAX_REFRESH_SECS`] and a non-empty feed buffer.
    pub fn normalized(self) -> Self {
        let refresh_interval = self
            .refresh_interval
            .clamp(MIN_REFRESH_INTERVAL, Duration::from_secs(MAX_REFRESH_SECS));
        let feed_buffer = self.feed_buffer.max(1);
        if refresh_interval != self.refresh_interval || feed_buffer != self.feed_buffer {
            warn!(
                refresh = ?self.refresh_interval,
                buffer = self.feed_buffer,
                "Configuration out of range, clamping"
            );
        }
        Self {
            refresh_interval,
            feed_buffer,
            ..self
        }
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!(key, value = %raw, error = %e, "Invalid configuration value, using default");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> FloorConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FloorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.settings, Settings::default());
        assert_eq!(cfg.refresh_interval, Duration::from_secs(DEFAULT_REFRESH_SECS));
        assert_eq!(cfg.feed_buffer, DEFAULT_FEED_BUFFER);
    }

    #[test]
    fn values_are_read_and_refresh_is_clamped() {
        let cfg = config(&[
            ("FLOOR_AUTO_HIDE_MINUTES", "0"),
            ("FLOOR_LANGUAGE", "de"),
            ("FLOOR_REFRESH_SECS", "600"),
        ]);
        assert_eq!(cfg.settings.auto_hide_minutes, 0);
        assert_eq!(cfg.settings.language, Language::De);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(MAX_REFRESH_SECS));
    }

    #[test]
    fn garbage_falls_back_instead_of_failing() {
        let cfg = config(&[("FLOOR_AUTO_HIDE_MINUTES", "soon"), ("FLOOR_FEED_BUFFER", "-3")]);
        assert_eq!(cfg.settings.auto_hide_minutes, DEFAULT_AUTO_HIDE_MINUTES);
        assert_eq!(cfg.feed_buffer, DEFAULT_FEED_BUFFER);
    }

    #[test]
    fn hand_built_zero_values_are_clamped() {
        let cfg = FloorConfig {
            refresh_interval: Duration::ZERO,
            feed_buffer: 0,
            ..FloorConfig::default()
        }
        .normalized();
        assert_eq!(cfg.refresh_interval, MIN_REFRESH_INTERVAL);
        assert_eq!(cfg.feed_buffer, 1);

        let slow = FloorConfig {
            refresh_interval: Duration::from_secs(3600),
            ..FloorConfig::default()
        }
        .normalized();
        assert_eq!(slow.refresh_interval, Duration::from_secs(MAX_REFRESH_SECS));
        assert_eq!(slow.feed_buffer, DEFAULT_FEED_BUFFER);
    }
}
