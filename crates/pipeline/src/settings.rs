//! Ambient, validated configuration for the scheduler and buffer defaults
//! this crate owns.

use ops_buffer::OverflowPolicy;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Error;

/// Engine-wide defaults, loadable from YAML.
///
/// Mirrors the teacher's validated-config-struct pattern: a plain
/// `serde`-derived struct with `validator` range checks, loaded once at
/// startup and threaded through wherever a default is needed rather than
/// re-read per call.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    /// The default inbox capacity, in batches, for any node whose operator
    /// does not dictate otherwise.
    #[validate(range(min = 1))]
    #[serde(default = "default_inbox_capacity")]
    pub default_inbox_capacity: usize,

    /// The default `buffer` operator capacity, in rows, when a pipeline
    /// configuration does not specify one explicitly.
    #[validate(range(min = 1))]
    #[serde(default = "default_buffer_capacity")]
    pub default_buffer_capacity: u64,

    /// The default `buffer` operator overflow policy.
    #[serde(default = "default_buffer_policy")]
    pub default_buffer_policy: OverflowPolicy,

    /// How often, in milliseconds, the scheduler should emit periodic
    /// throughput metrics. `0` disables periodic emission (metrics still
    /// fire on state transitions).
    #[serde(default = "default_metrics_interval_ms")]
    pub metrics_interval_ms: u64,
}

fn default_inbox_capacity() -> usize {
    scheduler::DEFAULT_CAPACITY
}

fn default_buffer_capacity() -> u64 {
    1024
}

fn default_buffer_policy() -> OverflowPolicy {
    OverflowPolicy::Block
}

fn default_metrics_interval_ms() -> u64 {
    1000
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_inbox_capacity: default_inbox_capacity(),
            default_buffer_capacity: default_buffer_capacity(),
            default_buffer_policy: default_buffer_policy(),
            metrics_interval_ms: default_metrics_interval_ms(),
        }
    }
}

impl EngineSettings {
    /// Parses and validates settings from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let settings: EngineSettings =
            serde_yaml::from_str(yaml).map_err(|source| Error::InvalidSettings { message: source.to_string() })?;
        settings.validate().map_err(|source| Error::InvalidSettings { message: source.to_string() })?;
        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_settings_validate() {
        assert!(EngineSettings::default().validate().is_ok());
    }

    #[test]
    fn from_yaml_applies_defaults_for_missing_fields() {
        let settings = EngineSettings::from_yaml("default_inbox_capacity: 16\n").unwrap();
        assert_eq!(settings.default_inbox_capacity, 16);
        assert_eq!(settings.default_buffer_capacity, default_buffer_capacity());
    }

    #[test]
    fn from_yaml_rejects_zero_inbox_capacity() {
        assert!(EngineSettings::from_yaml("default_inbox_capacity: 0\n").is_err());
    }

    #[test]
    fn from_yaml_rejects_unknown_fields() {
        assert!(EngineSettings::from_yaml("bogus_field: 1\n").is_err());
    }
}
