//! Net tuning parameters and their validation.
//!
//! A [`NetConfig`] is fixed when a capture session starts. Bad values are
//! rejected up front so nothing degenerate is discovered mid-session.
//!
//! ```
//! use netcapture_logic::config::{validate_config, NetConfig};
//!
//! let mut config = NetConfig::default();
//! assert!(validate_config(&config).is_empty());
//! config.segment_skip_count = 0;
//! assert_eq!(validate_config(&config).len(), 1);
//! ```

use crate::constants::defaults;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Designer-facing tuning for a net capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Minimum distance between consecutive trail samples.
    pub min_sample_spacing: f32,
    /// Seconds a sample stays in the trail before it fades out.
    pub fade_duration: f32,
    /// Cap on the total trail path length; oldest samples drop first.
    pub max_trail_length: f32,
    /// The newest sample closes the loop when nearer than this to an older one.
    pub close_distance: f32,
    /// How many of the most recent samples are never closure candidates.
    pub segment_skip_count: usize,
    /// Seconds the closed net is held before the session resets.
    pub flash_duration: f32,
    /// Go straight back to drawing after a capture instead of idling.
    pub auto_restart: bool,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            min_sample_spacing: defaults::MIN_SAMPLE_SPACING,
            fade_duration: defaults::FADE_DURATION,
            max_trail_length: defaults::MAX_TRAIL_LENGTH,
            close_distance: defaults::CLOSE_DISTANCE,
            segment_skip_count: defaults::SEGMENT_SKIP_COUNT,
            flash_duration: defaults::FLASH_DURATION,
            auto_restart: true,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("min_sample_spacing must be positive (got {0})")]
    SampleSpacing(f32),
    #[error("fade_duration must be positive (got {0})")]
    FadeDuration(f32),
    #[error("max_trail_length must be positive (got {0})")]
    MaxTrailLength(f32),
    #[error("close_distance must be positive (got {0})")]
    CloseDistance(f32),
    #[error("segment_skip_count must be at least 1")]
    SegmentSkipCount,
    #[error("flash_duration must not be negative (got {0})")]
    FlashDuration(f32),
}

/// Validate a net configuration, returning all errors found.
pub fn validate_config(config: &NetConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let floats = [
        ("min_sample_spacing", config.min_sample_spacing),
        ("fade_duration", config.fade_duration),
        ("max_trail_length", config.max_trail_length),
        ("close_distance", config.close_distance),
        ("flash_duration", config.flash_duration),
    ];
    for (field, value) in floats {
        if !value.is_finite() {
            errors.push(ConfigError::NotFinite { field, value });
        }
    }

    // NaN fails every comparison, so the range checks below skip it.
    if config.min_sample_spacing <= 0.0 {
        errors.push(ConfigError::SampleSpacing(config.min_sample_spacing));
    }
    if config.fade_duration <= 0.0 {
        errors.push(ConfigError::FadeDuration(config.fade_duration));
    }
    if config.max_trail_length <= 0.0 {
        errors.push(ConfigError::MaxTrailLength(config.max_trail_length));
    }
    if config.close_distance <= 0.0 {
        errors.push(ConfigError::CloseDistance(config.close_distance));
    }
    if config.segment_skip_count < 1 {
        errors.push(ConfigError::SegmentSkipCount);
    }
    if config.flash_duration < 0.0 {
        errors.push(ConfigError::FlashDuration(config.flash_duration));
    }

    errors
}
