//! Session configuration.
//!
//! A session is configured at startup by providing:
//! - `NumberRange`: the bounds secrets are drawn from
//! - pacing: the delay before each announcement and before listening
//! - seed: optional, for reproducible sequences
//!
//! `SessionConfig` is plain data and can be deserialized from any serde
//! format. It is validated once, when the session is built; notification
//! callbacks are supplied separately as [`Handlers`](crate::events::Handlers).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::range::IntegerRange;

/// Default pacing interval in milliseconds.
pub const DEFAULT_PACING_MS: u64 = 1000;

/// Unvalidated `{min, max}` bounds as they appear in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: i32,
    pub max: i32,
}

impl Default for NumberRange {
    fn default() -> Self {
        Self { min: 0, max: 9 }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Bounds for secrets, inclusive on both ends.
    pub number_range: NumberRange,

    /// Delay before each announcement and before listening starts.
    pub pacing_ms: u64,

    /// RNG seed. `None` draws one from OS entropy per session.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            number_range: NumberRange::default(),
            pacing_ms: DEFAULT_PACING_MS,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create a configuration for secrets in `min..=max` with default pacing.
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            number_range: NumberRange { min, max },
            ..Self::default()
        }
    }

    /// Set the pacing interval.
    ///
    /// Sub-millisecond precision is truncated.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing_ms = u64::try_from(pacing.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the pacing interval in milliseconds.
    #[must_use]
    pub fn with_pacing_ms(mut self, pacing_ms: u64) -> Self {
        self.pacing_ms = pacing_ms;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The pacing interval as a `Duration`.
    #[must_use]
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Check the configuration and return the validated range.
    pub fn validate(&self) -> Result<IntegerRange, ConfigError> {
        if self.pacing_ms == 0 {
            return Err(ConfigError::ZeroPacing);
        }
        IntegerRange::new(self.number_range.min, self.number_range.max)
    }
}
