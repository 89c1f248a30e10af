//=========================================================================
// Session Configuration
//=========================================================================
//
// Static per-level settings for the timed challenge.
//
// Sources:
//   SessionConfig::new().with_*()   programmatic, panics on bad values
//   SessionConfig::from_toml_str()  data-driven, returns ConfigError
//   SessionConfig::load(path)       same, reading a file first
//
// Example TOML:
// ```toml
// start_threshold = 2.0
// time_limit_secs = 90
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

//=== SessionConfig =======================================================

/// Configuration of one timed scoring session.
///
/// # Default Values
///
/// - **start_threshold**: 0.0 (any movement starts the clock)
/// - **time_limit_secs**: 120
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Distance the character must travel from its spawn point before the
    /// clock starts. Must lie in `0.0..=5.0`.
    pub start_threshold: f32,

    /// Length of the challenge once started.
    pub time_limit_secs: u32,
}

impl SessionConfig {
    /// Largest accepted start threshold.
    pub const MAX_START_THRESHOLD: f32 = 5.0;

    /// Creates a config with default values.
    pub fn new() -> Self {
        Self {
            start_threshold: 0.0,
            time_limit_secs: 120,
        }
    }

    /// Sets the distance the character must move before timing begins.
    ///
    /// # Panics
    ///
    /// Panics if `distance` is outside `0.0..=5.0`.
    pub fn with_start_threshold(mut self, distance: f32) -> Self {
        assert!(
            (0.0..=Self::MAX_START_THRESHOLD).contains(&distance),
            "Start threshold must be within 0.0..=5.0, got {}",
            distance
        );
        self.start_threshold = distance;
        self
    }

    /// Sets the time limit in whole seconds.
    ///
    /// # Panics
    ///
    /// Panics if `secs == 0`.
    pub fn with_time_limit_secs(mut self, secs: u32) -> Self {
        assert!(secs > 0, "Time limit must be positive");
        self.time_limit_secs = secs;
        self
    }

    //--- Validation -------------------------------------------------------

    /// Checks the invariants the builder methods enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=Self::MAX_START_THRESHOLD).contains(&self.start_threshold) {
            return Err(ConfigError::StartThresholdOutOfRange(self.start_threshold));
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }

    //--- Loading ----------------------------------------------------------

    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&source)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=== ConfigError =========================================================

/// Errors produced while loading a [`SessionConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),

    /// The document is not valid TOML or has unexpected keys/types.
    Parse(toml::de::Error),

    /// `start_threshold` is negative, above 5.0, or NaN.
    StartThresholdOutOfRange(f32),

    /// `time_limit_secs` is zero.
    ZeroTimeLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read session config: {}", e),
            Self::Parse(e) => write!(f, "Invalid session config: {}", e),
            Self::StartThresholdOutOfRange(d) => {
                write!(f, "Start threshold must be within 0.0..=5.0, got {}", d)
            }
            Self::ZeroTimeLimit => write!(f, "Time limit must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
