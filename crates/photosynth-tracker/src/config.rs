use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::label::PieceClasses;

/// Longest vote window a cell can hold.
pub const MAX_VOTE_WIDTH: usize = 8;

/// Thresholds deciding whether a cell's crop is trustworthy enough to use its label.
///
/// A crop is good when more than `min_active_fraction` of its pixels exceed
/// `pixel_threshold` in magnitude and more than `min_negative_fraction` of
/// those pixels are negative.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QualityConfig {
    pub min_active_fraction: f32,
    pub pixel_threshold: f32,
    pub min_negative_fraction: f32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_active_fraction: 0.06,
            pixel_threshold: 5.0,
            min_negative_fraction: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VoteConfig {
    /// Number of votes collected before the stabilized label may change.
    pub width: usize,
    /// Frames that only feed the votes before any output is produced.
    pub warmup_frames: usize,
}

impl Default for VoteConfig {
    fn default() -> Self {
        Self {
            width: 3,
            warmup_frames: 5,
        }
    }
}

/// Motion gate settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Delta-crop activity above which a cell counts as touched.
    pub activity_threshold: f32,
    /// Countdown a touched cell is armed with.
    pub hold_frames: u8,
    /// Most cells that may be touched in one frame before the whole frame is
    /// treated as a disturbance.
    pub max_triggered: usize,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            activity_threshold: 12.0,
            hold_frames: 4,
            max_triggered: 3,
        }
    }
}

/// Settings of the stabilizer and move extractor.
///
/// Every section is optional in the TOML file:
///
/// ```toml
/// classes = ["autumn + seed", "autumn + small", "winter + seed", "winter + small"]
///
/// [vote]
/// width = 5
///
/// [trigger]
/// activity_threshold = 10.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub quality: QualityConfig,
    pub vote: VoteConfig,
    pub trigger: TriggerConfig,
    pub classes: PieceClasses,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("failed to read config file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse config")]
    Parse { source: toml::de::Error },
    #[display("{key} must be {requirement}")]
    Invalid {
        key: &'static str,
        requirement: &'static str,
    },
}

impl PipelineConfig {
    /// Loads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key, requirement| Err(ConfigError::Invalid { key, requirement });

        let quality = &self.quality;
        if !(0.0..=1.0).contains(&quality.min_active_fraction) {
            return invalid("quality.min_active_fraction", "in [0, 1]");
        }
        if !(0.0..=1.0).contains(&quality.min_negative_fraction) {
            return invalid("quality.min_negative_fraction", "in [0, 1]");
        }
        if quality.pixel_threshold.is_nan() || quality.pixel_threshold < 0.0 {
            return invalid("quality.pixel_threshold", ">= 0");
        }
        if !(1..=MAX_VOTE_WIDTH).contains(&self.vote.width) {
            return invalid("vote.width", "in [1, 8]");
        }
        if self.trigger.activity_threshold.is_nan() || self.trigger.activity_threshold < 0.0 {
            return invalid("trigger.activity_threshold", ">= 0");
        }
        // the commit happens when the countdown reaches 1
        if self.trigger.hold_frames < 2 {
            return invalid("trigger.hold_frames", ">= 2");
        }
        Ok(())
    }
}

impl std::str::FromStr for PipelineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }
}
