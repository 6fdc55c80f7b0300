//! Configuration for the model builder and model applicator pipelines.

use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default codec analyzed and emulated when none is given.
pub const DEFAULT_CODEC: &str = "libx264";

/// Default location of the persisted sample table.
pub const DEFAULT_MODEL_FILE: &str = "compression_models.json";

/// Default inclusive CRF search range.
pub const DEFAULT_CRF_MIN: u8 = 20;
pub const DEFAULT_CRF_MAX: u8 = 51;

/// The social platform whose re-encode behavior is modeled or emulated.
///
/// `Display` yields the key used in the persisted sample table, so model
/// files stay interchangeable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Youtube,
    Facebook,
    Other,
}

impl Platform {
    /// Encoder profile forced by platform policy, independent of sample
    /// data: YouTube publishes "high", everything else "main".
    pub fn profile(self) -> &'static str {
        match self {
            Platform::Youtube => "high",
            Platform::Facebook | Platform::Other => "main",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Platform::Youtube => "Youtube",
            Platform::Facebook => "Facebook",
            Platform::Other => "other",
        };
        f.write_str(key)
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "facebook" => Ok(Platform::Facebook),
            "other" => Ok(Platform::Other),
            _ => Err(CoreError::Config(format!(
                "unknown platform '{s}' (expected Youtube, Facebook or other)"
            ))),
        }
    }
}

/// Configuration for one model builder run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the original uploads.
    pub originals_dir: PathBuf,
    /// Directory holding the platform-shared copies (flat, not recursive).
    pub socials_dir: PathBuf,
    pub platform: Platform,
    pub codec: String,
    /// Path of the persisted sample table to append to.
    pub model_path: PathBuf,
    /// Inclusive CRF search range.
    pub crf_min: u8,
    pub crf_max: u8,
}

impl BuildConfig {
    pub fn new(originals_dir: PathBuf, socials_dir: PathBuf, platform: Platform) -> Self {
        Self {
            originals_dir,
            socials_dir,
            platform,
            codec: DEFAULT_CODEC.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            crf_min: DEFAULT_CRF_MIN,
            crf_max: DEFAULT_CRF_MAX,
        }
    }

    /// Validates the configuration, returning an error describing the first
    /// problem found. Both source directories must already exist.
    pub fn validate(&self) -> CoreResult<()> {
        require_dir(&self.originals_dir, "originals directory")?;
        require_dir(&self.socials_dir, "socials directory")?;
        if self.platform == Platform::Other {
            return Err(CoreError::Config(
                "model building requires a concrete platform (Youtube or Facebook)".to_string(),
            ));
        }
        if self.crf_min > self.crf_max {
            return Err(CoreError::Config(format!(
                "invalid CRF range: min {} > max {}",
                self.crf_min, self.crf_max
            )));
        }
        Ok(())
    }
}

/// Configuration for one model applicator run.
#[derive(Debug, Clone)]
pub struct ApplyConfig {
    /// Directory of videos to emulate, searched recursively.
    pub input_dir: PathBuf,
    /// Root under which outputs are written, mirroring the input layout.
    pub output_dir: PathBuf,
    pub platform: Platform,
    pub codec: String,
    /// Path of the persisted sample table to read.
    pub model_path: PathBuf,
}

impl ApplyConfig {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, platform: Platform) -> Self {
        Self {
            input_dir,
            output_dir,
            platform,
            codec: DEFAULT_CODEC.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        require_dir(&self.input_dir, "input directory")
    }
}

fn require_dir(path: &Path, what: &str) -> CoreResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CoreError::Config(format!(
            "{what} not found: '{}'",
            path.display()
        )))
    }
}
