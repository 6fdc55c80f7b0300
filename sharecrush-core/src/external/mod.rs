//! Interactions with external CLI tools (ffmpeg, ffprobe).
//!
//! The pipelines only ever talk to the probe and encoder through the
//! [`MetadataProber`] and [`VideoEncoder`] traits, so the search and
//! matching logic can be exercised in tests with fakes instead of a real
//! encoder. The default implementations use the `ffprobe` and
//! `ffmpeg-sidecar` crates.

use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

pub mod ffmpeg;
pub mod ffprobe;

pub use ffmpeg::FfmpegEncoder;
pub use ffprobe::FfprobeProber;

/// Probed facts about one video file. Recomputed per file, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub resolution: Resolution,
    /// Video stream bitrate in bits per second, 0 when the container does
    /// not report one.
    pub bitrate: u64,
    pub frame_rate: f64,
    pub pix_fmt: String,
    pub codec: String,
    pub profile: String,
}

/// Extracts [`VideoMetadata`] from a video container.
pub trait MetadataProber {
    fn probe(&self, path: &Path) -> CoreResult<VideoMetadata>;
}

/// One scale+re-encode request handed to the encoder collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeRequest<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub resolution: Resolution,
    pub crf: u8,
    pub codec: &'a str,
    pub profile: &'a str,
    pub pix_fmt: &'a str,
}

/// Performs a scale+re-encode, writing the output file (and any needed
/// parent directories) at the requested destination.
pub trait VideoEncoder {
    fn encode(&self, request: &EncodeRequest<'_>) -> CoreResult<()>;
}

/// Checks that a required external command is available and executable by
/// running it with `-version`.
pub(crate) fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Verifies that ffmpeg and ffprobe are both on the PATH.
pub fn check_external_tools() -> CoreResult<()> {
    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    Ok(())
}
