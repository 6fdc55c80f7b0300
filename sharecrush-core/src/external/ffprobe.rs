//! FFprobe integration for extracting video stream metadata.
//!
//! Wraps the `ffprobe` crate and maps the first video stream of a container
//! into [`VideoMetadata`]. Fields the container does not report fall back to
//! the values the rest of the system assumes (bitrate 0, yuv420p, h264,
//! Main profile).

use crate::error::{CoreError, CoreResult};
use crate::external::{MetadataProber, VideoMetadata};
use crate::resolution::Resolution;
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

const DEFAULT_PIX_FMT: &str = "yuv420p";
const DEFAULT_CODEC: &str = "h264";
const DEFAULT_PROFILE: &str = "Main";

/// [`MetadataProber`] implementation backed by the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProber for FfprobeProber {
    fn probe(&self, path: &Path) -> CoreResult<VideoMetadata> {
        log::debug!("Running ffprobe on: {}", path.display());

        let metadata = ffprobe(path).map_err(|err| map_ffprobe_error(path, err))?;

        let video_stream = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| {
                CoreError::Probe(
                    path.display().to_string(),
                    "no video stream found".to_string(),
                )
            })?;

        let width = video_stream.width.ok_or_else(|| {
            CoreError::Probe(
                path.display().to_string(),
                "video stream missing width".to_string(),
            )
        })?;
        let height = video_stream.height.ok_or_else(|| {
            CoreError::Probe(
                path.display().to_string(),
                "video stream missing height".to_string(),
            )
        })?;
        if width <= 0 || height <= 0 {
            return Err(CoreError::Probe(
                path.display().to_string(),
                format!("invalid dimensions: width={width}, height={height}"),
            ));
        }
        let resolution = Resolution::new(width as u32, height as u32);

        // Streams without a reported bitrate probe as 0; callers decide
        // whether that is acceptable.
        let bitrate = video_stream
            .bit_rate
            .as_deref()
            .and_then(|b| b.parse::<u64>().ok())
            .unwrap_or(0);

        let frame_rate = parse_frame_rate(&video_stream.r_frame_rate).unwrap_or(0.0);

        Ok(VideoMetadata {
            width: width as u32,
            height: height as u32,
            resolution,
            bitrate,
            frame_rate,
            pix_fmt: video_stream
                .pix_fmt
                .clone()
                .unwrap_or_else(|| DEFAULT_PIX_FMT.to_string()),
            codec: video_stream
                .codec_name
                .clone()
                .unwrap_or_else(|| DEFAULT_CODEC.to_string()),
            profile: video_stream
                .profile
                .clone()
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
        })
    }
}

/// Parses an ffprobe rational frame rate such as "30000/1001" or "25/1".
fn parse_frame_rate(raw: &str) -> Option<f64> {
    match raw.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 { None } else { Some(num / den) }
        }
        None => raw.trim().parse::<f64>().ok(),
    }
}

fn map_ffprobe_error(path: &Path, err: FfProbeError) -> CoreError {
    log::error!("ffprobe failed on {}: {err:?}", path.display());
    match err {
        FfProbeError::Io(io_err) => CoreError::CommandStart("ffprobe".to_string(), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            CoreError::CommandFailed("ffprobe".to_string(), stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::Probe(
            path.display().to_string(),
            format!("output deserialization: {err}"),
        ),
        _ => CoreError::Probe(path.display().to_string(), format!("{err:?}")),
    }
}
