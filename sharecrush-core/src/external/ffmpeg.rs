//! FFmpeg integration for scale+re-encode requests.
//!
//! Builds and runs one blocking ffmpeg invocation per [`EncodeRequest`]
//! using `ffmpeg-sidecar`, collecting stderr output for diagnostics. The
//! caller decides whether a failed encode aborts or skips.

use crate::error::{CoreError, CoreResult};
use crate::external::{EncodeRequest, VideoEncoder};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

/// [`VideoEncoder`] implementation backed by the ffmpeg CLI.
#[derive(Debug, Clone, Default)]
pub struct FfmpegEncoder;

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn encode(&self, request: &EncodeRequest<'_>) -> CoreResult<()> {
        if let Some(parent) = request.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let scale = format!(
            "scale={}:{}",
            request.resolution.width, request.resolution.height
        );

        let mut cmd = FfmpegCommand::new();
        cmd.arg("-hide_banner")
            .overwrite()
            .input(request.input.to_string_lossy())
            .args(["-vf", &scale])
            .args(["-c:v", request.codec])
            .args(["-crf", &request.crf.to_string()])
            .args(["-profile:v", request.profile])
            .args(["-pix_fmt", request.pix_fmt])
            .output(request.output.to_string_lossy());

        log::debug!(
            "Encoding {} -> {} ({} crf {} profile {} pix_fmt {})",
            request.input.display(),
            request.output.display(),
            request.resolution,
            request.crf,
            request.profile,
            request.pix_fmt
        );

        let mut child = cmd
            .spawn()
            .map_err(|e| CoreError::CommandStart("ffmpeg".to_string(), e))?;

        // Collect error-level output for the failure message.
        let mut stderr_buffer = String::new();
        let events = child.iter().map_err(|e| {
            CoreError::CommandFailed(
                "ffmpeg".to_string(),
                format!("failed to get event iterator: {e}"),
            )
        })?;
        for event in events {
            match event {
                FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => {
                    stderr_buffer.push_str(&message);
                    stderr_buffer.push('\n');
                }
                FfmpegEvent::Error(error) => {
                    stderr_buffer.push_str(&error);
                    stderr_buffer.push('\n');
                }
                _ => {}
            }
        }

        let status = child.wait()?;

        if !status.success() {
            let detail = if stderr_buffer.is_empty() {
                format!("exited with status {status}")
            } else {
                format!("exited with status {status}:\n{}", stderr_buffer.trim())
            };
            log::error!("ffmpeg failed on {}: {detail}", request.input.display());
            return Err(CoreError::CommandFailed("ffmpeg".to_string(), detail));
        }

        log::debug!("Encode finished: {}", request.output.display());
        Ok(())
    }
}
