//! Model applicator pipeline: emulate the learned degradation on a
//! directory tree of videos.

use crate::config::ApplyConfig;
use crate::discovery::find_videos_recursive;
use crate::error::{CoreError, CoreResult};
use crate::external::{EncodeRequest, MetadataProber, VideoEncoder};
use crate::matching::derive_emulation_params;
use crate::model::SampleTable;
use crate::processing::ProgressFn;

/// Output pixel format policy: emulated uploads are always written as
/// yuv420p, matching what the modeled platforms serve.
pub const OUTPUT_PIX_FMT: &str = "yuv420p";

/// Counts from one applicator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub encoded: usize,
    pub skipped: usize,
}

/// Runs the model applicator: for every video under the input directory,
/// resolve output parameters from the sample table and request an encode,
/// preserving the relative directory layout under the output root.
///
/// A missing model file or an empty (platform, codec) bucket aborts the
/// run; per-file problems are reported and skipped.
pub fn apply_model(
    prober: &dyn MetadataProber,
    encoder: &dyn VideoEncoder,
    config: &ApplyConfig,
    mut progress: Option<ProgressFn<'_>>,
) -> CoreResult<ApplyOutcome> {
    config.validate()?;

    let platform_key = config.platform.to_string();
    let table = SampleTable::load(&config.model_path).map_err(|e| {
        CoreError::Model(format!("{e}; run 'sharecrush build' first to create a model"))
    })?;

    let samples = table
        .bucket(&platform_key, &config.codec)
        .filter(|bucket| !bucket.is_empty())
        .ok_or_else(|| CoreError::EmptyBucket {
            platform: platform_key.clone(),
            codec: config.codec.clone(),
        })?;

    let videos = find_videos_recursive(&config.input_dir)?;
    log::info!(
        "Found {} videos under {}",
        videos.len(),
        config.input_dir.display()
    );

    let total = videos.len();
    let mut encoded = 0usize;
    let mut skipped = 0usize;

    for (index, video_path) in videos.iter().enumerate() {
        if let Some(cb) = progress.as_mut() {
            cb(index + 1, total, video_path);
        }

        let meta = match prober.probe(video_path) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!(
                    "Could not read metadata for {}: {e}, skipping.",
                    video_path.display()
                );
                skipped += 1;
                continue;
            }
        };

        let params = match derive_emulation_params(meta.resolution, samples, config.platform) {
            Ok(params) => params,
            Err(e) => {
                log::warn!(
                    "No compression rule for {} ({}): {e}, skipping.",
                    video_path.display(),
                    meta.resolution
                );
                skipped += 1;
                continue;
            }
        };

        // Mirror the input tree under the output root.
        let relative = video_path
            .strip_prefix(&config.input_dir)
            .unwrap_or(video_path);
        let output_path = config.output_dir.join(relative);

        let request = EncodeRequest {
            input: video_path,
            output: &output_path,
            resolution: params.target_resolution,
            crf: params.crf,
            codec: &config.codec,
            profile: &params.profile,
            pix_fmt: OUTPUT_PIX_FMT,
        };
        match encoder.encode(&request) {
            Ok(()) => encoded += 1,
            Err(e) => {
                log::warn!("Encode failed for {}: {e}, skipping.", video_path.display());
                skipped += 1;
            }
        }
    }

    log::info!("Compression emulation complete: {encoded} encoded, {skipped} skipped.");
    Ok(ApplyOutcome { encoded, skipped })
}
