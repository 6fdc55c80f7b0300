//! Model builder pipeline: observe (original, shared) pairs and grow the
//! sample table.
//!
//! Pairs are matched by exact filename between the two directory trees.
//! Every per-pair failure (missing original, unreadable metadata, a
//! failed encode or probe inside the CRF search, a zero target bitrate)
//! is reported and skipped so one bad pair cannot sink a long batch run.

use crate::config::BuildConfig;
use crate::discovery::find_social_videos;
use crate::error::CoreResult;
use crate::external::{MetadataProber, VideoEncoder};
use crate::model::{Sample, SampleTable};
use crate::processing::ProgressFn;
use crate::search::{SearchTarget, find_matching_crf};

/// Counts from one builder run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Samples appended by this run.
    pub added: usize,
    /// Social videos skipped with a diagnostic.
    pub skipped: usize,
    /// Bucket size after the run, including pre-existing samples.
    pub total_in_bucket: usize,
}

/// Runs the model builder: discovers pairs, searches a CRF per pair, and
/// merges the new samples into the persisted table.
pub fn build_model(
    prober: &dyn MetadataProber,
    encoder: &dyn VideoEncoder,
    config: &BuildConfig,
    mut progress: Option<ProgressFn<'_>>,
) -> CoreResult<BuildOutcome> {
    config.validate()?;

    let platform_key = config.platform.to_string();
    log::info!(
        "Analyzing platform: {platform_key}, codec: {}",
        config.codec
    );

    let mut table = SampleTable::load_or_default(&config.model_path)?;

    let social_videos = find_social_videos(&config.socials_dir)?;
    log::info!(
        "Found {} social videos in {}",
        social_videos.len(),
        config.socials_dir.display()
    );

    let total = social_videos.len();
    let mut new_samples: Vec<Sample> = Vec::new();
    let mut skipped = 0usize;

    for (index, social_path) in social_videos.iter().enumerate() {
        if let Some(cb) = progress.as_mut() {
            cb(index + 1, total, social_path);
        }

        let Some(file_name) = social_path.file_name() else {
            log::warn!("Skipping '{}': no file name", social_path.display());
            skipped += 1;
            continue;
        };
        let file_name = file_name.to_string_lossy().into_owned();

        let original_path = config.originals_dir.join(&file_name);
        if !original_path.is_file() {
            log::warn!("Missing original for {file_name}, skipping.");
            skipped += 1;
            continue;
        }

        let original_meta = match prober.probe(&original_path) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("Could not read metadata for {file_name} (original): {e}, skipping.");
                skipped += 1;
                continue;
            }
        };
        let social_meta = match prober.probe(social_path) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("Could not read metadata for {file_name} (shared): {e}, skipping.");
                skipped += 1;
                continue;
            }
        };

        let target = SearchTarget::from_metadata(&social_meta, &config.codec);
        let crf = match find_matching_crf(
            encoder,
            prober,
            &original_path,
            &target,
            config.crf_min,
            config.crf_max,
        ) {
            Ok(crf) => crf,
            Err(e) => {
                log::warn!("CRF search failed for {file_name}: {e}, skipping.");
                skipped += 1;
                continue;
            }
        };

        log::info!(
            "{file_name}: {} -> {} at CRF {crf}",
            original_meta.resolution,
            social_meta.resolution
        );
        new_samples.push(Sample {
            original_res: original_meta.resolution,
            target_res: social_meta.resolution,
            crf,
            profile: social_meta.profile,
            source_file: file_name,
        });
    }

    let added = new_samples.len();
    table.append(&platform_key, &config.codec, new_samples);
    table.save(&config.model_path)?;

    let total_in_bucket = table.bucket_len(&platform_key, &config.codec);
    log::info!(
        "Added {added} new samples; {total_in_bucket} total for {platform_key}/{} in '{}'",
        config.codec,
        config.model_path.display()
    );

    Ok(BuildOutcome {
        added,
        skipped,
        total_in_bucket,
    })
}
