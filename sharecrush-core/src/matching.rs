//! Nearest-resolution lookup against the sample table.
//!
//! Given the resolution of a new video and the samples recorded for one
//! (platform, codec) bucket, this module selects the output resolution and
//! quality parameter that best reproduce the platform's observed behavior.

use crate::config::Platform;
use crate::error::{CoreError, CoreResult};
use crate::model::Sample;
use crate::resolution::Resolution;

/// The derived output contract for one input video. Computed fresh per
/// video, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulationParams {
    pub target_resolution: Resolution,
    pub crf: u8,
    pub profile: String,
}

/// Selects the candidate whose pixel area is closest to `query`.
///
/// Ties are broken deterministically: smallest `|area(query) - area(c)|`
/// first, then smaller area, then smaller width. The result therefore does
/// not depend on the order of `candidates`.
pub fn closest_resolution(query: Resolution, candidates: &[Resolution]) -> Option<Resolution> {
    let query_area = query.area();
    candidates
        .iter()
        .copied()
        .min_by_key(|c| (query_area.abs_diff(c.area()), c.area(), c.width))
}

/// Derives the emulation parameters for a video of resolution `query` from
/// the samples of one bucket.
///
/// 1. Pick the known `original_res`: an exact match wins, otherwise the
///    nearest by pixel area (see [`closest_resolution`]).
/// 2. The first sample (in table order) with that `original_res` supplies
///    the output resolution.
/// 3. The CRF is the truncated mean over every sample in the bucket whose
///    `target_res` equals the output resolution, regardless of its
///    `original_res`; the smoothing across sources is deliberate.
/// 4. The profile comes from platform policy alone.
///
/// A failure here means no rule applies to this video; callers skip the
/// video with a diagnostic rather than aborting.
pub fn derive_emulation_params(
    query: Resolution,
    samples: &[Sample],
    platform: Platform,
) -> CoreResult<EmulationParams> {
    if samples.is_empty() {
        return Err(CoreError::NoMatchingRule(
            "sample collection is empty".to_string(),
        ));
    }

    // Distinct original resolutions, first-encountered order.
    let mut known: Vec<Resolution> = Vec::new();
    for sample in samples {
        if !known.contains(&sample.original_res) {
            known.push(sample.original_res);
        }
    }

    let chosen_input = if known.contains(&query) {
        query
    } else {
        closest_resolution(query, &known).ok_or_else(|| {
            CoreError::NoMatchingRule(format!("no known resolution close to {query}"))
        })?
    };

    // All samples sharing an input resolution are assumed to agree on the
    // target resolution; the first one in table order decides.
    let target_resolution = samples
        .iter()
        .find(|s| s.original_res == chosen_input)
        .map(|s| s.target_res)
        .ok_or_else(|| {
            CoreError::NoMatchingRule(format!("no sample recorded for {chosen_input}"))
        })?;

    let crf_values: Vec<u32> = samples
        .iter()
        .filter(|s| s.target_res == target_resolution)
        .map(|s| u32::from(s.crf))
        .collect();
    if crf_values.is_empty() {
        return Err(CoreError::NoMatchingRule(format!(
            "no CRF values recorded for target resolution {target_resolution}"
        )));
    }
    let mean_crf = (crf_values.iter().sum::<u32>() / crf_values.len() as u32) as u8;

    Ok(EmulationParams {
        target_resolution,
        crf: mean_crf,
        profile: platform.profile().to_string(),
    })
}
