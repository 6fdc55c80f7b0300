//! Bounded linear CRF search against an observed target bitrate.
//!
//! The search assumes the encoder is monotonic over the scanned range
//! (higher CRF, lower bitrate) and stops at the first candidate whose
//! re-encoded bitrate drops below the target. The assumption is not
//! verified here; the test suite checks it against the encoder in use
//! before the early exit can be trusted.

use crate::error::{CoreError, CoreResult};
use crate::external::{EncodeRequest, MetadataProber, VideoEncoder, VideoMetadata};
use crate::resolution::Resolution;
use std::path::Path;
use tempfile::Builder as TempFileBuilder;

/// What a search candidate must reproduce: the shared copy's bitrate at its
/// resolution/codec/profile/pixel format.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTarget {
    pub bitrate: u64,
    pub resolution: Resolution,
    pub codec: String,
    pub profile: String,
    pub pix_fmt: String,
}

impl SearchTarget {
    /// Builds a search target from the probed metadata of a platform-shared
    /// video, overriding the codec with the one being modeled.
    pub fn from_metadata(meta: &VideoMetadata, codec: &str) -> Self {
        Self {
            bitrate: meta.bitrate,
            resolution: meta.resolution,
            codec: codec.to_string(),
            profile: meta.profile.clone(),
            pix_fmt: meta.pix_fmt.clone(),
        }
    }
}

/// Finds the smallest CRF in `[crf_min, crf_max]` whose re-encode of
/// `original` lands strictly below the target bitrate, or `crf_max` when no
/// candidate does.
///
/// Every candidate encode goes to a scratch file inside a temporary
/// directory scoped to this search; the directory is removed whichever
/// iteration ends the loop. Encode or probe failures are returned as
/// errors for the caller to convert into a per-pair skip.
pub fn find_matching_crf(
    encoder: &dyn VideoEncoder,
    prober: &dyn MetadataProber,
    original: &Path,
    target: &SearchTarget,
    crf_min: u8,
    crf_max: u8,
) -> CoreResult<u8> {
    if crf_min > crf_max {
        return Err(CoreError::Config(format!(
            "invalid CRF range: min {crf_min} > max {crf_max}"
        )));
    }
    if target.bitrate == 0 {
        return Err(CoreError::ZeroTargetBitrate(
            original.display().to_string(),
        ));
    }

    let scratch = TempFileBuilder::new().prefix("sharecrush_crf_").tempdir()?;
    let candidate_path = scratch.path().join("candidate.mp4");

    for crf in crf_min..=crf_max {
        encoder.encode(&EncodeRequest {
            input: original,
            output: &candidate_path,
            resolution: target.resolution,
            crf,
            codec: &target.codec,
            profile: &target.profile,
            pix_fmt: &target.pix_fmt,
        })?;

        let encoded = prober.probe(&candidate_path)?;
        log::debug!(
            "CRF {crf}: {} bps (target {} bps) for {}",
            encoded.bitrate,
            target.bitrate,
            original.display()
        );

        if encoded.bitrate < target.bitrate {
            return Ok(crf);
        }
    }

    // The most compressed candidate tested still sits above the target.
    Ok(crf_max)
}
