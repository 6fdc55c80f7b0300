//! Core library for emulating how social platforms re-encode uploaded
//! video, using ffmpeg and ffprobe.
//!
//! Two pipelines share one data model and one encoding collaborator. The
//! model builder observes (original, platform-shared) video pairs, finds
//! the CRF that reproduces each observed target bitrate, and accumulates
//! the results into a persistent sample table keyed by platform and codec.
//! The model applicator matches new videos against that table by nearest
//! resolution and requests matching re-encodes.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sharecrush_core::{ApplyConfig, Platform, apply_model};
//! use sharecrush_core::external::{FfmpegEncoder, FfprobeProber};
//! use std::path::PathBuf;
//!
//! let config = ApplyConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//!     Platform::Youtube,
//! );
//!
//! let outcome = apply_model(&FfprobeProber::new(), &FfmpegEncoder::new(), &config, None).unwrap();
//! println!("{} encoded, {} skipped", outcome.encoded, outcome.skipped);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod matching;
pub mod model;
pub mod processing;
pub mod resolution;
pub mod search;

// Re-exports for public API
pub use config::{ApplyConfig, BuildConfig, Platform};
pub use error::{CoreError, CoreResult};
pub use external::{EncodeRequest, MetadataProber, VideoEncoder, VideoMetadata, check_external_tools};
pub use matching::{EmulationParams, closest_resolution, derive_emulation_params};
pub use model::{Sample, SampleTable};
pub use processing::{ApplyOutcome, BuildOutcome, apply_model, build_model};
pub use resolution::Resolution;
pub use search::{SearchTarget, find_matching_crf};
