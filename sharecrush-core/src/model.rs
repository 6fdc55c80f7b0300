//! The persisted compression model: empirical samples grouped by platform
//! and codec.
//!
//! The on-disk format is a JSON mapping of platform name to codec name to a
//! list of samples, matching the model files produced by earlier runs. A
//! whole table is loaded at startup and rewritten after a builder run;
//! buckets for other platforms or codecs are carried through untouched.

use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One empirical observation of a platform re-encode.
///
/// Immutable after creation; samples are only ever appended to a bucket,
/// never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub original_res: Resolution,
    pub target_res: Resolution,
    pub crf: u8,
    pub profile: String,
    pub source_file: String,
}

/// Mapping of platform -> codec -> samples, persisted as the model artifact.
///
/// `BTreeMap` keeps platform and codec keys in a stable order so that
/// loading and immediately saving a table reproduces an equivalent
/// document. Sample order within a bucket is append order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleTable {
    buckets: BTreeMap<String, BTreeMap<String, Vec<Sample>>>,
}

impl SampleTable {
    /// Loads a table from `path`. A missing file is an error; use
    /// [`SampleTable::load_or_default`] when starting a fresh model.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::Model(format!(
                "model file not found at '{}'",
                path.display()
            )));
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a table from `path`, falling back to an empty table when the
    /// file does not exist yet.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        if path.is_file() {
            log::info!(
                "Loading existing model from '{}' to append data",
                path.display()
            );
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes the whole table to `path` as indented JSON, creating parent
    /// directories as needed and overwriting any previous file.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Returns the samples recorded for a (platform, codec) pair, if any.
    pub fn bucket(&self, platform: &str, codec: &str) -> Option<&[Sample]> {
        self.buckets
            .get(platform)
            .and_then(|codecs| codecs.get(codec))
            .map(Vec::as_slice)
    }

    /// Number of samples in a (platform, codec) bucket.
    pub fn bucket_len(&self, platform: &str, codec: &str) -> usize {
        self.bucket(platform, codec).map_or(0, <[Sample]>::len)
    }

    /// Appends samples to the (platform, codec) bucket, creating the bucket
    /// if it does not exist. Existing samples (including those of other
    /// buckets) are preserved.
    pub fn append<I>(&mut self, platform: &str, codec: &str, samples: I)
    where
        I: IntoIterator<Item = Sample>,
    {
        let bucket = self
            .buckets
            .entry(platform.to_string())
            .or_default()
            .entry(codec.to_string())
            .or_default();
        bucket.extend(samples);
    }

    /// True when no bucket holds any sample.
    pub fn is_empty(&self) -> bool {
        self.buckets
            .values()
            .all(|codecs| codecs.values().all(Vec::is_empty))
    }
}
