//! File discovery for both pipelines.
//!
//! The model builder pairs videos by exact filename, so its social-videos
//! side is a flat scan of one directory. The model applicator walks its
//! input tree recursively. Both return paths sorted so runs are
//! reproducible.

use crate::error::CoreResult;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn is_mp4(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}

/// Finds .mp4 files (case-insensitive) in the top level of `dir` only.
pub fn find_social_videos(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            (path.is_file() && is_mp4(&path)).then_some(path)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Finds .mp4 files (case-insensitive) anywhere under `dir`.
pub fn find_videos_recursive(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() && is_mp4(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
