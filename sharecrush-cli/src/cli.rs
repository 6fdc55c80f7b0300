// sharecrush-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use sharecrush_core::config::{DEFAULT_CODEC, DEFAULT_CRF_MAX, DEFAULT_CRF_MIN, DEFAULT_MODEL_FILE};
use sharecrush_core::{CoreError, Platform};
use std::path::PathBuf;

fn parse_platform(s: &str) -> Result<Platform, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "sharecrush: social-platform re-encode emulator",
    long_about = "Builds an empirical compression model from (original, platform-shared) \
                  video pairs and applies it to emulate the same degradation on new videos, \
                  using ffmpeg and ffprobe."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyzes original/shared video pairs and appends samples to the model
    Build(BuildArgs),
    /// Applies the model to a directory tree of videos
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Directory holding the original uploads
    #[arg(long = "originals-dir", required = true, value_name = "DIR")]
    pub originals_dir: PathBuf,

    /// Directory holding the platform-shared copies (searched non-recursively)
    #[arg(long = "socials-dir", required = true, value_name = "DIR")]
    pub socials_dir: PathBuf,

    /// Platform to analyze (Youtube or Facebook)
    #[arg(long, required = true, value_name = "PLATFORM", value_parser = parse_platform)]
    pub platform: Platform,

    /// Codec to analyze
    #[arg(long, value_name = "CODEC", default_value = DEFAULT_CODEC)]
    pub codec: String,

    /// Path of the model file to create or append to
    #[arg(long = "model-file", value_name = "FILE", default_value = DEFAULT_MODEL_FILE)]
    pub model_file: PathBuf,

    /// Minimum CRF to search
    #[arg(long = "crf-min", value_name = "CRF", default_value_t = DEFAULT_CRF_MIN)]
    pub crf_min: u8,

    /// Maximum CRF to search
    #[arg(long = "crf-max", value_name = "CRF", default_value_t = DEFAULT_CRF_MAX)]
    pub crf_max: u8,
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Directory of videos to compress (searched recursively)
    #[arg(long = "input-dir", required = true, value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory to save compressed videos, mirroring the input layout
    #[arg(long = "output-dir", required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Target platform (Youtube, Facebook or other)
    #[arg(long, required = true, value_name = "PLATFORM", value_parser = parse_platform)]
    pub platform: Platform,

    /// Target codec (must match the model)
    #[arg(long, value_name = "CODEC", default_value = DEFAULT_CODEC)]
    pub codec: String,

    /// Path of the model file to read
    #[arg(long = "model-file", value_name = "FILE", default_value = DEFAULT_MODEL_FILE)]
    pub model_file: PathBuf,
}
