// sharecrush-cli/src/commands/build.rs
//
// The 'build' subcommand: analyze original/shared pairs and grow the model.

use crate::cli::BuildArgs;
use crate::progress::BatchProgress;
use sharecrush_core::external::{FfmpegEncoder, FfprobeProber};
use sharecrush_core::{BuildConfig, CoreResult, build_model};

pub fn run(args: BuildArgs) -> CoreResult<()> {
    let mut config = BuildConfig::new(args.originals_dir, args.socials_dir, args.platform);
    config.codec = args.codec;
    config.model_path = args.model_file;
    config.crf_min = args.crf_min;
    config.crf_max = args.crf_max;

    let prober = FfprobeProber::new();
    let encoder = FfmpegEncoder::new();

    let mut progress = BatchProgress::new("Analyzing");
    let mut on_file = |index: usize, total: usize, path: &std::path::Path| {
        progress.update(index, total, path);
    };

    let outcome = build_model(&prober, &encoder, &config, Some(&mut on_file))?;
    progress.finish();

    println!(
        "Added {} new samples ({} skipped). Total for {}/{}: {}. Model saved to {}",
        outcome.added,
        outcome.skipped,
        config.platform,
        config.codec,
        outcome.total_in_bucket,
        config.model_path.display()
    );
    Ok(())
}
