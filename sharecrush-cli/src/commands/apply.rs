// sharecrush-cli/src/commands/apply.rs
//
// The 'apply' subcommand: emulate the modeled compression on a video tree.

use crate::cli::ApplyArgs;
use crate::progress::BatchProgress;
use sharecrush_core::external::{FfmpegEncoder, FfprobeProber};
use sharecrush_core::{ApplyConfig, CoreResult, apply_model};

pub fn run(args: ApplyArgs) -> CoreResult<()> {
    let mut config = ApplyConfig::new(args.input_dir, args.output_dir, args.platform);
    config.codec = args.codec;
    config.model_path = args.model_file;

    let prober = FfprobeProber::new();
    let encoder = FfmpegEncoder::new();

    let mut progress = BatchProgress::new("Compressing");
    let mut on_file = |index: usize, total: usize, path: &std::path::Path| {
        progress.update(index, total, path);
    };

    let outcome = apply_model(&prober, &encoder, &config, Some(&mut on_file))?;
    progress.finish();

    println!(
        "Compression emulation complete: {} encoded, {} skipped. Outputs under {}",
        outcome.encoded,
        outcome.skipped,
        config.output_dir.display()
    );
    Ok(())
}
