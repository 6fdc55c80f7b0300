// sharecrush-cli/src/progress.rs
//
// Progress bar shared by the build and apply batch loops.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Per-file progress display. The bar is created lazily on the first
/// callback, once the total file count is known.
pub struct BatchProgress {
    bar: Option<ProgressBar>,
    label: &'static str,
}

impl BatchProgress {
    pub fn new(label: &'static str) -> Self {
        Self { bar: None, label }
    }

    /// Callback handed to the core pipelines.
    pub fn update(&mut self, index: usize, total: usize, path: &Path) {
        let bar = self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    "{prefix} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
                )
                .expect("valid progress template")
                .progress_chars("=>-"),
            );
            bar.set_prefix(self.label);
            bar
        });
        if let Some(name) = path.file_name() {
            bar.set_message(name.to_string_lossy().into_owned());
        }
        bar.set_position(index as u64);
    }

    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
