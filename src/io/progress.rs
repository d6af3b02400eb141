//! Per-stage progress bars for mosaic builds

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt;
use std::sync::LazyLock;

/// Long-running build stages that report progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Decoding and normalizing tile images
    LoadTiles,
    /// Matching source samples and placing tiles
    Compose,
}

impl Stage {
    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::LoadTiles => "tiles",
            Self::Compose => "mosaic",
        }
    }

    const fn unit(self) -> &'static str {
        match self {
            Self::LoadTiles => "files",
            Self::Compose => "rows",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>7}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for the stages of one build
///
/// A hidden manager hands out bars that draw nothing, so callers never need
/// to branch on whether progress is shown.
pub struct ProgressManager {
    multi_progress: MultiProgress,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
        }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    /// Whether bars from this manager are drawn
    pub fn is_hidden(&self) -> bool {
        self.multi_progress.is_hidden()
    }

    /// Add a bar for `stage` expecting `len` steps
    pub fn start_stage(&self, stage: Stage, len: usize) -> ProgressBar {
        let bar = ProgressBar::new(len as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(stage.label());
        bar.set_message(stage.unit());
        self.multi_progress.add(bar)
    }

    /// Mark `stage` complete and remove its bar
    pub fn finish_stage(&self, bar: &ProgressBar, stage: Stage) {
        bar.finish_with_message(format!("{} done", stage.unit()));
        self.multi_progress.remove(bar);
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
