use agelapse_core::pipeline::{PipelineStage, ProgressReporter};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Drives one indicatif bar from the pipeline's progress callbacks.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{prefix:.bold} {msg:20} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarReporter {
    fn begin_sample(&self, name: &str, index: usize, total: usize) {
        self.bar.set_prefix(format!("[{}/{}] {name}", index + 1, total));
    }

    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.bar.set_length(total_items.unwrap_or(0) as u64);
        self.bar.set_position(0);
        self.bar.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_sample(&self, name: &str, ok: bool) {
        let mark = if ok {
            Style::new().green().apply_to("done")
        } else {
            Style::new().yellow().apply_to("with errors")
        };
        self.bar.println(format!("  {name}: {mark}"));
    }
}
