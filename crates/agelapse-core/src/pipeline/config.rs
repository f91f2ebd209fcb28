use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::align::AlignConfig;
use crate::consts::{
    DEFAULT_ERASE_CYCLES, DEFAULT_FRAME_RATE, DEFAULT_INPUT_EXTENSION, DEFAULT_OUTPUT_DIR,
    DEFAULT_TIMELINE_STEM,
};
use crate::erase::EraserConfig;
use crate::error::{PipelineError, Result};
use crate::io::timeline::Rounding;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    /// Folder holding the sample folders (or a single sample).
    #[serde(default)]
    pub root: PathBuf,
    /// Background-erasure passes per frame.
    #[serde(default = "default_cycles")]
    pub cycles: usize,
    /// Assemble the processed frames into a video.
    #[serde(default = "default_true")]
    pub film: bool,
    /// Open each sample's log when the batch finishes.
    #[serde(default)]
    pub open_logs: bool,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Raw frame extension, matched case-insensitively.
    #[serde(default = "default_input_extension")]
    pub input_extension: String,
    #[serde(default = "default_output_dir")]
    pub output_dir_name: String,
    /// Process only these sample folders; empty means all.
    #[serde(default)]
    pub only_samples: Vec<String>,
    /// Process frames of a sample in parallel.
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub alignment: AlignConfig,
    #[serde(default)]
    pub eraser: EraserConfig,
}

fn default_cycles() -> usize {
    DEFAULT_ERASE_CYCLES
}

fn default_true() -> bool {
    true
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_input_extension() -> String {
    DEFAULT_INPUT_EXTENSION.to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            cycles: default_cycles(),
            film: true,
            open_logs: false,
            frame_rate: default_frame_rate(),
            input_extension: default_input_extension(),
            output_dir_name: default_output_dir(),
            only_samples: Vec::new(),
            parallel: true,
            timeline: TimelineConfig::default(),
            alignment: AlignConfig::default(),
            eraser: EraserConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cycles == 0 {
            return Err(PipelineError::InvalidConfig(
                "cycles must be at least 1".into(),
            ));
        }
        if self.frame_rate == 0 {
            return Err(PipelineError::InvalidConfig(
                "frame_rate must be at least 1".into(),
            ));
        }
        if self.input_extension.trim_start_matches('.').is_empty() {
            return Err(PipelineError::InvalidConfig(
                "input_extension is empty".into(),
            ));
        }
        if self.output_dir_name.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "output_dir_name is empty".into(),
            ));
        }
        if self.timeline.file_stem.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "timeline.file_stem is empty".into(),
            ));
        }
        if !self.alignment.min_contour_area.is_finite() || self.alignment.min_contour_area < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "alignment.min_contour_area must be a non-negative number, got {}",
                self.alignment.min_contour_area
            )));
        }
        Ok(())
    }

    /// Extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.input_extension.trim_start_matches('.')
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// File name without extension, searched in the sample folder then its parent.
    #[serde(default = "default_timeline_stem")]
    pub file_stem: String,
    #[serde(default)]
    pub rounding: Rounding,
}

fn default_timeline_stem() -> String {
    DEFAULT_TIMELINE_STEM.to_string()
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            file_stem: default_timeline_stem(),
            rounding: Rounding::default(),
        }
    }
}
