use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::error::PipelineError;
use crate::frame::{CroppedFrame, Frame, FrameFailure};
use crate::io::discover::SortMode;
use crate::io::video::VideoSummary;
use crate::unify::SampleCropSpec;

/// Pipeline processing stage, used for progress reporting and failure records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Discover,
    ResolveTimeline,
    Sort,
    Load,
    Erase,
    Align,
    UnifyCrop,
    Crop,
    Assemble,
    Log,
    Done,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discover => write!(f, "Discovering frames"),
            Self::ResolveTimeline => write!(f, "Resolving timeline"),
            Self::Sort => write!(f, "Sorting frames"),
            Self::Load => write!(f, "Loading frames"),
            Self::Erase => write!(f, "Erasing background"),
            Self::Align => write!(f, "Aligning frames"),
            Self::UnifyCrop => write!(f, "Unifying crop size"),
            Self::Crop => write!(f, "Cropping"),
            Self::Assemble => write!(f, "Assembling video"),
            Self::Log => write!(f, "Writing log"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// Sample `index` of `total` is starting.
    fn begin_sample(&self, _name: &str, _index: usize, _total: usize) {}

    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}

    fn finish_sample(&self, _name: &str, _ok: bool) {}
}

pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Everything that happened to one sample.
#[derive(Debug)]
pub struct SampleRun {
    pub name: String,
    pub folder: PathBuf,
    pub output_dir: PathBuf,
    pub timeline: PathBuf,
    pub sort_mode: SortMode,
    /// Name of the eraser that ran.
    pub eraser: String,
    pub frames: Vec<Frame>,
    /// Widest time label, for aligned log columns.
    pub label_width: usize,
    /// `None` when no frame survived alignment.
    pub crop_spec: Option<SampleCropSpec>,
    pub cropped: Vec<CroppedFrame>,
    /// Ordered by frame index.
    pub failures: Vec<FrameFailure>,
    pub video: Option<VideoSummary>,
    pub video_error: Option<String>,
    pub started: DateTime<Local>,
    pub processing_time: Duration,
    pub total_time: Duration,
    pub log_path: Option<PathBuf>,
}

impl SampleRun {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.video_error.is_none()
    }
}

#[derive(Debug)]
pub enum SampleOutcome {
    Completed(SampleRun),
    /// The sample stopped before its frames were processed.
    Failed {
        name: String,
        folder: PathBuf,
        error: PipelineError,
    },
}

impl SampleOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Completed(run) => &run.name,
            Self::Failed { name, .. } => name,
        }
    }
}

/// Outcome of a whole batch, one entry per sample folder in discovery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub samples: Vec<SampleOutcome>,
}

impl BatchReport {
    pub fn completed(&self) -> impl Iterator<Item = &SampleRun> {
        self.samples.iter().filter_map(|s| match s {
            SampleOutcome::Completed(run) => Some(run),
            SampleOutcome::Failed { .. } => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| matches!(s, SampleOutcome::Failed { .. }))
            .count()
    }

    pub fn log_paths(&self) -> Vec<PathBuf> {
        self.completed()
            .filter_map(|run| run.log_path.clone())
            .collect()
    }
}
