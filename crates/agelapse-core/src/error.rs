use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Folder not found: {}", .0.display())]
    MissingFolder(PathBuf),

    #[error("No '{stem}' timeline file in {} or its parent", folder.display())]
    TimelineMissing { folder: PathBuf, stem: String },

    #[error("More than one timeline file in {}: {}", dir.display(), candidates.join(", "))]
    TimelineAmbiguous { dir: PathBuf, candidates: Vec<String> },

    #[error("Timeline {} has {rows} time points for {frames} frames", path.display())]
    TimelineTooShort {
        path: PathBuf,
        rows: usize,
        frames: usize,
    },

    #[error("Cannot parse timeline {}: {reason}", path.display())]
    TimelineParse { path: PathBuf, reason: String },

    #[error("Cannot read frame {}: {reason}", path.display())]
    LoadFailed { path: PathBuf, reason: String },

    #[error("Background eraser returned an empty image for frame {index} of '{sample}' (cycle {cycle})")]
    EraserEmpty {
        sample: String,
        index: usize,
        cycle: usize,
    },

    #[error("Eraser command failed: {0}")]
    EraserCommand(String),

    #[error("No contour larger than {min_area} px² in frame {index} of '{sample}'")]
    NoContour {
        sample: String,
        index: usize,
        min_area: f64,
    },

    #[error("Crop window is empty ({width}x{height})")]
    EmptyCrop { width: i64, height: i64 },

    #[error("Cannot write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error("Video error: {0}")]
    Video(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
