use std::fmt;
use std::path::PathBuf;

use image::RgbaImage;

use crate::pipeline::PipelineStage;

/// A point in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One raw photograph of a sample.
#[derive(Clone, Debug)]
pub struct Frame {
    pub path: PathBuf,
    /// Position of the frame in the sorted sequence.
    pub index: usize,
    /// Elapsed time in hours.
    pub label: i64,
}

impl Frame {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Height, width and channel count of an image, printed as `(h, w, ch)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageShape {
    pub height: u32,
    pub width: u32,
    pub channels: u8,
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.height, self.width, self.channels)
    }
}

/// A frame with its background erased, ready for alignment.
#[derive(Clone, Debug)]
pub struct ErasedFrame {
    pub index: usize,
    pub image: RgbaImage,
    pub source_shape: ImageShape,
}

/// A de-skewed frame. Lives only until its crop is extracted.
#[derive(Clone, Debug)]
pub struct AlignedFrame {
    pub index: usize,
    /// Rotated image, same size as the source.
    pub image: RgbaImage,
    /// Rotation center in pixel coordinates.
    pub center: (i32, i32),
    /// Corners of the sample's bounding rectangle after rotation.
    pub corners: [Point2; 4],
    /// Applied rotation in degrees.
    pub angle_deg: f64,
    pub source_shape: ImageShape,
}

/// Final output image for one frame.
#[derive(Clone, Debug)]
pub struct CroppedFrame {
    pub index: usize,
    pub label: i64,
    pub path: PathBuf,
    pub shape: ImageShape,
    pub source_shape: ImageShape,
}

/// A frame that dropped out of the pipeline, with the stage and reason.
#[derive(Clone, Debug)]
pub struct FrameFailure {
    pub index: usize,
    pub file_name: String,
    pub stage: PipelineStage,
    pub reason: String,
}
