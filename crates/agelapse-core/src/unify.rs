//! One crop size per sample, so every output frame has the same dimensions.

use crate::error::{PipelineError, Result};
use crate::frame::Point2;

/// Bounds of one frame's box, centered on that frame's own rotation center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Shared crop bounds of a sample and the half-extents derived from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCropSpec {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub half_width: f64,
    pub half_height: f64,
}

/// Box of the rotated corners' width and height, re-centered on `center`.
pub fn frame_extent(corners: &[Point2; 4], center: (i32, i32)) -> FrameExtent {
    let (min_x, max_x) = span(corners.iter().map(|p| p.x));
    let (min_y, max_y) = span(corners.iter().map(|p| p.y));
    let half_w = (max_x - min_x) / 2.0;
    let half_h = (max_y - min_y) / 2.0;
    let (cx, cy) = (center.0 as f64, center.1 as f64);
    FrameExtent {
        x_min: cx - half_w,
        x_max: cx + half_w,
        y_min: cy - half_h,
        y_max: cy + half_h,
    }
}

/// Union of all frame extents: the smallest minima and largest maxima.
///
/// The half-extents cover every frame's box together with the drift of the
/// frame centers, which absorbs size jitter left by imperfect erasing.
pub fn unify(extents: &[FrameExtent]) -> Result<SampleCropSpec> {
    if extents.is_empty() {
        return Err(PipelineError::EmptySequence);
    }
    let (x_min, _) = span(extents.iter().map(|e| e.x_min));
    let (_, x_max) = span(extents.iter().map(|e| e.x_max));
    let (y_min, _) = span(extents.iter().map(|e| e.y_min));
    let (_, y_max) = span(extents.iter().map(|e| e.y_max));

    Ok(SampleCropSpec {
        x_min,
        x_max,
        y_min,
        y_max,
        half_width: (x_max - x_min) / 2.0,
        half_height: (y_max - y_min) / 2.0,
    })
}

fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
