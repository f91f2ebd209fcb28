use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{warp, Interpolation};
use imageproc::geometry::min_area_rect;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::frame::{AlignedFrame, ErasedFrame, Point2};

use super::config::AlignConfig;
use super::contour::{dominant_contour, intensity};
use super::geometry::{lower_edge_angle, order_points, RotationMatrix};

/// Minimum-area rectangle of the dominant outline, corners ordered tl, tr, br, bl.
#[derive(Clone, Debug)]
pub struct RectMeasurement {
    pub corners: [Point2; 4],
    pub center: Point2,
    pub angle_deg: f64,
    pub contour_area: f64,
}

/// Output of [`align`].
#[derive(Clone, Debug)]
pub struct Alignment {
    pub image: RgbaImage,
    /// Rectangle corners after rotation, in the rotated image's coordinates.
    pub corners: [Point2; 4],
    pub center: (i32, i32),
    pub angle_deg: f64,
}

/// Measure the dominant outline of a background-erased image.
pub fn measure(image: &RgbaImage, min_area: f64) -> Option<RectMeasurement> {
    let gray = intensity(image);
    let contour = dominant_contour(&gray, min_area)?;

    let rect = min_area_rect(&contour.points);
    let corners = rect.map(|p| Point2::new(p.x as f64, p.y as f64));
    let ordered = order_points(&corners);
    let center = Point2::new(
        corners.iter().map(|p| p.x).sum::<f64>() / 4.0,
        corners.iter().map(|p| p.y).sum::<f64>() / 4.0,
    );

    Some(RectMeasurement {
        corners: ordered,
        center,
        angle_deg: lower_edge_angle(&ordered),
        contour_area: contour.area,
    })
}

/// Rotate an image so that the lower edge of its sample is horizontal.
///
/// The output keeps the input size; content rotated past the border is clipped
/// and uncovered pixels are transparent.
pub fn align(
    image: &RgbaImage,
    config: &AlignConfig,
    sample: &str,
    index: usize,
) -> Result<Alignment> {
    let rect =
        measure(image, config.min_contour_area).ok_or_else(|| PipelineError::NoContour {
            sample: sample.to_string(),
            index,
            min_area: config.min_contour_area,
        })?;

    let bias = if config.center_bias { 1.0 } else { 0.0 };
    let center = (
        (rect.center.x - bias) as i32,
        (rect.center.y - bias) as i32,
    );

    let matrix = RotationMatrix::about((center.0 as f64, center.1 as f64), rect.angle_deg, 1.0);
    let projection = matrix.to_projection().ok_or_else(|| {
        PipelineError::InvalidConfig(format!("rotation by {} is not invertible", rect.angle_deg))
    })?;
    let rotated = warp(image, &projection, Interpolation::Bilinear, Rgba([0, 0, 0, 0]));
    let corners = rect.corners.map(|p| matrix.transform(p));

    debug!(
        sample,
        index,
        angle = rect.angle_deg,
        area = rect.contour_area,
        cx = center.0,
        cy = center.1,
        "Aligned frame"
    );

    Ok(Alignment {
        image: rotated,
        corners,
        center,
        angle_deg: rect.angle_deg,
    })
}

/// [`align`] on an erased frame, producing the pipeline record.
pub fn align_frame(
    frame: ErasedFrame,
    config: &AlignConfig,
    sample: &str,
) -> Result<AlignedFrame> {
    let aligned = align(&frame.image, config, sample, frame.index)?;
    Ok(AlignedFrame {
        index: frame.index,
        image: aligned.image,
        center: aligned.center,
        corners: aligned.corners,
        angle_deg: aligned.angle_deg,
        source_shape: frame.source_shape,
    })
}
