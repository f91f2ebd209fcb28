use std::path::Path;

use image::{imageops, RgbaImage};

use crate::consts::OUTPUT_EXTENSION;
use crate::error::{PipelineError, Result};
use crate::unify::SampleCropSpec;

/// A crop window in image coordinates. May extend past the image border.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Window `center ± half-extents`, rounded to whole pixels.
    ///
    /// For integer centers the size depends only on the half-extents, so every
    /// frame of a sample gets the same size.
    pub fn from_center(center: (i32, i32), spec: &SampleCropSpec) -> Result<CropRect> {
        let (cx, cy) = (center.0 as f64, center.1 as f64);
        let x0 = round_half_up(cx - spec.half_width);
        let x1 = round_half_up(cx + spec.half_width);
        let y0 = round_half_up(cy - spec.half_height);
        let y1 = round_half_up(cy + spec.half_height);

        let (w, h) = (x1 - x0, y1 - y0);
        if w <= 0 || h <= 0 {
            return Err(PipelineError::EmptyCrop {
                width: w,
                height: h,
            });
        }
        Ok(CropRect {
            x: x0,
            y: y0,
            width: w as u32,
            height: h as u32,
        })
    }
}

/// Rounds .5 upward on both sides of zero, so a window keeps its size
/// wherever its center lands.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Cut the window around `center` out of a rotated frame.
///
/// Parts of the window outside the image stay transparent instead of
/// shrinking the output.
pub fn crop_centered(
    image: &RgbaImage,
    center: (i32, i32),
    spec: &SampleCropSpec,
) -> Result<RgbaImage> {
    let rect = CropRect::from_center(center, spec)?;
    let mut canvas = RgbaImage::new(rect.width, rect.height);
    imageops::replace(&mut canvas, image, -rect.x, -rect.y);
    Ok(canvas)
}

/// `"{index}-{label}.png"`; the index keeps names unique when labels repeat.
pub fn output_file_name(index: usize, label: i64) -> String {
    format!("{index}-{label}.{OUTPUT_EXTENSION}")
}

/// Write a cropped frame as PNG (RGBA).
pub fn write_frame(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| PipelineError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
