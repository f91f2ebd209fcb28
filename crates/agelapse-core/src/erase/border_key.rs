use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::open;
use imageproc::region_labelling::{connected_components, Connectivity};
use tracing::debug;

use crate::error::Result;

use super::background::border_median_color;
use super::config::EraserConfig;
use super::BackgroundEraser;

const FOREGROUND: Luma<u8> = Luma([255]);
const BACKGROUND: Luma<u8> = Luma([0]);

/// Chroma-key style eraser for photographs taken on a uniform backdrop.
///
/// Pipeline: border median colour -> distance mask -> morphological opening ->
/// drop small components -> zero alpha outside the mask. Pixels that are
/// already transparent stay background, so a second pass refines the first.
#[derive(Clone, Debug)]
pub struct BorderKeyEraser {
    pub tolerance: f32,
    pub border_strip: usize,
    pub min_component_area: usize,
    pub opening_radius: usize,
}

impl BorderKeyEraser {
    pub fn from_config(config: &EraserConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            border_strip: config.border_strip,
            min_component_area: config.min_component_area,
            opening_radius: config.opening_radius,
        }
    }

    fn foreground_mask(&self, image: &RgbaImage) -> GrayImage {
        let key = border_median_color(image, self.border_strip);
        let tol_sq = self.tolerance * self.tolerance;
        GrayImage::from_fn(image.width(), image.height(), |x, y| {
            let px = image.get_pixel(x, y).0;
            let keep = px[3] != 0 && key.map_or(true, |k| color_distance_sq(px, k) > tol_sq);
            if keep {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })
    }

    /// Opens the mask with a square kernel, then keeps only the 4-connected
    /// components of at least `min_component_area` pixels.
    fn clean_mask(&self, mask: &GrayImage) -> GrayImage {
        let opened = match u8::try_from(self.opening_radius).unwrap_or(u8::MAX) {
            0 => mask.clone(),
            k => open(mask, Norm::LInf, k),
        };

        let labels = connected_components(&opened, Connectivity::Four, BACKGROUND);
        let mut areas: Vec<usize> = Vec::new();
        for label in labels.pixels() {
            let idx = label.0[0] as usize;
            if idx >= areas.len() {
                areas.resize(idx + 1, 0);
            }
            areas[idx] += 1;
        }

        GrayImage::from_fn(opened.width(), opened.height(), |x, y| {
            let label = labels.get_pixel(x, y).0[0] as usize;
            if label != 0 && areas[label] >= self.min_component_area {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })
    }
}

impl Default for BorderKeyEraser {
    fn default() -> Self {
        Self::from_config(&EraserConfig::default())
    }
}

impl BackgroundEraser for BorderKeyEraser {
    fn name(&self) -> &str {
        "border-key"
    }

    fn erase(&self, image: &RgbaImage) -> Result<Option<RgbaImage>> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(None);
        }

        let kept = self.clean_mask(&self.foreground_mask(image));

        let foreground = kept.pixels().filter(|p| p.0[0] != 0).count();
        debug!(foreground, total = kept.len(), "Border-key mask");
        if foreground == 0 {
            return Ok(None);
        }

        let mut out = image.clone();
        for (px, mask) in out.pixels_mut().zip(kept.pixels()) {
            if mask.0[0] == 0 {
                *px = Rgba([0, 0, 0, 0]);
            }
        }
        Ok(Some(out))
    }
}

fn color_distance_sq(px: [u8; 4], key: [u8; 3]) -> f32 {
    (0..3)
        .map(|c| {
            let d = px[c] as f32 - key[c] as f32;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backdrop() -> RgbaImage {
        RgbaImage::from_pixel(40, 40, Rgba([245, 245, 245, 255]))
    }

    fn paint(img: &mut RgbaImage, x0: u32, y0: u32, size: u32) {
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                img.put_pixel(x, y, Rgba([30, 60, 90, 255]));
            }
        }
    }

    #[test]
    fn small_specks_are_erased_and_the_subject_kept() {
        let mut img = backdrop();
        paint(&mut img, 10, 10, 16);
        paint(&mut img, 32, 4, 4);

        let eraser = BorderKeyEraser {
            min_component_area: 50,
            ..BorderKeyEraser::default()
        };
        let out = eraser.erase(&img).unwrap().unwrap();

        assert_eq!(out.get_pixel(17, 17).0, [30, 60, 90, 255]);
        assert_eq!(out.get_pixel(33, 5).0[3], 0);
        assert_eq!(out.get_pixel(2, 2).0[3], 0);
    }

    #[test]
    fn opening_removes_one_pixel_lines() {
        let mut img = backdrop();
        paint(&mut img, 10, 10, 12);
        for x in 22..36 {
            img.put_pixel(x, 15, Rgba([30, 60, 90, 255]));
        }

        let eraser = BorderKeyEraser {
            min_component_area: 1,
            opening_radius: 1,
            ..BorderKeyEraser::default()
        };
        let out = eraser.erase(&img).unwrap().unwrap();

        assert_eq!(out.get_pixel(15, 15).0[3], 255);
        assert_eq!(out.get_pixel(30, 15).0[3], 0);
    }

    #[test]
    fn uniform_backdrop_has_no_foreground() {
        let eraser = BorderKeyEraser::default();
        assert!(eraser.erase(&backdrop()).unwrap().is_none());
    }
}
