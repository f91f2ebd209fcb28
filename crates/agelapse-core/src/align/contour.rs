use image::{GrayImage, Luma, RgbaImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// The outline picked as "the sample".
#[derive(Clone, Debug)]
pub struct DominantContour {
    pub points: Vec<Point<i32>>,
    pub area: f64,
}

/// Single-channel intensity weighted by alpha.
///
/// Transparent pixels map to 0 and opaque pixels never do, so a dark sample on
/// an erased background still forms a foreground region.
pub fn intensity(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        if a == 0 {
            return Luma([0]);
        }
        let luma = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
        let weighted = (luma * a as f32 / 255.0).round().clamp(1.0, 255.0);
        Luma([weighted as u8])
    })
}

/// Largest external contour whose area exceeds `min_area`.
///
/// Only top-level outer borders are considered: holes in the sample and
/// islands inside holes are not separate objects. Ties keep the first contour
/// in scan order.
pub fn dominant_contour(gray: &GrayImage, min_area: f64) -> Option<DominantContour> {
    find_contours::<i32>(gray)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            let area = polygon_area(&c.points);
            DominantContour {
                points: c.points,
                area,
            }
        })
        .filter(|c| c.area > min_area)
        .fold(None, |best: Option<DominantContour>, c| match best {
            Some(b) if b.area >= c.area => Some(b),
            _ => Some(c),
        })
}

/// Shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice.abs() as f64 / 2.0
}
