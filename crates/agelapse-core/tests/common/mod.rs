use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const SAMPLE: Rgba<u8> = Rgba([90, 60, 30, 255]);

/// A `rect_w x rect_h` rectangle rotated by `angle_deg` (clockwise on screen,
/// image y axis pointing down) around `center`, drawn over `background`.
pub fn rotated_rect(
    width: u32,
    height: u32,
    center: (f64, f64),
    rect_w: f64,
    rect_h: f64,
    angle_deg: f64,
    background: Rgba<u8>,
) -> RgbaImage {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f64 + 0.5 - center.0;
        let dy = y as f64 + 0.5 - center.1;
        // Undo the rotation to test against the axis-aligned rectangle.
        let u = dx * cos + dy * sin;
        let v = -dx * sin + dy * cos;
        if u.abs() <= rect_w / 2.0 && v.abs() <= rect_h / 2.0 {
            SAMPLE
        } else {
            background
        }
    })
}

/// Standard test frame: 200x100 sample in a 400x400 white photo.
pub fn sample_photo(angle_deg: f64) -> RgbaImage {
    rotated_rect(400, 400, (200.0, 200.0), 200.0, 100.0, angle_deg, WHITE)
}

/// Same frame with the background already erased.
pub fn erased_photo(angle_deg: f64) -> RgbaImage {
    rotated_rect(
        400,
        400,
        (200.0, 200.0),
        200.0,
        100.0,
        angle_deg,
        Rgba([0, 0, 0, 0]),
    )
}

/// Write frames as PNGs named `names[i]` into `dir/sample`.
pub fn write_sample(dir: &Path, sample: &str, names: &[&str], frames: &[RgbaImage]) -> PathBuf {
    let folder = dir.join(sample);
    std::fs::create_dir_all(&folder).unwrap();
    for (name, frame) in names.iter().zip(frames) {
        frame.save(folder.join(name)).unwrap();
    }
    folder
}

/// Write `Timeline.json` holding `hours` into `dir`.
pub fn write_timeline(dir: &Path, hours: &[f64]) -> PathBuf {
    let path = dir.join("Timeline.json");
    std::fs::write(&path, serde_json::to_string(hours).unwrap()).unwrap();
    path
}
