#[allow(dead_code)]
mod common;

use agelapse_core::align::{align, AlignConfig};
use agelapse_core::error::PipelineError;
use agelapse_core::io::crop::{crop_centered, output_file_name, CropRect};
use agelapse_core::unify::{frame_extent, unify, SampleCropSpec};
use image::{Rgba, RgbaImage};

fn spec(half_width: f64, half_height: f64) -> SampleCropSpec {
    SampleCropSpec {
        x_min: 0.0,
        x_max: 2.0 * half_width,
        y_min: 0.0,
        y_max: 2.0 * half_height,
        half_width,
        half_height,
    }
}

#[test]
fn window_size_does_not_depend_on_center() {
    let s = spec(10.5, 7.25);
    let a = CropRect::from_center((50, 50), &s).unwrap();
    let b = CropRect::from_center((3, 2), &s).unwrap();
    let c = CropRect::from_center((-4, 400), &s).unwrap();
    assert_eq!((a.width, a.height), (b.width, b.height));
    assert_eq!((a.width, a.height), (c.width, c.height));
    assert_eq!(a.x, 50 - 10);
}

#[test]
fn window_size_is_twice_the_half_extent() {
    let image = RgbaImage::from_pixel(100, 100, Rgba([9, 9, 9, 255]));
    for (hw, hh) in [(10.5, 7.25), (3.75, 12.5), (8.0, 0.6)] {
        for center in [(50, 50), (7, 93), (-3, 0)] {
            let out = crop_centered(&image, center, &spec(hw, hh)).unwrap();
            let (w, h) = out.dimensions();
            assert!((w as f64 - 2.0 * hw).abs() <= 1.0, "{hw} -> {w}");
            assert!((h as f64 - 2.0 * hh).abs() <= 1.0, "{hh} -> {h}");
        }
    }

    let rect = CropRect::from_center((50, 50), &spec(10.5, 7.25)).unwrap();
    assert_eq!((rect.width, rect.height), (21, 14));
}

#[test]
fn zero_extent_is_an_error() {
    let err = CropRect::from_center((10, 10), &spec(0.0, 5.0)).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyCrop { width: 0, .. }));
}

#[test]
fn crop_copies_the_window() {
    let mut image = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 255, 255]));
    image.put_pixel(10, 10, Rgba([255, 0, 0, 255]));
    let out = crop_centered(&image, (10, 10), &spec(2.0, 2.0)).unwrap();
    assert_eq!(out.dimensions(), (4, 4));
    assert_eq!(out.get_pixel(2, 2).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255, 255]);
}

#[test]
fn window_past_the_border_stays_transparent() {
    let image = RgbaImage::from_pixel(10, 10, Rgba([9, 9, 9, 255]));
    let out = crop_centered(&image, (1, 1), &spec(3.0, 3.0)).unwrap();
    assert_eq!(out.dimensions(), (6, 6));
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(out.get_pixel(5, 5).0, [9, 9, 9, 255]);
}

#[test]
fn differently_sized_frames_crop_to_one_size() {
    let config = AlignConfig {
        min_contour_area: 1000.0,
        center_bias: true,
    };
    let frames = [
        common::rotated_rect(400, 400, (200.0, 200.0), 200.0, 100.0, 12.0, Rgba([0, 0, 0, 0])),
        common::rotated_rect(500, 360, (240.0, 170.0), 190.0, 104.0, -7.0, Rgba([0, 0, 0, 0])),
        common::rotated_rect(420, 420, (215.0, 205.0), 205.0, 96.0, 3.0, Rgba([0, 0, 0, 0])),
    ];
    let aligned: Vec<_> = frames
        .iter()
        .map(|f| align(f, &config, "S", 0).unwrap())
        .collect();
    let extents: Vec<_> = aligned
        .iter()
        .map(|a| frame_extent(&a.corners, a.center))
        .collect();
    let spec = unify(&extents).unwrap();

    let sizes: Vec<_> = aligned
        .iter()
        .map(|a| crop_centered(&a.image, a.center, &spec).unwrap().dimensions())
        .collect();
    assert!(sizes.iter().all(|s| *s == sizes[0]), "{sizes:?}");
    assert!(sizes[0].0 >= 200 && sizes[0].1 >= 100, "{sizes:?}");
}

#[test]
fn output_names_carry_index_and_label() {
    assert_eq!(output_file_name(0, 0), "0-0.png");
    assert_eq!(output_file_name(12, 240), "12-240.png");
}
