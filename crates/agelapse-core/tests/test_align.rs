#[allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;

use agelapse_core::align::{align, measure, AlignConfig};
use agelapse_core::error::PipelineError;

fn config() -> AlignConfig {
    AlignConfig {
        min_contour_area: 1000.0,
        center_bias: true,
    }
}

#[test]
fn measures_the_lower_edge_angle() {
    for angle in [0.0, 8.0, -12.0, 20.0, -30.0] {
        let image = common::erased_photo(angle);
        let rect = measure(&image, 1000.0).unwrap();
        assert_abs_diff_eq!(rect.angle_deg, angle, epsilon = 1.0);
        assert_abs_diff_eq!(rect.contour_area, 20_000.0, epsilon = 1500.0);
        assert_abs_diff_eq!(rect.center.x, 200.0, epsilon = 2.0);
        assert_abs_diff_eq!(rect.center.y, 200.0, epsilon = 2.0);
    }
}

#[test]
fn aligned_frame_has_horizontal_lower_edge() {
    for angle in [5.0, 15.0, -10.0, 25.0] {
        let image = common::erased_photo(angle);
        let aligned = align(&image, &config(), "S", 0).unwrap();
        assert_eq!(aligned.image.dimensions(), image.dimensions());
        assert_abs_diff_eq!(aligned.angle_deg, angle, epsilon = 1.0);

        let again = measure(&aligned.image, 1000.0).unwrap();
        assert_abs_diff_eq!(again.angle_deg, 0.0, epsilon = 1.0);

        // Rotated corners describe an axis-aligned 200x100 box.
        let xs: Vec<f64> = aligned.corners.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = aligned.corners.iter().map(|p| p.y).collect();
        let w = xs.iter().cloned().fold(f64::MIN, f64::max)
            - xs.iter().cloned().fold(f64::MAX, f64::min);
        let h = ys.iter().cloned().fold(f64::MIN, f64::max)
            - ys.iter().cloned().fold(f64::MAX, f64::min);
        assert_abs_diff_eq!(w, 200.0, epsilon = 4.0);
        assert_abs_diff_eq!(h, 100.0, epsilon = 4.0);
    }
}

#[test]
fn center_bias_shifts_rotation_center() {
    let image = common::erased_photo(10.0);
    let rect = measure(&image, 1000.0).unwrap();

    let biased = align(&image, &config(), "S", 0).unwrap();
    assert_eq!(
        biased.center,
        ((rect.center.x - 1.0) as i32, (rect.center.y - 1.0) as i32)
    );

    let plain = AlignConfig {
        center_bias: false,
        ..config()
    };
    let unbiased = align(&image, &plain, "S", 0).unwrap();
    assert_eq!(
        unbiased.center,
        (rect.center.x as i32, rect.center.y as i32)
    );
}

#[test]
fn small_outline_is_not_a_sample() {
    let image = common::erased_photo(0.0);
    let err = align(
        &image,
        &AlignConfig {
            min_contour_area: 50_000.0,
            center_bias: true,
        },
        "S7",
        4,
    )
    .unwrap_err();
    match err {
        PipelineError::NoContour { sample, index, .. } => {
            assert_eq!(sample, "S7");
            assert_eq!(index, 4);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn fully_transparent_frame_has_no_contour() {
    let image = image::RgbaImage::new(50, 50);
    assert!(measure(&image, 0.0).is_none());
}
