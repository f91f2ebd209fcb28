use approx::assert_abs_diff_eq;

use agelapse_core::error::PipelineError;
use agelapse_core::frame::Point2;
use agelapse_core::unify::{frame_extent, unify, FrameExtent};

fn extent(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> FrameExtent {
    FrameExtent {
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

#[test]
fn union_of_extents() {
    let spec = unify(&[
        extent(10.0, 110.0, 20.0, 70.0),
        extent(5.0, 100.0, 25.0, 80.0),
    ])
    .unwrap();
    assert_abs_diff_eq!(spec.x_min, 5.0);
    assert_abs_diff_eq!(spec.x_max, 110.0);
    assert_abs_diff_eq!(spec.y_min, 20.0);
    assert_abs_diff_eq!(spec.y_max, 80.0);
    assert_abs_diff_eq!(spec.half_width, 52.5);
    assert_abs_diff_eq!(spec.half_height, 30.0);
}

#[test]
fn unify_is_idempotent() {
    let extents = [
        extent(1.0, 9.0, 2.0, 4.0),
        extent(-3.0, 5.0, 0.0, 8.0),
        extent(0.0, 2.0, 1.0, 3.0),
    ];
    let once = unify(&extents).unwrap();
    let again = unify(&[extent(once.x_min, once.x_max, once.y_min, once.y_max)]).unwrap();
    assert_eq!(once, again);
}

#[test]
fn extents_follow_the_frame_center() {
    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(40.0, 0.0),
        Point2::new(40.0, 20.0),
        Point2::new(0.0, 20.0),
    ];
    let e = frame_extent(&corners, (100, 50));
    assert_abs_diff_eq!(e.x_min, 80.0);
    assert_abs_diff_eq!(e.x_max, 120.0);
    assert_abs_diff_eq!(e.y_min, 40.0);
    assert_abs_diff_eq!(e.y_max, 60.0);
}

#[test]
fn empty_batch_is_an_error() {
    assert!(matches!(unify(&[]), Err(PipelineError::EmptySequence)));
}
