//! De-skewing a sample by the minimum-area rectangle of its outline.

mod aligner;
pub mod config;
pub mod contour;
pub mod geometry;

pub use aligner::{align, align_frame, measure, Alignment, RectMeasurement};
pub use config::AlignConfig;
pub use geometry::{lower_edge_angle, order_points, RotationMatrix};
