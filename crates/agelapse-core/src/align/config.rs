use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MIN_CONTOUR_AREA;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Contours enclosing this area (px²) or less are ignored.
    #[serde(default = "default_min_contour_area")]
    pub min_contour_area: f64,
    /// Rotate about `(cx - 1, cy - 1)` instead of the rectangle center.
    #[serde(default = "default_true")]
    pub center_bias: bool,
}

fn default_min_contour_area() -> f64 {
    DEFAULT_MIN_CONTOUR_AREA
}
fn default_true() -> bool {
    true
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            min_contour_area: DEFAULT_MIN_CONTOUR_AREA,
            center_bias: true,
        }
    }
}
