use imageproc::geometric_transformations::Projection;

use crate::frame::Point2;

/// Order four rectangle corners as top-left, top-right, bottom-right, bottom-left.
///
/// The two left-most points (by x) split into top-left and bottom-left by y; of
/// the remaining two, the one farther from the top-left is the bottom-right.
pub fn order_points(points: &[Point2; 4]) -> [Point2; 4] {
    let mut by_x = *points;
    by_x.sort_by(|a, b| a.x.total_cmp(&b.x));

    let (tl, bl) = if by_x[0].y <= by_x[1].y {
        (by_x[0], by_x[1])
    } else {
        (by_x[1], by_x[0])
    };

    let (br, tr) = if tl.distance(&by_x[2]) > tl.distance(&by_x[3]) {
        (by_x[2], by_x[3])
    } else {
        (by_x[3], by_x[2])
    };

    [tl, tr, br, bl]
}

/// Angle in degrees of the bottom-left -> bottom-right edge of ordered corners.
/// Rotating by this angle makes the lower edge horizontal.
pub fn lower_edge_angle(ordered: &[Point2; 4]) -> f64 {
    let br = ordered[2];
    let bl = ordered[3];
    (br.y - bl.y).atan2(br.x - bl.x).to_degrees()
}

/// 2x3 affine rotation about a center, positive angles counter-clockwise on
/// screen (y axis pointing down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationMatrix {
    pub m: [[f64; 3]; 2],
}

impl RotationMatrix {
    pub fn about(center: (f64, f64), angle_deg: f64, scale: f64) -> Self {
        let theta = angle_deg.to_radians();
        let alpha = scale * theta.cos();
        let beta = scale * theta.sin();
        let (cx, cy) = center;
        Self {
            m: [
                [alpha, beta, (1.0 - alpha) * cx - beta * cy],
                [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
            ],
        }
    }

    pub fn transform(&self, p: Point2) -> Point2 {
        let [r0, r1] = self.m;
        Point2::new(
            r0[0] * p.x + r0[1] * p.y + r0[2],
            r1[0] * p.x + r1[1] * p.y + r1[2],
        )
    }

    /// Source-to-destination projection for `imageproc::geometric_transformations::warp`.
    pub fn to_projection(&self) -> Option<Projection> {
        let [r0, r1] = self.m;
        Projection::from_matrix([
            r0[0] as f32,
            r0[1] as f32,
            r0[2] as f32,
            r1[0] as f32,
            r1[1] as f32,
            r1[2] as f32,
            0.0,
            0.0,
            1.0,
        ])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn order_axis_aligned_rectangle() {
        let pts = [
            Point2::new(10.0, 5.0),
            Point2::new(0.0, 5.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
        ];
        let [tl, tr, br, bl] = order_points(&pts);
        assert_eq!(tl, Point2::new(0.0, 0.0));
        assert_eq!(tr, Point2::new(10.0, 0.0));
        assert_eq!(br, Point2::new(10.0, 5.0));
        assert_eq!(bl, Point2::new(0.0, 5.0));
    }

    #[test]
    fn angle_of_tilted_lower_edge() {
        // Lower edge rises by 1 for every 1 to the right: -45 degrees.
        let ordered = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, -10.0),
            Point2::new(20.0, 0.0),
            Point2::new(10.0, 10.0),
        ];
        assert_abs_diff_eq!(lower_edge_angle(&ordered), -45.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_levels_a_sloped_vector() {
        let angle = 30.0_f64;
        let m = RotationMatrix::about((50.0, 50.0), angle, 1.0);
        let a = Point2::new(50.0, 50.0);
        let b = Point2::new(
            50.0 + 20.0 * angle.to_radians().cos(),
            50.0 + 20.0 * angle.to_radians().sin(),
        );
        let ra = m.transform(a);
        let rb = m.transform(b);
        assert_abs_diff_eq!(ra.x, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ra.y, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rb.y, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rb.x, 70.0, epsilon = 1e-9);
    }
}
