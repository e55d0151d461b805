//! This module generates the outline of the star on top of the tree.

use glam::Vec2;
use std::f32::consts::PI;

/// The number of points on the star.
pub const STAR_POINTS: usize = 5;

/// The distance from the centre to the tip of each point.
pub const STAR_OUTER_RADIUS: f32 = 0.8;

/// The distance from the centre to each inner corner.
pub const STAR_INNER_RADIUS: f32 = 0.38;

/// The closed outline of a five-pointed star in the XY plane.
#[derive(Clone, Debug, PartialEq)]
pub struct StarOutline {
    /// The corners of the star, alternating between tips and inner corners, starting from the
    /// top tip and going clockwise. The last point connects back to the first.
    pub points: Vec<Vec2>,
}

/// Generate the star outline. This is completely fixed.
pub fn generate_star_outline() -> StarOutline {
    let points = (0..STAR_POINTS * 2)
        .map(|i| {
            let angle = i as f32 * PI / STAR_POINTS as f32;
            let r = if i % 2 == 0 {
                STAR_OUTER_RADIUS
            } else {
                STAR_INNER_RADIUS
            };
            Vec2::new(angle.sin() * r, angle.cos() * r)
        })
        .collect();

    StarOutline { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn star_outline_test() {
        let star = generate_star_outline();
        assert_eq!(star.points.len(), 10);
        assert_eq!(star.points[0], Vec2::new(0., 0.8));

        for (i, point) in star.points.iter().enumerate() {
            let expected = if i % 2 == 0 { 0.8 } else { 0.38 };
            assert!(approx_eq!(f32, point.length(), expected, epsilon = 1e-6));
        }

        // The bottom inner corner is straight down
        assert!(approx_eq!(f32, star.points[5].x, 0., epsilon = 1e-6));
        assert!(approx_eq!(f32, star.points[5].y, -0.38, epsilon = 1e-6));

        // The second point is to the right of the first, so the outline is clockwise
        assert!(star.points[1].x > 0.);
    }

    #[test]
    fn star_ratio() {
        assert!(approx_eq!(
            f32,
            STAR_INNER_RADIUS / STAR_OUTER_RADIUS,
            0.475,
            epsilon = 1e-6
        ));
    }
}
