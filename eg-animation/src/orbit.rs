//! This module contains the maths for orbiting the camera around the tree.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// The lowest polar angle (measured from straight up) that the camera may look from.
pub const MIN_POLAR_ANGLE: f32 = PI / 4.;

/// The highest polar angle (measured from straight up) that the camera may look from, which is
/// a little below the horizon.
pub const MAX_POLAR_ANGLE: f32 = PI / 1.8;

/// The angular speed in radians per second of an auto-rotation with the given speed, where a
/// speed of 1 means one orbit per minute.
pub fn auto_rotate_rate(speed: f32) -> f32 {
    TAU / 60. * speed
}

/// Move `eye` around `target` by `delta_azimuth` radians about the vertical axis, and clamp its
/// polar angle into `[min_polar, max_polar]`. The distance to the target is preserved.
pub fn orbit_eye(
    eye: Vec3,
    target: Vec3,
    delta_azimuth: f32,
    (min_polar, max_polar): (f32, f32),
) -> Vec3 {
    let offset = eye - target;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return eye;
    }

    let polar = (offset.y / radius).clamp(-1., 1.).acos().clamp(min_polar, max_polar);
    let azimuth = offset.x.atan2(offset.z) + delta_azimuth;

    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();

    target
        + radius
            * Vec3::new(
                sin_polar * sin_azimuth,
                cos_polar,
                sin_polar * cos_azimuth,
            )
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    const LIMITS: (f32, f32) = (MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);

    /// The polar angle of `eye` around `target`.
    fn polar_angle(eye: Vec3, target: Vec3) -> f32 {
        let offset = eye - target;
        (offset.y / offset.length()).acos()
    }

    #[test]
    fn auto_rotate_rate_test() {
        assert!(approx_eq!(f32, auto_rotate_rate(1.), TAU / 60.));
        assert!(approx_eq!(f32, auto_rotate_rate(0.5) * 120., TAU, epsilon = 1e-5));
    }

    #[test]
    fn starting_eye_is_within_limits() {
        let eye = Vec3::new(0., 2., 12.);
        let moved = orbit_eye(eye, Vec3::ZERO, 0., LIMITS);
        assert!(moved.abs_diff_eq(eye, 1e-4), "{moved:?}");
    }

    #[test]
    fn orbiting_keeps_distance_and_height() {
        let eye = Vec3::new(0., 2., 12.);
        let mut current = eye;

        for _ in 0..100 {
            current = orbit_eye(current, Vec3::ZERO, -auto_rotate_rate(0.5) / 60., LIMITS);
            assert!(approx_eq!(f32, current.length(), eye.length(), epsilon = 1e-3));
            assert!(approx_eq!(f32, current.y, 2., epsilon = 1e-3));
        }

        assert!(current.x < 0., "Negative azimuth should turn towards -x: {current:?}");
    }

    #[test]
    fn half_turn() {
        let moved = orbit_eye(Vec3::new(0., 2., 12.), Vec3::ZERO, PI, LIMITS);
        assert!(moved.abs_diff_eq(Vec3::new(0., 2., -12.), 1e-4), "{moved:?}");
    }

    #[test]
    fn polar_angle_is_clamped() {
        let target = Vec3::new(0., 1., 0.);

        let from_above = orbit_eye(Vec3::new(0., 20., 0.1), target, 0., LIMITS);
        assert!(approx_eq!(
            f32,
            polar_angle(from_above, target),
            MIN_POLAR_ANGLE,
            epsilon = 1e-4
        ));

        let from_below = orbit_eye(Vec3::new(0., -20., 1.), target, 0., LIMITS);
        assert!(approx_eq!(
            f32,
            polar_angle(from_below, target),
            MAX_POLAR_ANGLE,
            epsilon = 1e-4
        ));
    }

    #[test]
    fn eye_on_target_does_not_move() {
        assert_eq!(
            orbit_eye(Vec3::ONE, Vec3::ONE, 1., LIMITS),
            Vec3::ONE
        );
    }
}
