//! This module contains the gentle floating of the star and the drifting of the sparkles.

use eg_generate::Sparkle;
use glam::Vec3;
use std::f32::consts::TAU;

/// A bobbing and wobbling motion for an object floating in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatMotion {
    /// How fast the object bobs.
    pub speed: f32,

    /// How much the object wobbles.
    pub rotation_intensity: f32,

    /// How far the object bobs up and down.
    pub float_intensity: f32,

    /// A time offset so that several floating objects don't move in sync.
    pub offset: f32,
}

impl Default for FloatMotion {
    fn default() -> Self {
        Self {
            speed: 2.,
            rotation_intensity: 1.,
            float_intensity: 1.,
            offset: 0.,
        }
    }
}

/// Where a floating object is at some time, relative to its resting place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatPose {
    /// How far above its resting place the object is.
    pub lift: f32,

    /// The Euler angles (XYZ, in radians) of the object.
    pub rotation: Vec3,
}

impl FloatMotion {
    /// The pose at the given elapsed time.
    pub fn pose_at(&self, time: f32) -> FloatPose {
        let phase = (self.offset + time) / 4. * self.speed;
        let (sin, cos) = phase.sin_cos();

        FloatPose {
            lift: sin / 10. * self.float_intensity,
            rotation: Vec3::new(cos / 8., sin / 8., sin / 20.) * self.rotation_intensity,
        }
    }
}

/// How far a sparkle has drifted from its resting place at the given time.
pub fn sparkle_offset(sparkle: &Sparkle, time: f32) -> Vec3 {
    let phase = sparkle.phase + time * sparkle.speed * TAU;
    Vec3::new(
        phase.cos() * 0.05,
        phase.sin() * 0.15,
        (phase * 0.5).sin() * 0.05,
    )
}

/// The twinkling scale of a sparkle at the given time, in `[0.5, 1]`.
pub fn sparkle_scale(sparkle: &Sparkle, time: f32) -> f32 {
    let phase = sparkle.phase + time * sparkle.speed * TAU;
    0.75 + 0.25 * (phase * 3.).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use std::f32::consts::PI;

    #[test]
    fn float_pose_test() {
        let motion = FloatMotion::default();

        let start = motion.pose_at(0.);
        assert_eq!(start.lift, 0.);
        assert!(approx_eq!(f32, start.rotation.x, 0.125));

        // With a speed of 2, a quarter turn takes π seconds
        let peak = motion.pose_at(PI);
        assert!(approx_eq!(f32, peak.lift, 0.1, epsilon = 1e-6));
        assert!(approx_eq!(f32, peak.rotation.y, 0.125, epsilon = 1e-6));
        assert!(approx_eq!(f32, peak.rotation.z, 0.05, epsilon = 1e-6));
    }

    #[test]
    fn float_stays_small() {
        let motion = FloatMotion {
            offset: 1234.,
            ..FloatMotion::default()
        };

        for step in 0..500 {
            let pose = motion.pose_at(step as f32 * 0.1);
            assert!(pose.lift.abs() <= 0.1 + 1e-6);
            assert!(pose.rotation.abs().max_element() <= 0.125 + 1e-6);
        }
    }

    #[test]
    fn sparkles_drift_periodically() {
        let sparkle = Sparkle {
            position: Vec3::ZERO,
            phase: 1.,
            speed: 0.25,
            size: 0.02,
        };

        // One drift cycle takes 4 seconds, and the horizontal wobble takes two cycles
        let a = sparkle_offset(&sparkle, 1.);
        let b = sparkle_offset(&sparkle, 9.);
        assert!(a.abs_diff_eq(b, 1e-5));

        for step in 0..100 {
            let time = step as f32 * 0.37;
            assert!(sparkle_offset(&sparkle, time).length() < 0.2);

            let scale = sparkle_scale(&sparkle, time);
            assert!((0.5 - 1e-6..=1. + 1e-6).contains(&scale));
        }
    }
}
