//! This module contains small maths helpers shared by the generators and the animations.

use glam::Vec3;
use rand::Rng;

/// Hermite interpolation between `edge0` and `edge1`, exactly like GLSL and WGSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0., 1.);
    t * t * (3. - 2. * t)
}

/// Generate a random unit vector, uniformly distributed over the sphere.
///
/// This samples the cube and rejects anything outside the unit ball (or too close to the
/// centre to normalize), so the directions aren't biased towards the corners of the cube.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = rng.gen::<Vec3>() * 2. - Vec3::ONE;
        let length_squared = v.length_squared();
        if length_squared > 1e-6 && length_squared <= 1. {
            return v / length_squared.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn smoothstep_test() {
        assert_eq!(smoothstep(0., 10., -1.), 0.);
        assert_eq!(smoothstep(0., 10., 0.), 0.);
        assert!(approx_eq!(f32, smoothstep(0., 10., 5.), 0.5));
        assert!(approx_eq!(f32, smoothstep(0., 10., 2.5), 0.156_25));
        assert_eq!(smoothstep(0., 10., 10.), 1.);
        assert_eq!(smoothstep(0., 10., 12.), 1.);
    }

    #[test]
    fn random_unit_vector_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut sum = Vec3::ZERO;

        for _ in 0..5000 {
            let v = random_unit_vector(&mut rng);
            assert!(approx_eq!(f32, v.length(), 1., epsilon = 1e-5));
            sum += v;
        }

        // Uniform directions should roughly cancel out
        assert!((sum / 5000.).length() < 0.05);
    }
}
