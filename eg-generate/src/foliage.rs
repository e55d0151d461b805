//! This module generates the foliage point cloud.

use crate::maths::random_unit_vector;
use eg_config::TreeConfig;
use glam::Vec3;
use rand::Rng;
use std::{f32::consts::TAU, ops::Range};
use tracing::{debug, instrument};

/// The range of sizes for a foliage particle, before perspective attenuation.
pub const FOLIAGE_SIZE_RANGE: Range<f32> = 0.3..0.8;

/// A single particle of the foliage cloud.
///
/// These are generated once and never mutated. All animation happens in the shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliagePoint {
    /// The resting position of the particle.
    pub position: Vec3,

    /// The size of the particle.
    pub size: f32,

    /// A random number in `[0, 1)` used to desynchronise the animations of the particles.
    pub random_seed: f32,

    /// The unit vector that the particle breathes in and out along.
    pub breath_direction: Vec3,
}

/// Generate `count` foliage particles inside the cone described by `tree`.
///
/// The height of each particle is uniform, and its distance from the trunk is sampled with a
/// square root so that the particles are uniform over the area of each horizontal slice
/// instead of clustering around the trunk.
#[instrument(skip(rng))]
pub fn generate_foliage<R: Rng + ?Sized>(
    count: usize,
    tree: &TreeConfig,
    rng: &mut R,
) -> Vec<FoliagePoint> {
    let points: Vec<FoliagePoint> = (0..count)
        .map(|_| {
            let y = rng.gen_range(0.0..tree.height);
            let r = rng.gen::<f32>().sqrt() * tree.radius_at(y);
            let theta = rng.gen_range(0.0..TAU);

            FoliagePoint {
                position: Vec3::new(r * theta.cos(), y, r * theta.sin()),
                size: rng.gen_range(FOLIAGE_SIZE_RANGE),
                random_seed: rng.gen(),
                breath_direction: random_unit_vector(rng),
            }
        })
        .collect();

    debug!(count = points.len(), "Generated foliage");
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn no_points() {
        let mut rng = StdRng::seed_from_u64(12345);
        assert!(generate_foliage(0, &TreeConfig::default(), &mut rng).is_empty());
    }

    #[test]
    fn points_stay_inside_the_cone() {
        let tree = TreeConfig::default();
        let mut rng = StdRng::seed_from_u64(12345);
        let points = generate_foliage(4000, &tree, &mut rng);
        assert_eq!(points.len(), 4000);

        for point in points {
            let Vec3 { x, y, z } = point.position;
            assert!((0.0..=tree.height).contains(&y), "{y} is outside the tree");
            assert!(
                x.hypot(z) <= tree.radius_at(y) + 1e-5,
                "{:?} is outside the cone",
                point.position
            );

            assert!(FOLIAGE_SIZE_RANGE.contains(&point.size));
            assert!((0.0..1.0).contains(&point.random_seed));
            assert!(approx_eq!(
                f32,
                point.breath_direction.length(),
                1.,
                epsilon = 1e-5
            ));
        }
    }

    #[test]
    fn radial_distribution_is_uniform_over_area() {
        const SAMPLES: usize = 20_000;
        const BUCKETS: usize = 10;

        let tree = TreeConfig::default();
        let mut rng = StdRng::seed_from_u64(2023);
        let mut buckets = [0usize; BUCKETS];

        for point in generate_foliage(SAMPLES, &tree, &mut rng) {
            let Vec3 { x, y, z } = point.position;
            let radius_at_y = tree.radius_at(y);
            if radius_at_y < 1e-3 {
                continue;
            }

            // For an area-uniform disc, the normalised squared radius is uniform on [0, 1]
            let u = (x * x + z * z) / (radius_at_y * radius_at_y);
            buckets[((u * BUCKETS as f32) as usize).min(BUCKETS - 1)] += 1;
        }

        let total: usize = buckets.iter().sum();
        let expected = total as f32 / BUCKETS as f32;
        for (idx, &count) in buckets.iter().enumerate() {
            let deviation = (count as f32 - expected).abs() / expected;
            assert!(
                deviation < 0.1,
                "Bucket {idx} has {count} points but we expected about {expected}"
            );
        }
    }

    #[test]
    fn same_seed_same_foliage() {
        let tree = TreeConfig::default();
        let a = generate_foliage(100, &tree, &mut StdRng::seed_from_u64(7));
        let b = generate_foliage(100, &tree, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
