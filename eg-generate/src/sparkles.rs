//! This module generates the tiny lights drifting around the tree.

use eg_config::TreeConfig;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;
use tracing::{debug, instrument};

/// A tiny drifting light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    /// The centre that this sparkle drifts around.
    pub position: Vec3,

    /// The phase offset of the drift, in radians.
    pub phase: f32,

    /// How many drift cycles this sparkle does per second.
    pub speed: f32,

    /// The radius of the sparkle.
    pub size: f32,
}

/// Generate `count` sparkles uniformly in the bounding box of the tree.
#[instrument(skip(rng))]
pub fn generate_sparkles<R: Rng + ?Sized>(
    count: usize,
    tree: &TreeConfig,
    rng: &mut R,
) -> Vec<Sparkle> {
    let r = tree.base_radius;

    let sparkles: Vec<Sparkle> = (0..count)
        .map(|_| Sparkle {
            position: Vec3::new(
                rng.gen_range(-r..r),
                rng.gen_range(0.0..tree.height),
                rng.gen_range(-r..r),
            ),
            phase: rng.gen_range(0.0..TAU),
            speed: rng.gen_range(0.1..0.3),
            size: rng.gen_range(0.015..0.035),
        })
        .collect();

    debug!(count = sparkles.len(), "Generated sparkles");
    sparkles
}
