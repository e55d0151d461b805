//! This crate provides pure functions to procedurally generate everything on the tree: the
//! foliage point cloud, the ornament placements, the star topper, the sparkles, a few simple
//! solids, and the screen overlay textures.
//!
//! Every generator that needs randomness takes an explicit [`rand::Rng`], so seeding it with a
//! known value gives a reproducible tree.

mod foliage;
pub mod maths;
pub mod mesh;
mod ornaments;
pub mod overlay;
mod sparkles;
mod star;

pub use self::{
    foliage::{generate_foliage, FoliagePoint, FOLIAGE_SIZE_RANGE},
    ornaments::{
        generate_ornaments, spiral_angle, OrnamentColour, OrnamentKind, OrnamentPlacement,
        GOLDEN_RATIO,
    },
    sparkles::{generate_sparkles, Sparkle},
    star::{generate_star_outline, StarOutline, STAR_INNER_RADIUS, STAR_OUTER_RADIUS, STAR_POINTS},
};
