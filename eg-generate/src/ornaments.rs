//! This module places the gifts and baubles on the tree with a golden-angle spiral.

use eg_config::{Palette, RGBArray, TreeConfig};
use glam::Vec3;
use rand::Rng;
use std::{f32::consts::PI, f64::consts::TAU, ops::Range};
use strum::EnumIter;
use tracing::{debug, instrument};

/// The golden ratio, `(1 + sqrt(5)) / 2`.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// The two populations of ornaments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum OrnamentKind {
    /// Big gift boxes. There are fewer of these.
    Heavy,

    /// Small shiny baubles.
    Light,
}

impl OrnamentKind {
    /// The range that the scale of this kind of ornament is drawn from.
    pub fn scale_range(self) -> Range<f32> {
        match self {
            Self::Heavy => 0.25..0.55,
            Self::Light => 0.15..0.35,
        }
    }

    /// Randomly choose a colour for one ornament of this kind.
    fn choose_colour<R: Rng + ?Sized>(self, rng: &mut R) -> OrnamentColour {
        match self {
            Self::Heavy if rng.gen_bool(0.5) => OrnamentColour::GiftRed,
            Self::Heavy => OrnamentColour::GiftGreen,
            Self::Light if rng.gen_bool(0.3) => OrnamentColour::GoldWarm,
            Self::Light => OrnamentColour::Gold,
        }
    }
}

/// The colour of a single ornament, which is a per-instance override of the shared material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum OrnamentColour {
    GiftRed,
    GiftGreen,
    Gold,
    GoldWarm,
}

impl OrnamentColour {
    /// Look up this colour in the palette.
    pub fn srgb(self, palette: &Palette) -> RGBArray {
        match self {
            Self::GiftRed => palette.gift_red,
            Self::GiftGreen => palette.gift_green,
            Self::Gold => palette.gold,
            Self::GoldWarm => palette.gold_warm,
        }
    }
}

/// Where and how to draw one ornament.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentPlacement {
    /// The centre of the ornament, relative to the base of the tree.
    pub position: Vec3,

    /// The uniform scale of the ornament mesh.
    pub scale: f32,

    /// The Euler angles (XYZ, in radians) of the ornament. The z angle is always zero.
    pub rotation: Vec3,

    /// The colour of this ornament.
    pub colour: OrnamentColour,
}

/// The angle around the trunk of the `index`th ornament in a spiral, in `[0, 2π)`.
///
/// Every ornament is a golden turn further around than the last one. The golden ratio is
/// irrational, so no two ornaments in a population ever share an angle.
pub fn spiral_angle(index: usize) -> f32 {
    (index as f64 * TAU * GOLDEN_RATIO).rem_euclid(TAU) as f32
}

/// Generate `count` ornaments of the given kind, spiralling up the tree.
///
/// The heights are spread evenly through [`TreeConfig::ornament_band`], and each ornament is
/// pulled in a little from the surface of the cone so that it sits among the foliage.
#[instrument(skip(rng))]
pub fn generate_ornaments<R: Rng + ?Sized>(
    count: usize,
    kind: OrnamentKind,
    tree: &TreeConfig,
    rng: &mut R,
) -> Vec<OrnamentPlacement> {
    let (min_y, max_y) = tree.ornament_band();

    let ornaments: Vec<OrnamentPlacement> = (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let y = min_y + t * (max_y - min_y);
            let r = tree.radius_at(y) * 0.85 + rng.gen_range(0.0..0.2);
            let theta = spiral_angle(i);

            OrnamentPlacement {
                position: Vec3::new(r * theta.cos(), y, r * theta.sin()),
                scale: rng.gen_range(kind.scale_range()),
                rotation: Vec3::new(rng.gen_range(0.0..PI), rng.gen_range(0.0..PI), 0.),
                colour: kind.choose_colour(rng),
            }
        })
        .collect();

    debug!(count = ornaments.len(), "Generated ornaments");
    ornaments
}
