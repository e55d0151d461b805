//! This module contains the foliage shader and a CPU copy of its maths.
//!
//! The WGSL in `foliage.wgsl` is the source of truth for rendering. The functions here do the
//! same calculations so that the animation can be checked without a GPU, and any change to one
//! should be made to the other. Bump [`FOLIAGE_SHADER_VERSION`] when the interface changes.

use eg_config::{linear_rgb, Palette};
use eg_generate::{maths::smoothstep, FoliagePoint};
use glam::{Vec2, Vec3};

/// The WGSL source of the foliage shader, with a `vertex` and a `fragment` entry point.
pub const FOLIAGE_WGSL: &str = include_str!("foliage.wgsl");

/// The version of the foliage shader and of [`FoliageUniforms`].
pub const FOLIAGE_SHADER_VERSION: u32 = 1;

/// The uniforms of the foliage shader, in the same order as the WGSL `FoliageMaterial`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliageUniforms {
    /// The linear colour of the foliage at the bottom of the tree.
    pub colour_base: Vec3,

    /// The linear colour that the foliage is blended towards near the top.
    pub colour_highlight: Vec3,

    /// The elapsed time in seconds. This is the only uniform that changes every frame.
    pub time: f32,

    /// How far the top of the tree sways in the wind.
    pub sway_amplitude: f32,

    /// How far each particle breathes in and out.
    pub breath_amplitude: f32,

    /// The on-screen size in pixels of a particle of size 1 at a depth of 1.
    pub size_attenuation: f32,
}

impl FoliageUniforms {
    /// The starting uniforms, with colours taken from the palette.
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            colour_base: Vec3::from(linear_rgb(palette.emerald_dark)),
            colour_highlight: Vec3::from(linear_rgb(palette.gold_highlight)),
            time: 0.,
            sway_amplitude: 0.1,
            breath_amplitude: 0.03,
            size_attenuation: 300.,
        }
    }

    /// How much a particle at height `y` is affected by the wind, from 0 at the base to 1 at a
    /// height of 10.
    pub fn height_factor(y: f32) -> f32 {
        smoothstep(0., 10., y)
    }

    /// The animated position of the particle at the current time.
    pub fn displace(&self, point: &FoliagePoint) -> Vec3 {
        let t = self.time;
        let mut pos = point.position;
        let height_factor = Self::height_factor(pos.y);

        pos.x += (t + pos.y * 0.5).sin() * self.sway_amplitude * height_factor;
        pos.z += (t * 0.8 + pos.x * 0.5).cos() * self.sway_amplitude * height_factor;

        pos + point.breath_direction
            * (t * 2. + point.random_seed * 10.).sin()
            * self.breath_amplitude
    }

    /// The linear colour of the particle, which gets warmer towards the top of the tree.
    pub fn colour(&self, point: &FoliagePoint) -> Vec3 {
        let mix_factor = point.random_seed * 0.1 + Self::height_factor(point.position.y) * 0.2;
        self.colour_base.lerp(self.colour_highlight, mix_factor)
    }

    /// The flickering alpha of the particle, always in `[0.6, 1]`.
    pub fn alpha(&self, point: &FoliagePoint) -> f32 {
        0.8 + 0.2 * (self.time * 3. + point.random_seed * 100.).sin()
    }

    /// The size in pixels of a particle at the given view space depth, which is negative in
    /// front of the camera.
    pub fn attenuated_size(&self, size: f32, view_z: f32) -> f32 {
        size * self.size_attenuation / (-view_z).max(0.0001)
    }
}

/// The glow strength of a fragment at the given point on the particle quad, where `(0.5, 0.5)`
/// is the centre, or `None` if the fragment is outside the circle and gets discarded.
pub fn sprite_strength(corner: Vec2) -> Option<f32> {
    let dist = corner.distance(Vec2::splat(0.5));
    if dist > 0.5 {
        None
    } else {
        Some((1. - dist * 2.).powi(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eg_config::TreeConfig;
    use eg_generate::generate_foliage;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f32::consts::PI;

    /// A particle at the given position with no breathing.
    fn still_point(position: Vec3) -> FoliagePoint {
        FoliagePoint {
            position,
            size: 0.5,
            random_seed: 0.25,
            breath_direction: Vec3::ZERO,
        }
    }

    #[test]
    fn wgsl_matches_uniforms() {
        for name in [
            "colour_base",
            "colour_highlight",
            "time",
            "sway_amplitude",
            "breath_amplitude",
            "size_attenuation",
        ] {
            assert!(FOLIAGE_WGSL.contains(&format!("{name}: ")), "Missing {name}");
        }

        assert!(FOLIAGE_WGSL.contains("fn vertex("));
        assert!(FOLIAGE_WGSL.contains("fn fragment("));
        assert!(FOLIAGE_WGSL.contains(&format!("version {FOLIAGE_SHADER_VERSION}.")));
    }

    #[test]
    fn base_of_tree_does_not_sway() {
        let mut uniforms = FoliageUniforms::from_palette(&Palette::default());
        let point = still_point(Vec3::new(1., 0., -1.));

        for time in [0., 0.5, 3., 100.] {
            uniforms.time = time;
            assert_eq!(uniforms.displace(&point), point.position);
        }
    }

    #[test]
    fn sway_grows_with_height() {
        let mut uniforms = FoliageUniforms::from_palette(&Palette::default());
        uniforms.time = PI / 2.;

        let low = still_point(Vec3::new(0., 1., 0.));
        let high = still_point(Vec3::new(0., 8., 0.));

        let low_sway = uniforms.displace(&low) - low.position;
        let high_sway = uniforms.displace(&high) - high.position;
        assert!(high_sway.x.abs() > low_sway.x.abs());
        assert!(high_sway.length() <= 0.1 * 2f32.sqrt() + 1e-6);
        assert_eq!(high_sway.y, 0.);
    }

    #[test]
    fn breathing_follows_the_breath_direction() {
        let mut uniforms = FoliageUniforms::from_palette(&Palette::default());
        let point = FoliagePoint {
            position: Vec3::ZERO,
            size: 0.5,
            random_seed: 0.,
            breath_direction: Vec3::Y,
        };

        uniforms.time = PI / 4.;
        let displaced = uniforms.displace(&point);
        assert!(approx_eq!(f32, displaced.y, 0.03, epsilon = 1e-6));

        uniforms.time = 3. * PI / 4.;
        let displaced = uniforms.displace(&point);
        assert!(approx_eq!(f32, displaced.y, -0.03, epsilon = 1e-6));
    }

    #[test]
    fn colour_gets_warmer_higher_up() {
        let uniforms = FoliageUniforms::from_palette(&Palette::default());

        let bottom = still_point(Vec3::ZERO);
        let top = still_point(Vec3::new(0., 9., 0.));

        let bottom_colour = uniforms.colour(&bottom);
        let top_colour = uniforms.colour(&top);
        assert!(top_colour.x > bottom_colour.x);

        // At the very bottom, only the seed contributes
        let expected = uniforms
            .colour_base
            .lerp(uniforms.colour_highlight, 0.25 * 0.1);
        assert!(bottom_colour.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn alpha_stays_in_range() {
        let mut uniforms = FoliageUniforms::from_palette(&Palette::default());
        let point = still_point(Vec3::ZERO);

        for step in 0..1000 {
            uniforms.time = step as f32 * 0.01;
            let alpha = uniforms.alpha(&point);
            assert!((0.6 - 1e-6..=1. + 1e-6).contains(&alpha), "{alpha}");
        }
    }

    #[test]
    fn generated_foliage_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(12345);
        let points = generate_foliage(500, &TreeConfig::default(), &mut rng);
        let mut uniforms = FoliageUniforms::from_palette(&Palette::default());

        // The warmest a particle can be is 0.1 from its seed and 0.2 from its height
        let warmest = uniforms.colour_base.lerp(uniforms.colour_highlight, 0.3);
        let lowest = uniforms.colour_base.min(warmest) - Vec3::splat(1e-6);
        let highest = uniforms.colour_base.max(warmest) + Vec3::splat(1e-6);

        for time in [0., 0.7, 2.5, 13., 240.] {
            uniforms.time = time;

            for point in &points {
                let alpha = uniforms.alpha(point);
                assert!((0.6 - 1e-6..=1. + 1e-6).contains(&alpha), "{alpha}");

                let breath = point.breath_direction
                    * (time * 2. + point.random_seed * 10.).sin()
                    * uniforms.breath_amplitude;
                let sway = uniforms.displace(point) - point.position - breath;
                assert!(sway.y.abs() < 1e-5);
                assert!(
                    sway.length() <= 0.1 * 2f32.sqrt() + 1e-5,
                    "Sway {sway:?} at time {time} is too far"
                );

                let colour = uniforms.colour(point);
                assert!(
                    colour.cmpge(lowest).all() && colour.cmple(highest).all(),
                    "Colour {colour:?} is not between the base and 30% highlight"
                );
            }
        }
    }

    #[test]
    fn size_attenuation_test() {
        let uniforms = FoliageUniforms::from_palette(&Palette::default());
        assert!(approx_eq!(f32, uniforms.attenuated_size(0.5, -1.), 150.));
        assert!(approx_eq!(f32, uniforms.attenuated_size(0.5, -10.), 15.));
        assert!(uniforms.attenuated_size(0.5, 0.).is_finite());
    }

    #[test]
    fn sprite_strength_test() {
        assert_eq!(sprite_strength(Vec2::splat(0.5)), Some(1.));
        assert_eq!(sprite_strength(Vec2::new(1., 0.5)), Some(0.));
        assert!(approx_eq!(
            f32,
            sprite_strength(Vec2::new(0.75, 0.5)).unwrap(),
            0.25
        ));
        assert_eq!(sprite_strength(Vec2::new(0., 0.)), None);
        assert_eq!(sprite_strength(Vec2::new(1., 1.)), None);
    }
}
