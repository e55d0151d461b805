//! This module generates the RGBA8 textures that are laid over the whole screen: a vignette to
//! darken the corners, and film grain.

use crate::maths::smoothstep;
use rand::Rng;
use std::f32::consts::FRAC_1_SQRT_2;

/// Generate a black vignette texture, row by row.
///
/// The alpha is zero within `offset` of the centre (as a fraction of the distance to the
/// corners) and rises smoothly to `darkness` in the corners.
pub fn vignette_rgba(width: u32, height: u32, offset: f32, darkness: f32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let u = (x as f32 + 0.5) / width as f32 - 0.5;
            let v = (y as f32 + 0.5) / height as f32 - 0.5;

            // Normalised so that the corners are at a distance of 1
            let dist = u.hypot(v) / FRAC_1_SQRT_2;
            let alpha = darkness.clamp(0., 1.) * smoothstep(offset, 1., dist);

            data.extend([0, 0, 0, (alpha * 255.).round() as u8]);
        }
    }

    data
}

/// Generate a film grain texture of random greys with a constant alpha of `opacity`.
pub fn grain_rgba<R: Rng + ?Sized>(width: u32, height: u32, opacity: f32, rng: &mut R) -> Vec<u8> {
    let alpha = (opacity.clamp(0., 1.) * 255.).round() as u8;

    (0..width * height)
        .flat_map(|_| {
            let grey: u8 = rng.gen();
            [grey, grey, grey, alpha]
        })
        .collect()
}
