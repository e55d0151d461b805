//! This module contains the colour palette of the card.

use serde::{Deserialize, Serialize};

/// An sRGB colour.
pub type RGBArray = [u8; 3];

/// Every colour used by the card, in sRGB.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// The dark green at the bottom of the foliage, also used for the ambient light.
    pub emerald_dark: RGBArray,

    /// A lighter green, used for the UI button fill.
    pub emerald_light: RGBArray,

    /// Pure gold, for the star and the baubles.
    pub gold: RGBArray,

    /// A warmer, slightly darker gold, for some baubles and the UI text.
    pub gold_warm: RGBArray,

    /// The pale gold that the foliage fades into near the top of the tree.
    pub gold_highlight: RGBArray,

    /// The emissive colour of the star.
    pub star_emissive: RGBArray,

    /// The window background.
    pub background: RGBArray,

    /// The dark core inside the foliage that stops the background showing through.
    pub core: RGBArray,

    /// The colour of the tree base.
    pub base: RGBArray,

    /// The first gift colour.
    pub gift_red: RGBArray,

    /// The second gift colour.
    pub gift_green: RGBArray,

    /// The colour of the drifting sparkles.
    pub sparkle: RGBArray,

    /// The cool fill light behind the tree.
    pub fill_light: RGBArray,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            emerald_dark: [0x00, 0x2a, 0x15],
            emerald_light: [0x00, 0x4b, 0x23],
            gold: [0xff, 0xd7, 0x00],
            gold_warm: [0xd4, 0xaf, 0x37],
            gold_highlight: [0xff, 0xfa, 0xcd],
            star_emissive: [0xff, 0xcc, 0x00],
            background: [0x05, 0x05, 0x05],
            core: [0x00, 0x10, 0x05],
            base: [0x11, 0x11, 0x11],
            gift_red: [0x8b, 0x00, 0x00],
            gift_green: [0x00, 0x33, 0x11],
            sparkle: [0xff, 0xfe, 0xe0],
            fill_light: [0x20, 0x40, 0x40],
        }
    }
}

/// Convert an sRGB colour into linear RGB components in `[0, 1]`.
pub fn linear_rgb(colour: RGBArray) -> [f32; 3] {
    colour.map(|c| {
        let c = c as f32 / 255.;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    })
}
