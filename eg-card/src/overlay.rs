//! This module handles everything drawn over the 3D scene: the greeting and the toggle buttons
//! with egui, and the vignette and film grain with Bevy UI images.

use crate::{
    scene::{Card, CardRng},
    view_state::{ViewState, ViewToggle},
};
use bevy::{
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureDimension, TextureFormat},
        texture::ImageSampler,
    },
};
use bevy_egui::{
    egui::{self, Align2, Color32, RichText},
    EguiContext,
};
use eg_config::RGBArray;
use eg_generate::overlay::{grain_rgba, vignette_rgba};
use tracing::{debug, instrument};

/// The side length of the vignette texture. It's smooth, so it can be small and stretched.
const VIGNETTE_SIZE: u32 = 256;

/// The side length of the grain texture.
const GRAIN_SIZE: u32 = 512;

/// Where the vignette starts to darken, as a fraction of the distance to the corners.
const VIGNETTE_OFFSET: f32 = 0.1;

/// How dark the corners of the vignette are.
const VIGNETTE_DARKNESS: f32 = 0.8;

/// How visible the film grain is.
const GRAIN_OPACITY: f32 = 0.02;

/// Convert an sRGB colour from the palette into an egui colour.
fn egui_colour([r, g, b]: RGBArray) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Wrap RGBA8 data in a Bevy image.
pub fn overlay_image(width: u32, height: u32, data: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
    )
}

/// Lay the vignette and the film grain over the whole window.
#[instrument(skip_all)]
pub fn setup_overlay(
    mut commands: Commands,
    mut rng: ResMut<CardRng>,
    mut images: ResMut<Assets<Image>>,
) {
    let vignette = images.add(overlay_image(
        VIGNETTE_SIZE,
        VIGNETTE_SIZE,
        vignette_rgba(VIGNETTE_SIZE, VIGNETTE_SIZE, VIGNETTE_OFFSET, VIGNETTE_DARKNESS),
    ));

    let mut grain = overlay_image(
        GRAIN_SIZE,
        GRAIN_SIZE,
        grain_rgba(GRAIN_SIZE, GRAIN_SIZE, GRAIN_OPACITY, &mut rng.0),
    );
    // Keep the grain crisp when stretched
    grain.sampler_descriptor = ImageSampler::nearest();
    let grain = images.add(grain);

    let full_screen = Style {
        size: Size::new(Val::Percent(100.), Val::Percent(100.)),
        position_type: PositionType::Absolute,
        ..default()
    };

    for image in [vignette, grain] {
        commands.spawn(ImageBundle {
            style: full_screen.clone(),
            image: UiImage(image),
            ..default()
        });
    }

    debug!("Added screen overlay");
}

/// Draw the greeting and the toggle buttons, and send a [`ViewToggle`] when one is clicked.
pub fn greeting_ui(
    mut egui_context: ResMut<EguiContext>,
    card: Res<Card>,
    view_state: Res<ViewState>,
    mut toggles: EventWriter<ViewToggle>,
) {
    let ctx = egui_context.ctx_mut();
    let greeting = &card.greeting;
    let gold = egui_colour(card.palette.gold);
    let gold_warm = egui_colour(card.palette.gold_warm);

    egui::Area::new("greeting")
        .anchor(Align2::LEFT_TOP, [40., 40.])
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(&greeting.title).size(28.).italics().color(gold_warm));
            ui.label(
                RichText::new(&greeting.title_emphasis)
                    .size(56.)
                    .strong()
                    .color(gold),
            );
            ui.add_space(8.);
            ui.label(
                RichText::new(&greeting.subtitle)
                    .size(16.)
                    .color(gold_warm.linear_multiply(0.8)),
            );
        });

    egui::Area::new("toggles")
        .anchor(Align2::RIGHT_BOTTOM, [-40., -40.])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&greeting.recipient).italics().color(gold_warm));
                ui.add_space(16.);

                let rotation = egui::Button::new(
                    RichText::new(view_state.rotation_label()).color(gold),
                )
                .fill(egui_colour(card.palette.emerald_light));
                if ui.add(rotation).clicked() {
                    toggles.send(ViewToggle::Rotation);
                }

                let glow = egui::SelectableLabel::new(
                    view_state.is_high_glow,
                    RichText::new("Radiance").color(gold),
                );
                if ui.add(glow).clicked() {
                    toggles.send(ViewToggle::Glow);
                }
            });
        });
}
