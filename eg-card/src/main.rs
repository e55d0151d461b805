//! This crate provides the Evergreen greeting card: a glowing Christmas tree in a window.
//!
//! The tree is generated once at startup from the config in
//! `$EVERGREEN_DATA_DIR/config/card.ron`, and everything after that is animated from a single
//! clock. The user can orbit the camera by holding left control and moving the mouse, and
//! toggle the rotation and the glow with the buttons or with space and G.

mod foliage;
mod logging;
mod overlay;
mod scene;
mod view_state;

use self::{
    foliage::{drive_scene_clock, FoliagePlugin},
    overlay::{greeting_ui, setup_overlay},
    scene::{
        drift_sparkles, float_objects, orbit_camera, setup_camera_and_lights, setup_scene,
        sync_bloom, Card, CardCameraPlugin, CardRng,
    },
    view_state::{apply_view_toggles, keyboard_toggles, ViewState, ViewToggle},
};
use bevy::{log::LogPlugin, prelude::*, DefaultPlugins};
use bevy_egui::EguiPlugin;
use color_eyre::Result;
use eg_config::CardConfig;
use std::process;
use tracing::{info, instrument, warn};

/// Load the config and run the card.
fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init_tracing();

    let config = CardConfig::from_file(&CardConfig::default_path())?;
    run_card(config);

    // Winit terminates the program when the window closes, so we should never get here. If we
    // do, then we terminate the program manually
    warn!("Winit should terminate the program when the eventloop ends, but it hasn't");
    process::exit(255);
}

/// Run the card with Bevy.
#[instrument(skip_all)]
fn run_card(config: CardConfig) {
    let rng = CardRng::new(config.seed);
    let title = format!("{} {}", config.greeting.title, config.greeting.title_emphasis);

    // Logging is handled by our own subscriber, so Bevy's is disabled
    info!("Starting bevy app");
    App::new()
        .insert_resource(Msaa { samples: 1 })
        .insert_resource(Card(config))
        .insert_resource(rng)
        .init_resource::<ViewState>()
        .add_event::<ViewToggle>()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    window: WindowDescriptor {
                        title,
                        ..default()
                    },
                    ..default()
                }),
        )
        .add_plugin(CardCameraPlugin)
        .add_plugin(EguiPlugin)
        .add_plugin(FoliagePlugin)
        .add_startup_system(setup_camera_and_lights)
        .add_startup_system(setup_scene)
        .add_startup_system(setup_overlay.after(setup_scene))
        .add_system(keyboard_toggles)
        .add_system(greeting_ui)
        .add_system(
            apply_view_toggles
                .after(keyboard_toggles)
                .after(greeting_ui)
                .before(orbit_camera),
        )
        .add_system(sync_bloom.after(apply_view_toggles))
        .add_system(float_objects.after(drive_scene_clock))
        .add_system(drift_sparkles.after(drive_scene_clock))
        .run();
}
