//! This module handles the only state that the user can change: whether the camera is
//! rotating, and whether the glow is turned up.

use bevy::prelude::*;
use tracing::debug;

/// The bloom intensity when high glow is on.
pub const HIGH_GLOW_BLOOM: f32 = 1.5;

/// The bloom intensity when high glow is off.
pub const LOW_GLOW_BLOOM: f32 = 0.5;

/// A user request to flip one of the toggles in [`ViewState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewToggle {
    /// Start or stop the camera rotating.
    Rotation,

    /// Turn the glow up or down.
    Glow,
}

/// The two toggles of the card. Both start on.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Whether the camera automatically orbits the tree.
    pub is_rotating: bool,

    /// Whether the bloom is turned up.
    pub is_high_glow: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            is_rotating: true,
            is_high_glow: true,
        }
    }
}

impl ViewState {
    /// Flip the toggle named by `toggle`.
    pub fn toggle(&mut self, toggle: ViewToggle) {
        match toggle {
            ViewToggle::Rotation => self.is_rotating = !self.is_rotating,
            ViewToggle::Glow => self.is_high_glow = !self.is_high_glow,
        }
    }

    /// Whether the camera should auto-rotate.
    pub fn auto_rotate(&self) -> bool {
        self.is_rotating
    }

    /// The bloom intensity of the camera.
    pub fn bloom_intensity(&self) -> f32 {
        if self.is_high_glow {
            HIGH_GLOW_BLOOM
        } else {
            LOW_GLOW_BLOOM
        }
    }

    /// The label of the rotation button, which says what pressing it will do.
    pub fn rotation_label(&self) -> &'static str {
        if self.is_rotating {
            "Pause"
        } else {
            "Rotate"
        }
    }
}

/// Send toggles from the keyboard: space for rotation and G for glow.
pub fn keyboard_toggles(keys: Res<Input<KeyCode>>, mut toggles: EventWriter<ViewToggle>) {
    if keys.just_pressed(KeyCode::Space) {
        toggles.send(ViewToggle::Rotation);
    }
    if keys.just_pressed(KeyCode::G) {
        toggles.send(ViewToggle::Glow);
    }
}

/// Apply all the toggles sent this frame.
pub fn apply_view_toggles(mut toggles: EventReader<ViewToggle>, mut state: ResMut<ViewState>) {
    for &toggle in toggles.iter() {
        state.toggle(toggle);
        debug!(?toggle, state = ?*state, "Toggled view");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let state = ViewState::default();
        assert!(state.is_rotating);
        assert!(state.is_high_glow);
        assert!(state.auto_rotate());
        assert_eq!(state.bloom_intensity(), 1.5);
        assert_eq!(state.rotation_label(), "Pause");
    }

    #[test]
    fn toggling_twice_is_identity() {
        for toggle in [ViewToggle::Rotation, ViewToggle::Glow] {
            let mut state = ViewState::default();
            state.toggle(toggle);
            assert_ne!(state, ViewState::default());
            state.toggle(toggle);
            assert_eq!(state, ViewState::default());
        }
    }

    #[test]
    fn toggles_are_independent() {
        let mut state = ViewState::default();

        state.toggle(ViewToggle::Glow);
        assert!(state.is_rotating);
        assert!(!state.is_high_glow);
        assert_eq!(state.bloom_intensity(), 0.5);

        state.toggle(ViewToggle::Rotation);
        assert!(!state.auto_rotate());
        assert!(!state.is_high_glow);
        assert_eq!(state.rotation_label(), "Rotate");
    }

    #[test]
    fn bloom_only_depends_on_glow() {
        for is_rotating in [true, false] {
            let on = ViewState {
                is_rotating,
                is_high_glow: true,
            };
            let off = ViewState {
                is_rotating,
                is_high_glow: false,
            };
            assert_eq!(on.bloom_intensity(), HIGH_GLOW_BLOOM);
            assert_eq!(off.bloom_intensity(), LOW_GLOW_BLOOM);
        }
    }

    /// Send a toggle event into the app's world.
    fn send_toggle(app: &mut App, toggle: ViewToggle) {
        app.world
            .resource_mut::<Events<ViewToggle>>()
            .send(toggle);
    }

    #[test]
    fn toggle_events_apply_in_the_same_frame() {
        let mut app = App::new();
        app.add_event::<ViewToggle>()
            .init_resource::<ViewState>()
            .add_system(apply_view_toggles);

        send_toggle(&mut app, ViewToggle::Glow);
        app.update();
        assert!(!app.world.resource::<ViewState>().is_high_glow);
        assert!(app.world.resource::<ViewState>().is_rotating);

        send_toggle(&mut app, ViewToggle::Glow);
        send_toggle(&mut app, ViewToggle::Rotation);
        app.update();
        assert_eq!(
            *app.world.resource::<ViewState>(),
            ViewState {
                is_rotating: false,
                is_high_glow: true,
            }
        );

        // No events means no change
        app.update();
        assert!(!app.world.resource::<ViewState>().is_rotating);
    }
}
