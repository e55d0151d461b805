//! This module contains the clock that drives the foliage shader.

use crate::FoliageUniforms;
use tracing::trace;

/// The elapsed time of the mounted scene, in seconds.
///
/// The clock is relative to the moment the scene was mounted and never goes backwards, even if
/// the framework clock it's fed from does.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShaderClock {
    /// The framework time when the scene was mounted.
    origin: f32,

    /// The time since the scene was mounted.
    elapsed: f32,
}

impl ShaderClock {
    /// Start a new clock for a scene mounted at the given framework time.
    pub fn mounted_at(now: f32) -> Self {
        Self {
            origin: now,
            elapsed: 0.,
        }
    }

    /// The time since the scene was mounted.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the clock to the given framework time and return the new elapsed time.
    pub fn tick(&mut self, now: f32) -> f32 {
        let elapsed = now - self.origin;
        if elapsed > self.elapsed {
            self.elapsed = elapsed;
        }
        self.elapsed
    }
}

/// Run the per-frame update: advance the clock to `now` and push the elapsed time into the
/// shader's time uniform.
///
/// `uniforms` is `None` until the material has been attached to the scene, in which case only
/// the clock moves. Returns whether the uniform was written.
pub fn drive_frame(
    clock: &mut ShaderClock,
    uniforms: Option<&mut FoliageUniforms>,
    now: f32,
) -> bool {
    let elapsed = clock.tick(now);

    match uniforms {
        Some(uniforms) => {
            uniforms.time = elapsed;
            true
        }
        None => {
            trace!(elapsed, "Foliage material not attached yet");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eg_config::Palette;

    #[test]
    fn clock_is_relative_to_mount() {
        let mut clock = ShaderClock::mounted_at(10.);
        assert_eq!(clock.elapsed(), 0.);
        assert_eq!(clock.tick(10.5), 0.5);
        assert_eq!(clock.tick(12.), 2.);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let mut clock = ShaderClock::default();
        assert_eq!(clock.tick(3.), 3.);
        assert_eq!(clock.tick(1.), 3.);
        assert_eq!(clock.tick(f32::NAN), 3.);
        assert_eq!(clock.tick(4.), 4.);
    }

    #[test]
    fn drive_frame_writes_time() {
        let mut clock = ShaderClock::default();
        let mut uniforms = FoliageUniforms::from_palette(&Palette::default());

        assert!(drive_frame(&mut clock, Some(&mut uniforms), 1.25));
        assert_eq!(uniforms.time, 1.25);

        assert!(drive_frame(&mut clock, Some(&mut uniforms), 2.5));
        assert_eq!(uniforms.time, 2.5);
    }

    #[test]
    fn drive_frame_without_material() {
        let mut clock = ShaderClock::default();
        assert!(!drive_frame(&mut clock, None, 0.75));
        assert_eq!(clock.elapsed(), 0.75);

        // Once the material turns up, it gets the current time straight away
        let mut uniforms = FoliageUniforms::from_palette(&Palette::default());
        assert!(drive_frame(&mut clock, Some(&mut uniforms), 0.8));
        assert_eq!(uniforms.time, clock.elapsed());
    }
}
