//! This crate provides everything that changes with time: the foliage shader and its typed
//! uniforms, the clock that drives it, and the closed-form motions of the star, the sparkles,
//! and the camera.
//!
//! Nothing in here reads a global clock. Every animation is a pure function of an elapsed time
//! that the caller passes in.

mod clock;
pub mod foliage;
mod motion;
pub mod orbit;

pub use self::{
    clock::{drive_frame, ShaderClock},
    foliage::{FoliageUniforms, FOLIAGE_SHADER_VERSION, FOLIAGE_WGSL},
    motion::{sparkle_offset, sparkle_scale, FloatMotion, FloatPose},
};
