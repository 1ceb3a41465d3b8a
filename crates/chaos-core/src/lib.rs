//! Platform-free core of the sound-reactive chaos canvas.
//!
//! Everything here is plain Rust: particles, the drive signal, the per-frame
//! step and the mount lifecycle. The web front-end supplies a [`Surface`], the
//! analyser bins and pointer timestamps, and schedules [`Scene::advance`] once
//! per display frame.

pub mod config;
pub mod constants;
pub mod drive;
pub mod lifecycle;
pub mod particle;
pub mod scene;
pub mod surface;

pub use config::*;
pub use drive::*;
pub use lifecycle::*;
pub use particle::*;
pub use scene::*;
pub use surface::*;
