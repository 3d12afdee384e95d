//! Space Invaders arcade board on top of the 8080 interpreter core.
//!
//! Rendering and sound playback are left to the host: it reads
//! [`SpaceInvadersMachine::video_ram`] and [`SpaceInvadersMachine::outputs`].

pub mod machine;
pub mod ports;

pub use machine::{MachineConfig, SpaceInvadersMachine};
pub use ports::{Button, DipConfig, InvadersIo};

/// Logical screen width in pixels (Space Invaders is 224x256, rotated).
pub const SCREEN_WIDTH: usize = 224;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 256;
