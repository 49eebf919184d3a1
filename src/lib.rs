//! Flappy Circle - a single-screen flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird kinematics, pipes, collisions, scoring)
//! - `config`: Validated game constants
//! - `renderer`: WebGPU rendering of primitive shapes
//! - `platform`: Fixed-step frame clock shared by the browser and native drivers

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, RenderError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (pixels, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 50.0;
    pub const BIRD_RADIUS: f32 = 15.0;
    /// Downward acceleration applied every tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.1;
    /// Velocity set by a jump (negative = upward)
    pub const JUMP_IMPULSE: f32 = -6.5;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_GAP: f32 = 200.0;
    /// Horizontal distance between consecutive pipes at spawn
    pub const PIPE_INTERVAL: f32 = 200.0;
    /// Leftward scroll per tick
    pub const SCROLL_SPEED: f32 = 2.0;
}
