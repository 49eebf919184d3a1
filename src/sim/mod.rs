//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Injected, seedable RNG only
//! - Stable pipe order (oldest first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod command;
pub mod engine;
pub mod state;
pub mod tick;

pub use autopilot::{RunReport, play_run, should_flap};
pub use collision::{Collision, check_collision};
pub use command::{Command, TickOutcome};
pub use engine::Simulation;
pub use state::{Bird, GamePhase, GameState, Pipe};
