//! Game state and core simulation types
//!
//! Everything the renderer reads lives here. Mutation goes through the
//! functions in `tick`.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing has been started yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended by a collision, terminal frame kept for display
    Ended,
}

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// x never changes during a run; pipes scroll instead
    pub pos: Vec2,
    /// Vertical velocity (pixels/tick, positive = downward)
    pub velocity: f32,
    pub radius: f32,
}

impl Bird {
    /// Bird at rest in the vertical middle of the playfield
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.bird_x, config.height / 2.0),
            velocity: 0.0,
            radius: config.bird_radius,
        }
    }

    /// Put the bird back at its run-start position
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// Apply one tick of gravity, then move
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Replace the current velocity with the jump impulse
    pub fn flap(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// A pipe: a vertical bar with one gap the bird must fly through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    /// Same for every pipe; the bottom edge is derived from it
    pub gap_height: f32,
    /// Set once the bird has fully passed this pipe
    pub scored: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap_top: f32, config: &GameConfig) -> Self {
        Self {
            id,
            x,
            width: config.pipe_width,
            gap_top,
            gap_height: config.gap_height,
            scored: false,
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the gap
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Entirely left of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Pipes cleared this run
    pub score: u32,
    pub bird: Bird,
    /// Oldest (leftmost) first
    pub pipes: VecDeque<Pipe>,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Runs started since construction
    pub runs: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Idle state: bird centered, no pipes, zero score
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            bird: Bird::new(config),
            pipes: VecDeque::new(),
            time_ticks: 0,
            runs: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Leftmost pipe, the only recycle candidate
    pub fn front_pipe(&self) -> Option<&Pipe> {
        self.pipes.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_bird_integrate_applies_gravity_before_moving() {
        let config = GameConfig::default();
        let mut bird = Bird::new(&config);
        bird.integrate(0.1);
        assert!((bird.velocity - 0.1).abs() < 1e-6);
        assert!((bird.pos.y - 300.1).abs() < 1e-4);
        assert_eq!(bird.pos.x, 50.0);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let config = GameConfig::default();
        let mut bird = Bird::new(&config);
        bird.velocity = 12.0;
        bird.flap(-6.5);
        assert_eq!(bird.velocity, -6.5);
        bird.velocity = -3.0;
        bird.flap(-6.5);
        assert_eq!(bird.velocity, -6.5);
    }

    #[test]
    fn test_pipe_gap_and_edges() {
        let config = GameConfig::default();
        let pipe = Pipe::new(1, -10.0, 120.0, &config);
        assert_eq!(pipe.gap_bottom(), 320.0);
        assert_eq!(pipe.gap_height, config.gap_height);
        assert_eq!(pipe.right(), 40.0);
        assert!(!pipe.is_offscreen());

        let gone = Pipe::new(2, -50.0, 0.0, &config);
        assert!(gone.is_offscreen());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
