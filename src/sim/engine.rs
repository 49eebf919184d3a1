//! Simulation engine
//!
//! `Simulation` owns the config, the game state and the gap RNG, and is the
//! single place commands are turned into state transitions. Completely
//! headless, so every transition can be driven from tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::command::{Command, TickOutcome};
use super::state::{GamePhase, GameState};
use super::tick;
use crate::config::GameConfig;
use crate::error::Result;

/// A validated game with its own state and random source
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl Simulation<Pcg32> {
    /// Simulation with a seeded PCG generator for gap placement
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Validate the config and build an Idle simulation
    pub fn new(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let state = GameState::new(&config);
        Ok(Self { config, state, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view for renderers and HUDs
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Begin a fresh run from any phase
    pub fn start_run(&mut self) {
        tick::start_run(&mut self.state, &self.config, &mut self.rng);
    }

    /// Flap; silently ignored unless Playing
    pub fn jump(&mut self) -> bool {
        tick::jump(&mut self.state, &self.config)
    }

    /// Advance one frame
    pub fn tick(&mut self) -> TickOutcome {
        tick::tick(&mut self.state, &self.config, &mut self.rng)
    }

    /// Stop the current run; repeated calls change nothing
    pub fn end_run(&mut self) {
        tick::end_run(&mut self.state);
    }

    /// Single transition function for explicit commands
    pub fn apply(&mut self, command: Command) -> TickOutcome {
        match command {
            Command::Start => {
                self.start_run();
                TickOutcome::Continue
            }
            Command::Jump => {
                if self.jump() {
                    TickOutcome::Continue
                } else {
                    TickOutcome::Inactive
                }
            }
            Command::Tick => self.tick(),
        }
    }

    /// Map one raw input event (tap, click, key) to a command.
    ///
    /// Outside a run the press starts a new one and is not also a flap: the
    /// new run begins with zero velocity.
    pub fn press(&mut self) -> Command {
        let command = match self.state.phase {
            GamePhase::Idle | GamePhase::Ended => Command::Start,
            GamePhase::Playing => Command::Jump,
        };
        self.apply(command);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn sim() -> Simulation {
        Simulation::from_seed(GameConfig::default(), 2024).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = GameConfig {
            gap_height: 600.0,
            ..Default::default()
        };
        let result = Simulation::from_seed(config, 1);
        assert!(matches!(result, Err(ConfigError::GapTooTall { .. })));
    }

    #[test]
    fn test_construction_is_idle() {
        let sim = sim();
        assert_eq!(sim.phase(), GamePhase::Idle);
        assert_eq!(sim.score(), 0);
        assert!(sim.state().pipes.is_empty());
    }

    #[test]
    fn test_start_command_matches_reference_layout() {
        let mut sim = sim();
        assert_eq!(sim.apply(Command::Start), TickOutcome::Continue);
        let state = sim.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.pipes.len(), 2);
        assert_eq!(state.bird.pos.y, 300.0);
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_jump_command_inactive_while_idle() {
        let mut sim = sim();
        assert_eq!(sim.apply(Command::Jump), TickOutcome::Inactive);
        assert_eq!(sim.apply(Command::Tick), TickOutcome::Inactive);
        assert_eq!(sim.phase(), GamePhase::Idle);
        assert_eq!(sim.state().bird.velocity, 0.0);
    }

    #[test]
    fn test_press_starts_then_jumps() {
        let mut sim = sim();
        assert_eq!(sim.press(), Command::Start);
        assert_eq!(sim.state().bird.velocity, 0.0);

        assert_eq!(sim.press(), Command::Jump);
        assert_eq!(sim.state().bird.velocity, -6.5);
    }

    #[test]
    fn test_press_after_game_over_restarts_without_flap() {
        let mut sim = sim();
        sim.start_run();
        // Free fall until the floor ends the run
        let mut outcome = TickOutcome::Continue;
        for _ in 0..1000 {
            outcome = sim.tick();
            if !outcome.is_running() {
                break;
            }
        }
        assert!(matches!(outcome, TickOutcome::Ended(_)));
        assert_eq!(sim.phase(), GamePhase::Ended);

        assert_eq!(sim.press(), Command::Start);
        assert_eq!(sim.phase(), GamePhase::Playing);
        assert_eq!(sim.state().bird.velocity, 0.0);
        assert_eq!(sim.state().runs, 2);

        // First tick of the new run is pure gravity
        assert_eq!(sim.tick(), TickOutcome::Continue);
        assert!((sim.state().bird.velocity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_end_run_keeps_terminal_frame() {
        let mut sim = sim();
        sim.start_run();
        for _ in 0..30 {
            sim.tick();
        }
        let before = sim.state().clone();
        sim.end_run();
        sim.end_run();
        let after = sim.state();
        assert_eq!(after.phase, GamePhase::Ended);
        assert_eq!(after.score, before.score);
        assert_eq!(after.pipes, before.pipes);
        assert_eq!(after.bird, before.bird);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = sim();
        let mut b = sim();
        for sim in [&mut a, &mut b] {
            sim.start_run();
            for t in 0..400 {
                if t % 50 == 0 {
                    sim.jump();
                }
                sim.tick();
            }
        }
        assert_eq!(a.state(), b.state());
    }
}
