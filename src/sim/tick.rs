//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation deterministically. Each
//! function takes the state, the config and (where pipes are spawned) the
//! injected RNG, so tests can drive any of them in isolation.

use rand::Rng;

use super::collision::check_collision;
use super::command::TickOutcome;
use super::state::{GamePhase, GameState, Pipe};
use crate::config::GameConfig;

/// Draw a gap top uniformly from `[0, height - gap_height)`
pub fn random_gap_top<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> f32 {
    rng.random_range(0.0..config.gap_top_range())
}

/// Append a pipe with a fresh random gap at `x`
fn spawn_pipe<R: Rng + ?Sized>(state: &mut GameState, config: &GameConfig, rng: &mut R, x: f32) {
    let gap_top = random_gap_top(config, rng);
    let id = state.next_entity_id();
    state.pipes.push_back(Pipe::new(id, x, gap_top, config));
}

/// Begin a fresh run from any phase
pub fn start_run<R: Rng + ?Sized>(state: &mut GameState, config: &GameConfig, rng: &mut R) {
    state.phase = GamePhase::Playing;
    state.bird.reset(config);
    state.pipes.clear();
    state.score = 0;
    state.time_ticks = 0;
    state.runs += 1;

    for i in 0..config.pipe_count() {
        let x = config.width + i as f32 * config.spawn_interval;
        spawn_pipe(state, config, rng, x);
    }

    log::info!("Run {} started with {} pipes", state.runs, state.pipes.len());
}

/// Flap. Returns false (and changes nothing) unless a run is in progress.
pub fn jump(state: &mut GameState, config: &GameConfig) -> bool {
    if !state.is_playing() {
        return false;
    }
    state.bird.flap(config.jump_impulse);
    true
}

/// Stop the run, keeping the terminal frame for display. Idempotent.
pub fn end_run(state: &mut GameState) {
    if state.phase == GamePhase::Playing {
        state.phase = GamePhase::Ended;
        log::info!(
            "Run {} ended after {} ticks with score {}",
            state.runs,
            state.time_ticks,
            state.score
        );
    }
}

/// Replace the leftmost pipe once it is fully off-screen.
///
/// Pipes are evenly spaced, so at most one can leave per tick.
pub fn recycle_pipe<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> bool {
    if !state.front_pipe().is_some_and(Pipe::is_offscreen) {
        return false;
    }
    if let Some(old) = state.pipes.pop_front() {
        log::debug!("Recycled pipe {} at x={}", old.id, old.x);
    }
    spawn_pipe(state, config, rng, config.width);
    true
}

/// Award a point for every pipe the bird has fully passed. Returns points gained.
pub fn score_passed_pipes(state: &mut GameState) -> u32 {
    let bird_x = state.bird.pos.x;
    let mut gained = 0;
    for pipe in state
        .pipes
        .iter_mut()
        .filter(|p| !p.scored && p.right() < bird_x)
    {
        pipe.scored = true;
        gained += 1;
    }
    if gained > 0 {
        state.score += gained;
        log::debug!("Score {}", state.score);
    }
    gained
}

/// Advance the game state by one tick.
///
/// The order is fixed: move the bird, scroll pipes, recycle, collide, score.
/// A colliding tick ends the run before scoring.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> TickOutcome {
    if !state.is_playing() {
        return TickOutcome::Inactive;
    }

    state.time_ticks += 1;

    state.bird.integrate(config.gravity);

    for pipe in &mut state.pipes {
        pipe.x -= config.scroll_speed;
    }

    recycle_pipe(state, config, rng);

    if let Some(collision) = check_collision(&state.bird, &state.pipes, config.height) {
        log::debug!("Collision: {:?}", collision);
        end_run(state);
        return TickOutcome::Ended(collision);
    }

    score_passed_pipes(state);

    TickOutcome::Continue
}
