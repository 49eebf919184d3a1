//! Demo-mode autopilot
//!
//! Each tick the bird is rolled forward against the current pipes under a
//! family of plans with at most two flaps, the second one only once the
//! first has stopped rising. The autopilot presses only when flapping right
//! now beats every plan whose first flap comes later, i.e. at the last
//! moment a flap still helps.

use std::ops::Range;

use rand::Rng;

use super::collision::{Collision, check_collision};
use super::command::TickOutcome;
use super::engine::Simulation;
use super::state::{Bird, GameState, Pipe};
use crate::config::GameConfig;

/// Ticks of lookahead; two full flap rises (~65 ticks each) plus time to clear a pipe
pub const LOOKAHEAD_TICKS: u32 = 160;

/// Bird and pipes stepped forward without recycling or scoring
#[derive(Debug, Clone)]
struct Rollout {
    bird: Bird,
    pipes: Vec<Pipe>,
    /// Ticks survived so far
    t: u32,
}

impl Rollout {
    fn new(bird: &Bird, pipes: &[Pipe]) -> Self {
        Self {
            bird: bird.clone(),
            pipes: pipes.to_vec(),
            t: 0,
        }
    }

    /// One tick of movement; false if it ends in a collision
    fn step(&mut self, flap: bool, config: &GameConfig) -> bool {
        if flap {
            self.bird.flap(config.jump_impulse);
        }
        self.bird.integrate(config.gravity);
        for pipe in &mut self.pipes {
            pipe.x -= config.scroll_speed;
        }
        if check_collision(&self.bird, &self.pipes, config.height).is_some() {
            return false;
        }
        self.t += 1;
        true
    }

    /// Fly on, flapping once at `flap_at` if given, until a collision or `horizon`
    fn survive(mut self, flap_at: Option<u32>, horizon: u32, config: &GameConfig) -> u32 {
        while self.t < horizon {
            if !self.step(flap_at == Some(self.t), config) {
                break;
            }
        }
        self.t
    }
}

/// Ticks survived (capped at `horizon`) when flapping at each tick in `flaps`
pub fn plan_survival(
    bird: &Bird,
    pipes: &[Pipe],
    config: &GameConfig,
    flaps: &[u32],
    horizon: u32,
) -> u32 {
    let mut roll = Rollout::new(bird, pipes);
    while roll.t < horizon {
        if !roll.step(flaps.contains(&roll.t), config) {
            break;
        }
    }
    roll.t
}

/// Ticks from a flap until the bird stops rising, at least 1
pub fn flap_spacing(config: &GameConfig, horizon: u32) -> u32 {
    let ticks = (-config.jump_impulse / config.gravity).ceil();
    (ticks.clamp(1.0, horizon as f32) as u32).max(1)
}

/// Best survival over plans whose first flap falls in `first`, optionally
/// followed by a second flap once the bird has stopped rising
fn best_plan(start: &Rollout, first: Range<u32>, horizon: u32, config: &GameConfig) -> u32 {
    let spacing = flap_spacing(config, horizon);
    let mut best = 0;

    for k1 in first {
        let mut roll = start.clone();
        let second_from = (k1 + spacing).min(horizon);
        let mut crashed = false;
        while roll.t < second_from {
            if !roll.step(roll.t == k1, config) {
                crashed = true;
                break;
            }
        }

        if crashed || roll.t >= horizon {
            best = best.max(roll.t);
        } else {
            best = best.max(roll.clone().survive(None, horizon, config));
            for k2 in second_from..horizon {
                if best >= horizon {
                    break;
                }
                best = best.max(roll.clone().survive(Some(k2), horizon, config));
            }
        }

        if best >= horizon {
            break;
        }
    }
    best
}

/// Whether the autopilot wants to press this tick
pub fn should_flap(state: &GameState, config: &GameConfig) -> bool {
    if !state.is_playing() {
        return false;
    }

    let horizon = LOOKAHEAD_TICKS;
    let pipes: Vec<Pipe> = state.pipes.iter().cloned().collect();
    let start = Rollout::new(&state.bird, &pipes);

    let coast = start.clone().survive(None, horizon, config);
    if coast >= horizon {
        return false;
    }
    let later = coast.max(best_plan(&start, 1..horizon, horizon, config));
    if later >= horizon {
        return false;
    }
    best_plan(&start, 0..1, horizon, config) > later
}

/// Result of one autopilot-driven run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub score: u32,
    pub ticks: u64,
    /// None if the run was still alive at the tick cap
    pub collision: Option<Collision>,
}

/// Start a fresh run and let the autopilot play it until it ends or
/// `max_ticks` have elapsed. A run still alive at the cap is ended.
pub fn play_run<R: Rng>(sim: &mut Simulation<R>, max_ticks: u64) -> RunReport {
    sim.start_run();

    let mut collision = None;
    while sim.state().time_ticks < max_ticks {
        if should_flap(sim.state(), sim.config()) {
            sim.jump();
        }
        match sim.tick() {
            TickOutcome::Continue => {}
            TickOutcome::Ended(hit) => {
                collision = Some(hit);
                break;
            }
            TickOutcome::Inactive => break,
        }
    }
    sim.end_run();

    RunReport {
        score: sim.score(),
        ticks: sim.state().time_ticks,
        collision,
    }
}
