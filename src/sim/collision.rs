//! Collision detection between the bird and the playfield
//!
//! The bird is a circle but is tested as its bounding box, matching how the
//! pipes are drawn: the playfield edges count on contact, the gap edges only
//! once crossed.

use serde::{Deserialize, Serialize};

use super::state::{Bird, Pipe};

/// What the bird hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Ceiling,
    Floor,
    Pipe { id: u32 },
}

/// Bird against the top and bottom of the playfield (touching counts)
pub fn bird_bounds_collision(bird: &Bird, height: f32) -> Option<Collision> {
    if bird.top() <= 0.0 {
        Some(Collision::Ceiling)
    } else if bird.bottom() >= height {
        Some(Collision::Floor)
    } else {
        None
    }
}

/// Bird against one pipe's bars (touching a gap edge does not count)
pub fn bird_pipe_collision(bird: &Bird, pipe: &Pipe) -> bool {
    let overlaps_bar = bird.right() > pipe.x && bird.left() < pipe.right();
    let outside_gap = bird.top() < pipe.gap_top || bird.bottom() > pipe.gap_bottom();
    overlaps_bar && outside_gap
}

/// Full collision test: playfield bounds first, then pipes in order
pub fn check_collision<'a>(
    bird: &Bird,
    pipes: impl IntoIterator<Item = &'a Pipe>,
    height: f32,
) -> Option<Collision> {
    bird_bounds_collision(bird, height).or_else(|| {
        pipes
            .into_iter()
            .find(|pipe| bird_pipe_collision(bird, pipe))
            .map(|pipe| Collision::Pipe { id: pipe.id })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;

    fn bird_at(y: f32) -> Bird {
        Bird {
            pos: Vec2::new(50.0, y),
            velocity: 0.0,
            radius: 15.0,
        }
    }

    fn pipe_at(x: f32, gap_top: f32) -> Pipe {
        Pipe::new(7, x, gap_top, &GameConfig::default())
    }

    #[test]
    fn test_exact_ceiling_contact_collides() {
        // y - radius == 0
        let bird = bird_at(15.0);
        assert_eq!(bird_bounds_collision(&bird, 600.0), Some(Collision::Ceiling));
        // Center exactly at 0
        let bird = bird_at(0.0);
        assert_eq!(bird_bounds_collision(&bird, 600.0), Some(Collision::Ceiling));
    }

    #[test]
    fn test_exact_floor_contact_collides() {
        // y + radius == height
        let bird = bird_at(585.0);
        assert_eq!(bird_bounds_collision(&bird, 600.0), Some(Collision::Floor));
        let bird = bird_at(600.0);
        assert_eq!(bird_bounds_collision(&bird, 600.0), Some(Collision::Floor));
    }

    #[test]
    fn test_just_inside_bounds_is_clear() {
        assert_eq!(bird_bounds_collision(&bird_at(15.5), 600.0), None);
        assert_eq!(bird_bounds_collision(&bird_at(584.5), 600.0), None);
    }

    #[test]
    fn test_touching_gap_edges_is_clear() {
        // Gap 200..400, bird spans exactly 200..230 and 370..400
        let pipe = pipe_at(40.0, 200.0);
        assert!(!bird_pipe_collision(&bird_at(215.0), &pipe));
        assert!(!bird_pipe_collision(&bird_at(385.0), &pipe));
    }

    #[test]
    fn test_crossing_gap_edges_collides() {
        let pipe = pipe_at(40.0, 200.0);
        assert!(bird_pipe_collision(&bird_at(214.0), &pipe));
        assert!(bird_pipe_collision(&bird_at(386.0), &pipe));
    }

    #[test]
    fn test_no_horizontal_overlap_never_collides() {
        // Bird spans x 35..65; pipe starting exactly at 65 is not overlapping
        let pipe = pipe_at(65.0, 400.0);
        assert!(!bird_pipe_collision(&bird_at(100.0), &pipe));
        // Pipe ending exactly at 35 is not overlapping either
        let pipe = pipe_at(-15.0, 400.0);
        assert!(!bird_pipe_collision(&bird_at(100.0), &pipe));
        // One pixel further in and it hits
        let pipe = pipe_at(64.0, 400.0);
        assert!(bird_pipe_collision(&bird_at(100.0), &pipe));
    }

    #[test]
    fn test_check_collision_reports_pipe_id() {
        let pipes = [pipe_at(300.0, 100.0), pipe_at(40.0, 400.0)];
        let hit = check_collision(&bird_at(300.0), &pipes, 600.0);
        assert_eq!(hit, Some(Collision::Pipe { id: 7 }));

        let clear = [pipe_at(300.0, 100.0)];
        assert_eq!(check_collision(&bird_at(300.0), &clear, 600.0), None);
    }

    #[test]
    fn test_bounds_checked_before_pipes() {
        let pipes = [pipe_at(40.0, 200.0)];
        assert_eq!(
            check_collision(&bird_at(590.0), &pipes, 600.0),
            Some(Collision::Floor)
        );
    }
}
