//! Timed edge spawning of new asteroids
//!
//! One Large asteroid per interval, placed at a uniformly-random point
//! along the field perimeter and displaced outward so it is fully outside
//! the visible field at creation (no instant unfair collisions). Velocity
//! aims into the field within a bounded arc around the inward normal.

use glam::Vec2;
use rand::Rng;

use super::entity::{AsteroidSize, Body};
use super::state::{Asteroid, GameState};
use crate::consts::*;
use crate::heading;

/// Count the spawner down and inject at most one asteroid per interval
pub fn run_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer -= dt;
    if state.spawn_timer > 0.0 {
        return;
    }
    state.spawn_timer = ASTEROID_SPAWN_INTERVAL;

    let asteroid = spawn_edge_asteroid(state);
    log::debug!(
        "spawned {:?} asteroid at ({:.0}, {:.0})",
        asteroid.size,
        asteroid.body.pos.x,
        asteroid.body.pos.y
    );
    state.asteroids.push(asteroid);
}

/// Build one Large asteroid just outside a random perimeter point
pub fn spawn_edge_asteroid(state: &mut GameState) -> Asteroid {
    let size = AsteroidSize::Large;
    let radius = size.radius();

    // Uniform over the perimeter: walk a distance along
    // left -> right -> top -> bottom edges.
    let perimeter = 2.0 * (FIELD_WIDTH + FIELD_HEIGHT);
    let t = state.rng.random_range(0.0..perimeter);

    // (position on the edge, inward normal angle)
    let (pos, inward) = if t < FIELD_HEIGHT {
        (Vec2::new(-radius, t), 0.0)
    } else if t < 2.0 * FIELD_HEIGHT {
        (
            Vec2::new(FIELD_WIDTH + radius, t - FIELD_HEIGHT),
            std::f32::consts::PI,
        )
    } else if t < 2.0 * FIELD_HEIGHT + FIELD_WIDTH {
        (
            Vec2::new(t - 2.0 * FIELD_HEIGHT, -radius),
            std::f32::consts::FRAC_PI_2,
        )
    } else {
        (
            Vec2::new(t - 2.0 * FIELD_HEIGHT - FIELD_WIDTH, FIELD_HEIGHT + radius),
            -std::f32::consts::FRAC_PI_2,
        )
    };

    let angle = inward + state.rng.random_range(-ASTEROID_SPAWN_ARC..ASTEROID_SPAWN_ARC);
    let speed = state.rng.random_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
    let rotation = state.rng.random_range(0.0..std::f32::consts::TAU);

    Asteroid::new(Body::new(pos, heading(angle) * speed, rotation, radius), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameMode;

    #[test]
    fn test_spawn_is_large_and_fully_outside() {
        let mut state = GameState::new(GameMode::Original, 42);
        for _ in 0..200 {
            let asteroid = spawn_edge_asteroid(&mut state);
            assert_eq!(asteroid.size, AsteroidSize::Large);
            let Body { pos, radius, .. } = asteroid.body;
            let outside = pos.x <= -radius + 1e-3
                || pos.x >= FIELD_WIDTH + radius - 1e-3
                || pos.y <= -radius + 1e-3
                || pos.y >= FIELD_HEIGHT + radius - 1e-3;
            assert!(outside, "asteroid at {pos:?} overlaps the field");
        }
    }

    #[test]
    fn test_spawn_velocity_in_range_and_inward() {
        let mut state = GameState::new(GameMode::Original, 43);
        for _ in 0..200 {
            let asteroid = spawn_edge_asteroid(&mut state);
            let speed = asteroid.body.vel.length();
            assert!((ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED).contains(&speed));

            // Velocity must point into the field: a short flight moves the
            // center toward the interior.
            let later = asteroid.body.pos + asteroid.body.vel.normalize();
            let center = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
            assert!(later.distance(center) < asteroid.body.pos.distance(center));
        }
    }

    #[test]
    fn test_one_spawn_per_interval() {
        let mut state = GameState::new(GameMode::Original, 44);
        // Half an interval: nothing yet
        run_spawner(&mut state, ASTEROID_SPAWN_INTERVAL / 2.0);
        assert!(state.asteroids.is_empty());
        // Crossing the interval spawns exactly one
        run_spawner(&mut state, ASTEROID_SPAWN_INTERVAL / 2.0);
        assert_eq!(state.asteroids.len(), 1);
        // Countdown restarts
        run_spawner(&mut state, ASTEROID_SPAWN_INTERVAL / 2.0);
        assert_eq!(state.asteroids.len(), 1);
    }
}
