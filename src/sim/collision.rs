//! Collision detection and the split-on-hit rule
//!
//! Circle-circle overlap only, strict: two bodies exactly sum-of-radii
//! apart do not collide. The per-tick resolution pass runs ship-first,
//! then shots, and reports side effects exclusively as [`GameEvent`]s.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::Body;
use super::state::{Asteroid, GameEvent, GameState};
use crate::consts::*;

/// Strict circle-circle overlap: distance between centers less than the
/// sum of radii. Symmetric; touching circles do not collide.
#[inline]
pub fn collides(a: &Body, b: &Body) -> bool {
    debug_assert!(a.radius > 0.0 && b.radius > 0.0, "non-positive radius");
    let hit_dist = a.radius + b.radius;
    a.pos.distance_squared(b.pos) < hit_dist * hit_dist
}

/// Run the two per-tick collision checks in priority order and emit events.
///
/// 1. Ship vs asteroid: any overlap emits a single `PlayerHit`.
/// 2. Shot vs asteroid: first hit wins; the shot and asteroid both die and
///    Large/Medium parents fragment into two next-tier children at the
///    parent's position. Fragments enter play after the pass, so a second
///    shot in the same tick cannot hit them at the destruction point.
///
/// Destroyed entities are pruned before returning.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for asteroid in &state.asteroids {
        if asteroid.alive && collides(&state.ship.body, &asteroid.body) {
            events.push(GameEvent::PlayerHit);
            break;
        }
    }

    let mut spawned: Vec<Asteroid> = Vec::new();

    for shot_index in 0..state.shots.len() {
        if !state.shots[shot_index].alive {
            continue;
        }
        let shot_body = state.shots[shot_index].body;

        for asteroid_index in 0..state.asteroids.len() {
            if !state.asteroids[asteroid_index].alive {
                continue;
            }
            if !collides(&shot_body, &state.asteroids[asteroid_index].body) {
                continue;
            }

            state.shots[shot_index].alive = false;
            let asteroid = &mut state.asteroids[asteroid_index];
            asteroid.alive = false;
            let size = asteroid.size;
            let parent = asteroid.body;
            events.push(GameEvent::AsteroidDestroyed(size));

            if let Some(child_size) = size.split() {
                spawned.extend(fragment(parent, child_size, &mut state.rng));
            }
            break;
        }
    }

    state.asteroids.extend(spawned);
    state.asteroids.retain(|a| a.alive);
    state.shots.retain(|s| s.alive);
}

/// Two fragments at the parent's destruction point, velocities rotated
/// off the parent's by a shared random angle and scaled up slightly so
/// they are not overlapping duplicates.
fn fragment(
    parent: Body,
    child_size: super::entity::AsteroidSize,
    rng: &mut Pcg32,
) -> [Asteroid; 2] {
    let deflect = rng.random_range(SPLIT_ANGLE_MIN..SPLIT_ANGLE_MAX);
    let child = |angle: f32| {
        let vel = Vec2::from_angle(angle).rotate(parent.vel) * SPLIT_SPEED_SCALE;
        let body = Body::new(parent.pos, vel, parent.rotation, child_size.radius());
        Asteroid::new(body, child_size)
    };
    [child(deflect), child(-deflect)]
}
