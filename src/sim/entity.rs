//! Shared entity kinematics
//!
//! Ship, asteroids and shots all move through the same `Body`: an Euler
//! position integration plus a toroidal wrap. Asteroid size tiers are
//! derived from the body radius and drive scoring and fragmentation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a body is, for snapshot consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid,
    Shot,
}

/// Position/velocity/rotation/radius shared by every game object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (0 = +X, counter-clockwise)
    pub rotation: f32,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, rotation: f32, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "non-positive body radius");
        Self {
            pos,
            vel,
            rotation,
            radius,
        }
    }

    /// Euler step: position += velocity * dt
    pub fn advance(&mut self, dt: f32) {
        debug_assert!(self.radius > 0.0, "non-positive body radius");
        self.pos += self.vel * dt;
    }

    /// Toroidal wrap around the play field.
    ///
    /// The wrap domain is extended by the body radius on every side, so a
    /// body only re-enters once it has fully left the visible field and
    /// re-appears just outside the opposite edge. Freshly edge-spawned
    /// asteroids (which start outside the field) are therefore not
    /// teleported on their first tick.
    pub fn wrap(&mut self) {
        let r = self.radius;
        self.pos.x = wrap_coord(self.pos.x, r, FIELD_WIDTH);
        self.pos.y = wrap_coord(self.pos.y, r, FIELD_HEIGHT);
    }

    /// True if the body is entirely outside the field by more than `margin`
    pub fn outside_field(&self, margin: f32) -> bool {
        let limit = self.radius + margin;
        self.pos.x < -limit
            || self.pos.x > FIELD_WIDTH + limit
            || self.pos.y < -limit
            || self.pos.y > FIELD_HEIGHT + limit
    }
}

#[inline]
fn wrap_coord(value: f32, radius: f32, extent: f32) -> f32 {
    (value + radius).rem_euclid(extent + 2.0 * radius) - radius
}

/// Coarse asteroid size classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Classify a radius against the base-unit thresholds
    pub fn from_radius(radius: f32) -> Self {
        debug_assert!(radius > 0.0, "non-positive asteroid radius");
        if radius >= 3.0 * ASTEROID_BASE_RADIUS {
            AsteroidSize::Large
        } else if radius >= 2.0 * ASTEROID_BASE_RADIUS {
            AsteroidSize::Medium
        } else {
            AsteroidSize::Small
        }
    }

    /// Canonical radius for this tier
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 3.0 * ASTEROID_BASE_RADIUS,
            AsteroidSize::Medium => 2.0 * ASTEROID_BASE_RADIUS,
            AsteroidSize::Small => ASTEROID_BASE_RADIUS,
        }
    }

    /// Points awarded on destruction; smaller rocks are harder to hit
    pub fn score(self) -> u32 {
        match self {
            AsteroidSize::Large => 100,
            AsteroidSize::Medium => 200,
            AsteroidSize::Small => 300,
        }
    }

    /// One-In-The-Chamber ammunition replenished on destruction
    pub fn ammo_refill(self) -> u32 {
        match self {
            AsteroidSize::Large => 1,
            AsteroidSize::Medium => 2,
            AsteroidSize::Small => 3,
        }
    }

    /// Tier produced by fragmentation; Small rocks are terminal
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}
