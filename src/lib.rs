//! Astro Drift - a four-mode asteroids survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, mode rules)
//! - `leaderboard`: Per-mode top-5 score boards and comparators
//! - `persistence`: Durable leaderboard file with legacy migration

pub mod leaderboard;
pub mod persistence;
pub mod sim;

pub use leaderboard::{Board, Leaderboard, LeaderboardEntry, MAX_BOARD_ENTRIES};
pub use persistence::LeaderboardStore;
pub use sim::{GameMode, GameState, Outcome, TickInput, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation timestep (60 Hz frame cadence)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Asteroid base unit; tier thresholds are multiples of this
    pub const ASTEROID_BASE_RADIUS: f32 = 20.0;
    /// Largest asteroid radius (three tiers)
    pub const ASTEROID_MAX_RADIUS: f32 = ASTEROID_BASE_RADIUS * 3.0;
    /// Seconds between edge spawns
    pub const ASTEROID_SPAWN_INTERVAL: f32 = 0.8;
    /// Spawn speed range (px/s)
    pub const ASTEROID_MIN_SPEED: f32 = 40.0;
    pub const ASTEROID_MAX_SPEED: f32 = 100.0;
    /// Half-arc around the inward normal for spawn velocity direction (30 degrees)
    pub const ASTEROID_SPAWN_ARC: f32 = core::f32::consts::FRAC_PI_6;

    /// Fragment velocity deflection range (20 to 50 degrees)
    pub const SPLIT_ANGLE_MIN: f32 = 20.0 * core::f32::consts::PI / 180.0;
    pub const SPLIT_ANGLE_MAX: f32 = 50.0 * core::f32::consts::PI / 180.0;
    /// Fragments fly slightly faster than the parent
    pub const SPLIT_SPEED_SCALE: f32 = 1.2;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 20.0;
    /// Turn rate (300 degrees/s)
    pub const SHIP_TURN_SPEED: f32 = 300.0 * core::f32::consts::PI / 180.0;
    /// Thrust acceleration (px/s^2); no drag, so speed is clamped instead
    pub const SHIP_THRUST: f32 = 420.0;
    pub const SHIP_MAX_SPEED: f32 = 320.0;

    /// Shot defaults
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const SHOT_SPEED: f32 = 500.0;
    pub const SHOT_LIFETIME: f32 = 2.0;
    /// Seconds between shots
    pub const FIRE_COOLDOWN: f32 = 0.3;

    /// One-In-The-Chamber starting ammunition
    pub const STARTING_AMMO: u32 = 1;
    /// Continuous zero-ammo/zero-score seconds before evasion mode arms
    pub const EVASION_TRIGGER_SECS: f32 = 5.0;
    /// Evasion survival target
    pub const EVASION_WIN_SECS: f32 = 300.0;
    /// Time Attack session length
    pub const TIME_ATTACK_LIMIT_SECS: f32 = 300.0;
}

/// Unit vector for a heading angle (0 = +X, counter-clockwise)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
