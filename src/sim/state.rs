//! Game session state and core simulation types
//!
//! `GameState` owns the canonical entity collections (ship, asteroids,
//! shots) and the per-mode rule sub-state. Collaborators never touch the
//! collections directly: renderers consume [`EntityView`]/[`Hud`]
//! snapshots, and the rule engine consumes [`GameEvent`]s.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{AsteroidSize, Body, EntityKind};
use crate::consts::*;

/// Selectable rule-sets. Master-of-Evasion is an emergent sub-state, not a
/// selectable mode; it surfaces as [`Outcome::EvasionSurvived`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Open-ended survival
    Original,
    /// Fixed 300 s session, score as much as possible
    TimeAttack,
    /// One starting round; ammunition only comes from kills
    OneInChamber,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Original => "Original",
            GameMode::TimeAttack => "Time Attack",
            GameMode::OneInChamber => "One In The Chamber",
        }
    }

}

/// Unrecognized mode name passed to [`GameMode::from_str`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown game mode '{}' (expected original, time-attack or one-in-chamber)",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "original" => Ok(GameMode::Original),
            "time-attack" | "time_attack" | "timeattack" => Ok(GameMode::TimeAttack),
            "one-in-chamber" | "one_in_chamber" | "oneinchamber" | "chamber" => {
                Ok(GameMode::OneInChamber)
            }
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Ship overlapped an asteroid
    PlayerDestroyed,
    /// Time Attack clock ran out
    TimeLimitReached,
    /// Evasion-mode win (or evasion-mode ship loss, which still counts as
    /// having survived the evasion run up to that point)
    EvasionSurvived,
}

/// Session-level state machine. `Ended` is terminal; `tick` is a no-op
/// once it is reached and leaderboard persistence happens exactly once on
/// entering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Ended(Outcome),
}

/// Events emitted by the collision engine, the sole input to the mode
/// rule engine's scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AsteroidDestroyed(AsteroidSize),
    PlayerHit,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
}

impl Ship {
    fn new() -> Self {
        Self {
            body: Body::new(
                Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
                Vec2::ZERO,
                -std::f32::consts::FRAC_PI_2,
                SHIP_RADIUS,
            ),
            fire_cooldown: 0.0,
        }
    }
}

/// A drifting rock. `alive` is cleared on destruction and the vector is
/// pruned at the end of the collision pass, so later shot checks in the
/// same tick skip already-destroyed asteroids.
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    pub alive: bool,
}

impl Asteroid {
    pub fn new(body: Body, size: AsteroidSize) -> Self {
        Self {
            body,
            size,
            alive: true,
        }
    }
}

/// A player projectile
#[derive(Debug, Clone)]
pub struct Shot {
    pub body: Body,
    /// Remaining lifetime in seconds
    pub life: f32,
    pub alive: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: GameMode,
    pub phase: GamePhase,
    pub score: u32,
    /// Wall-clock seconds since session start, monotonically increasing
    pub elapsed: f32,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub shots: Vec<Shot>,
    /// Spawner countdown; the only gameplay state the spawner holds
    pub spawn_timer: f32,
    /// Remaining ammunition; `Some` only in One-In-The-Chamber
    pub ammo: Option<u32>,
    /// Elapsed timestamp when the current ammo==0/score==0 streak began
    pub zero_since: Option<f32>,
    /// Once set, monotonic until session end
    pub evasion_active: bool,
    /// Elapsed timestamp when evasion mode armed
    pub evasion_start: Option<f32>,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh session in the given mode
    pub fn new(mode: GameMode, seed: u64) -> Self {
        Self {
            seed,
            mode,
            phase: GamePhase::Running,
            score: 0,
            elapsed: 0.0,
            ship: Ship::new(),
            asteroids: Vec::new(),
            shots: Vec::new(),
            spawn_timer: ASTEROID_SPAWN_INTERVAL,
            ammo: match mode {
                GameMode::OneInChamber => Some(STARTING_AMMO),
                _ => None,
            },
            zero_since: None,
            evasion_active: false,
            evasion_start: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// True once the session has reached a terminal state
    pub fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    /// Seconds spent in evasion mode so far, if it is armed
    pub fn evasion_elapsed(&self) -> Option<f32> {
        self.evasion_start.map(|start| {
            debug_assert!(self.elapsed >= start, "evasion started in the future");
            self.elapsed - start
        })
    }

    /// Firing gate: Ordinary modes always may fire (cooldown permitting);
    /// One-In-The-Chamber requires ammunition, which is consumed
    /// atomically with shot creation by the caller.
    pub fn try_consume_ammo(&mut self) -> bool {
        match self.ammo {
            None => true,
            Some(0) => false,
            Some(n) => {
                self.ammo = Some(n - 1);
                true
            }
        }
    }

    /// Read-only entity snapshot for the render collaborator
    pub fn entities(&self) -> Vec<EntityView> {
        let mut views = Vec::with_capacity(1 + self.asteroids.len() + self.shots.len());
        views.push(EntityView::from_body(EntityKind::Ship, &self.ship.body));
        views.extend(
            self.asteroids
                .iter()
                .filter(|a| a.alive)
                .map(|a| EntityView::from_body(EntityKind::Asteroid, &a.body)),
        );
        views.extend(
            self.shots
                .iter()
                .filter(|s| s.alive)
                .map(|s| EntityView::from_body(EntityKind::Shot, &s.body)),
        );
        views
    }

    /// Per-tick HUD snapshot for the render collaborator
    pub fn hud(&self) -> Hud {
        let time_remaining = match self.mode {
            // Floored at 0 for presentation only; `elapsed` keeps running
            GameMode::TimeAttack => Some((TIME_ATTACK_LIMIT_SECS - self.elapsed).max(0.0)),
            _ => None,
        };
        let evasion_countdown = self
            .evasion_elapsed()
            .map(|spent| (EVASION_WIN_SECS - spent).max(0.0));
        Hud {
            mode_label: self.mode.label(),
            score: self.score,
            clock: format_clock(self.elapsed),
            ammo: self.ammo,
            time_remaining,
            evasion_countdown,
        }
    }
}

/// One drawable entity: everything a renderer needs, nothing it can mutate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
}

impl EntityView {
    fn from_body(kind: EntityKind, body: &Body) -> Self {
        Self {
            kind,
            pos: body.pos,
            rotation: body.rotation,
            radius: body.radius,
        }
    }
}

/// HUD data for the render collaborator
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub mode_label: &'static str,
    pub score: u32,
    /// Elapsed session time as MM:SS
    pub clock: String,
    pub ammo: Option<u32>,
    /// Time Attack remaining seconds, floored at 0 for display
    pub time_remaining: Option<f32>,
    /// Seconds left to the evasion win, once evasion is armed
    pub evasion_countdown: Option<f32>,
}

/// Format whole seconds as MM:SS (negative inputs clamp to 00:00)
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
