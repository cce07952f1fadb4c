//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-cadence ticks with an explicit `dt`
//! - Seeded RNG only
//! - No rendering or platform dependencies; collaborators consume snapshots

pub mod collision;
pub mod entity;
pub mod rules;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{collides, resolve_collisions};
pub use entity::{AsteroidSize, Body, EntityKind};
pub use rules::EndReport;
pub use state::{
    EntityView, GameEvent, GameMode, GamePhase, GameState, Hud, Outcome, ParseModeError,
    format_clock,
};
pub use tick::{TickInput, tick};
