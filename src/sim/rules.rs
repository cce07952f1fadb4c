//! Mode rule engine
//!
//! Consumes collision events and the session clock to drive the
//! `Running -> Ended(outcome)` state machine: per-tier scoring,
//! One-In-The-Chamber ammunition replenishment, the evasion sub-state,
//! and the Time Attack limit. The first terminal transition wins; later
//! events in the same tick are dropped.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameMode, GamePhase, GameState, Outcome};
use crate::consts::*;

/// Apply this tick's collision events to score, ammunition and phase
pub fn consume_events(state: &mut GameState, events: &[GameEvent]) {
    for event in events {
        if state.is_ended() {
            break;
        }
        match *event {
            GameEvent::AsteroidDestroyed(size) => {
                state.score += size.score();
                if let Some(rounds) = state.ammo {
                    state.ammo = Some(rounds + size.ammo_refill());
                }
            }
            GameEvent::PlayerHit => {
                if state.evasion_active {
                    // Dying during an evasion run still reports the run
                    end(state, Outcome::EvasionSurvived);
                } else {
                    end(state, Outcome::PlayerDestroyed);
                }
            }
        }
    }
}

/// Advance the clock-driven rules: evasion streak/arm/win and the Time
/// Attack limit. Runs after event consumption each tick.
pub fn check_clocks(state: &mut GameState) {
    if state.is_ended() {
        return;
    }
    debug_assert!(state.elapsed >= 0.0, "negative elapsed time");

    // Evasion arming: a continuous ammo==0/score==0 streak. Any tick that
    // breaks the condition resets the streak to unstarted.
    if !state.evasion_active {
        if state.ammo == Some(0) && state.score == 0 {
            let since = *state.zero_since.get_or_insert(state.elapsed);
            if state.elapsed - since >= EVASION_TRIGGER_SECS {
                state.evasion_active = true;
                state.evasion_start = Some(state.elapsed);
                log::info!("evasion mode armed at {:.2}s", state.elapsed);
            }
        } else {
            state.zero_since = None;
        }
    }

    if state.evasion_active {
        if let Some(spent) = state.evasion_elapsed() {
            if spent >= EVASION_WIN_SECS {
                end(state, Outcome::EvasionSurvived);
                return;
            }
        }
    }

    if state.mode == GameMode::TimeAttack && state.elapsed >= TIME_ATTACK_LIMIT_SECS {
        // A zero-score Time Attack finish counts as an evasion-style win
        if state.score == 0 {
            end(state, Outcome::EvasionSurvived);
        } else {
            end(state, Outcome::TimeLimitReached);
        }
    }
}

/// Enter the terminal state; only the first transition takes effect
fn end(state: &mut GameState, outcome: Outcome) {
    if state.is_ended() {
        return;
    }
    state.phase = GamePhase::Ended(outcome);
    log::info!(
        "session ended: {:?} (mode {}, score {}, {:.1}s)",
        outcome,
        state.mode.label(),
        state.score,
        state.elapsed
    );
}

/// End-of-game summary handed to the collaborator for display and to the
/// leaderboard store for recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndReport {
    pub mode: GameMode,
    pub outcome: Outcome,
    pub score: u32,
    /// Headline time metric: survival time, or evasion run length for
    /// evasion outcomes (300.0 for a full evasion win)
    pub time: f32,
    /// Remaining ammunition, One-In-The-Chamber only
    pub ammo: Option<u32>,
}

impl EndReport {
    /// Summarize a finished session; `None` while still running
    pub fn from_state(state: &GameState) -> Option<Self> {
        let GamePhase::Ended(outcome) = state.phase else {
            return None;
        };
        let report = match outcome {
            Outcome::PlayerDestroyed => Self {
                mode: state.mode,
                outcome,
                score: state.score,
                time: state.elapsed,
                ammo: state.ammo,
            },
            Outcome::TimeLimitReached => Self {
                mode: state.mode,
                outcome,
                score: state.score,
                time: state.elapsed,
                ammo: None,
            },
            Outcome::EvasionSurvived => {
                // Shot down mid-run reports the partial run; otherwise the
                // full 300 s win (including the Time Attack zero-score case,
                // which never arms the evasion clock).
                let time = match state.evasion_elapsed() {
                    Some(spent) if spent < EVASION_WIN_SECS => spent,
                    _ => EVASION_WIN_SECS,
                };
                Self {
                    mode: state.mode,
                    outcome,
                    score: 0,
                    time,
                    ammo: None,
                }
            }
        };
        Some(report)
    }
}
