//! Durable leaderboard storage
//!
//! A single JSON file holding all four boards. Reads are tolerant: a
//! missing file yields empty boards, the legacy flat-list shape is
//! migrated in place, and a corrupt file is logged and replaced rather
//! than crashing the game. Writes go through a sibling temp file and an
//! atomic rename so a crash mid-write never destroys existing scores.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::leaderboard::{Board, Leaderboard, LeaderboardEntry, MAX_BOARD_ENTRIES};
use crate::sim::{EndReport, GameMode, Outcome};

/// Default score file, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "astro_drift_scores.json";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "score file I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "score file parse error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e)
    }
}

/// File-backed leaderboard store. Holds only the path; every operation
/// is a full read-modify-write so there is no stale in-memory copy.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl Default for LeaderboardStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all boards. Absent file: empty boards. Legacy flat-list file:
    /// migrated onto the Original board and rewritten in the new shape.
    /// Unreadable content: logged and treated as empty.
    pub fn load(&self) -> Leaderboard {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Leaderboard::default();
            }
            Err(e) => {
                log::warn!("failed to read {}: {e}", self.path.display());
                return Leaderboard::default();
            }
        };

        if let Ok(lb) = serde_json::from_str::<Leaderboard>(&raw) {
            return lb;
        }

        // Pre-multi-board files were a bare top-5 list
        if let Ok(legacy) = serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
            log::info!("migrating legacy score file {}", self.path.display());
            let lb = Leaderboard::from_legacy(legacy);
            if let Err(e) = self.save(&lb) {
                log::warn!("failed to rewrite migrated score file: {e}");
            }
            return lb;
        }

        log::warn!(
            "score file {} is unreadable, starting fresh",
            self.path.display()
        );
        Leaderboard::default()
    }

    /// Write all boards atomically: serialize to a sibling `.tmp` file,
    /// then rename over the target.
    pub fn save(&self, leaderboard: &Leaderboard) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(leaderboard)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Record a finished session on its board and persist.
    ///
    /// Returns the 1-based rank (if the entry made a top 5) and the
    /// updated boards. A save failure keeps the game alive: the error is
    /// logged, the in-memory boards are still returned, but no rank is
    /// claimed for a score that was not durably written.
    pub fn record_session(&self, report: &EndReport) -> (Option<usize>, Leaderboard) {
        let board = board_for(report);
        let entry = LeaderboardEntry::new(report.score, report.time, report.ammo);

        let mut leaderboard = self.load();
        let rank = leaderboard.record(board, entry);

        if let Err(e) = self.save(&leaderboard) {
            log::warn!("failed to save scores: {e}");
            return (None, leaderboard);
        }
        if let Some(rank) = rank {
            log::info!("score ranked #{rank} of {MAX_BOARD_ENTRIES} on {}", board.title());
        }
        (rank, leaderboard)
    }
}

/// Evasion wins land on the shared Master-of-Evasion board no matter
/// which mode produced them; everything else stays on its mode's board.
pub fn board_for(report: &EndReport) -> Board {
    if report.outcome == Outcome::EvasionSurvived {
        return Board::MasterOfEvasion;
    }
    match report.mode {
        GameMode::Original => Board::Original,
        GameMode::TimeAttack => Board::TimeAttack,
        GameMode::OneInChamber => Board::OneInChamber,
    }
}
