//! Per-mode leaderboards
//!
//! Four boards (one per selectable mode plus the Master-of-Evasion
//! pseudo-mode), each keeping the top 5 entries under a mode-specific
//! comparator. One table-driven comparator covers every board; the
//! persistence module owns the durable file.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Maximum entries kept per board
pub const MAX_BOARD_ENTRIES: usize = 5;

/// A single ranked result. Immutable once ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    /// Survival time in seconds (evasion run length for evasion wins)
    pub time: f32,
    /// Local date stamp, "YYYY-MM-DD HH:MM"
    pub date: String,
    /// Remaining ammunition, One-In-The-Chamber only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<u32>,
}

impl LeaderboardEntry {
    /// Entry stamped with the current local time
    pub fn new(score: u32, time: f32, ammo: Option<u32>) -> Self {
        Self::with_date(
            score,
            time,
            chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
            ammo,
        )
    }

    pub fn with_date(score: u32, time: f32, date: String, ammo: Option<u32>) -> Self {
        debug_assert!(time >= 0.0, "negative survival time");
        Self {
            score,
            time,
            date,
            ammo,
        }
    }
}

/// Board keys. `MasterOfEvasion` collects evasion wins regardless of the
/// originating mode and is never directly selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Original,
    TimeAttack,
    OneInChamber,
    MasterOfEvasion,
}

impl Board {
    pub const ALL: [Board; 4] = [
        Board::Original,
        Board::TimeAttack,
        Board::OneInChamber,
        Board::MasterOfEvasion,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Board::Original => "Original",
            Board::TimeAttack => "Time Attack",
            Board::OneInChamber => "One In The Chamber",
            Board::MasterOfEvasion => "Master Of Evasion",
        }
    }

    /// Board-specific ordering, best entry first (`Less` ranks higher):
    /// - Original: score desc, then time asc (faster wins ties)
    /// - TimeAttack: score desc, then time desc (longer survival wins ties)
    /// - OneInChamber: score desc, then ammo desc, then time asc
    /// - MasterOfEvasion: time desc only
    pub fn compare(self, a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
        match self {
            Board::Original => b.score.cmp(&a.score).then(a.time.total_cmp(&b.time)),
            Board::TimeAttack => b.score.cmp(&a.score).then(b.time.total_cmp(&a.time)),
            Board::OneInChamber => b
                .score
                .cmp(&a.score)
                .then(b.ammo.unwrap_or(0).cmp(&a.ammo.unwrap_or(0)))
                .then(a.time.total_cmp(&b.time)),
            Board::MasterOfEvasion => b.time.total_cmp(&a.time),
        }
    }
}

/// All four boards, in the persisted shape. Missing keys deserialize as
/// empty lists, so partially-written files backfill cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub original: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub time_attack: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub one_in_chamber: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub master_of_evasion: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn board(&self, board: Board) -> &[LeaderboardEntry] {
        match board {
            Board::Original => &self.original,
            Board::TimeAttack => &self.time_attack,
            Board::OneInChamber => &self.one_in_chamber,
            Board::MasterOfEvasion => &self.master_of_evasion,
        }
    }

    fn board_mut(&mut self, board: Board) -> &mut Vec<LeaderboardEntry> {
        match board {
            Board::Original => &mut self.original,
            Board::TimeAttack => &mut self.time_attack,
            Board::OneInChamber => &mut self.one_in_chamber,
            Board::MasterOfEvasion => &mut self.master_of_evasion,
        }
    }

    /// Migrate the legacy single-list file shape: the flat list becomes
    /// the Original board, the other boards start empty.
    pub fn from_legacy(entries: Vec<LeaderboardEntry>) -> Self {
        let mut lb = Self::default();
        for entry in entries {
            lb.record(Board::Original, entry);
        }
        lb
    }

    /// Append an entry, re-sort its board (stable), truncate to the top
    /// 5, and return the 1-based rank if the entry survived the cut.
    pub fn record(&mut self, board: Board, entry: LeaderboardEntry) -> Option<usize> {
        let list = self.board_mut(board);
        list.push(entry.clone());
        list.sort_by(|a, b| board.compare(a, b));
        list.truncate(MAX_BOARD_ENTRIES);
        list.iter()
            .position(|e| e.score == entry.score && e.time == entry.time && e.date == entry.date)
            .map(|index| index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32, time: f32) -> LeaderboardEntry {
        LeaderboardEntry::with_date(score, time, "2026-01-01 12:00".into(), None)
    }

    #[test]
    fn test_original_faster_wins_ties() {
        let mut lb = Leaderboard::default();
        lb.record(Board::Original, entry(300, 40.0));
        lb.record(Board::Original, entry(300, 20.0));
        let times: Vec<f32> = lb.original.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![20.0, 40.0]);
    }

    #[test]
    fn test_time_attack_longer_wins_ties() {
        let mut lb = Leaderboard::default();
        lb.record(Board::TimeAttack, entry(300, 40.0));
        lb.record(Board::TimeAttack, entry(300, 120.0));
        let times: Vec<f32> = lb.time_attack.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![120.0, 40.0]);
    }

    #[test]
    fn test_chamber_ammo_breaks_ties() {
        let mut lb = Leaderboard::default();
        let mut low = entry(500, 30.0);
        low.ammo = Some(1);
        let mut high = entry(500, 60.0);
        high.ammo = Some(4);
        lb.record(Board::OneInChamber, low);
        lb.record(Board::OneInChamber, high);
        assert_eq!(lb.one_in_chamber[0].ammo, Some(4));
        assert_eq!(lb.one_in_chamber[1].ammo, Some(1));
    }

    #[test]
    fn test_evasion_ranks_by_time_only() {
        let mut lb = Leaderboard::default();
        lb.record(Board::MasterOfEvasion, entry(0, 150.0));
        lb.record(Board::MasterOfEvasion, entry(0, 300.0));
        lb.record(Board::MasterOfEvasion, entry(0, 220.0));
        let times: Vec<f32> = lb.master_of_evasion.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![300.0, 220.0, 150.0]);
    }

    #[test]
    fn test_truncation_never_exceeds_five() {
        let mut lb = Leaderboard::default();
        for score in [900, 800, 700, 600, 500] {
            assert!(lb.record(Board::Original, entry(score, 10.0)).is_some());
        }
        // A 6th entry below the cutoff is dropped and reports unranked
        assert_eq!(lb.record(Board::Original, entry(100, 10.0)), None);
        assert_eq!(lb.original.len(), MAX_BOARD_ENTRIES);

        // A 6th entry above the cutoff bumps the last one out
        assert_eq!(lb.record(Board::Original, entry(1000, 10.0)), Some(1));
        assert_eq!(lb.original.len(), MAX_BOARD_ENTRIES);
        assert!(lb.original.iter().all(|e| e.score >= 500));
    }

    #[test]
    fn test_rank_is_one_based() {
        let mut lb = Leaderboard::default();
        assert_eq!(lb.record(Board::Original, entry(200, 10.0)), Some(1));
        assert_eq!(lb.record(Board::Original, entry(400, 10.0)), Some(1));
        assert_eq!(lb.record(Board::Original, entry(300, 10.0)), Some(2));
    }

    #[test]
    fn test_legacy_migration_lands_on_original() {
        let legacy = vec![entry(10, 5.0)];
        let lb = Leaderboard::from_legacy(legacy);
        assert_eq!(lb.original.len(), 1);
        assert_eq!(lb.original[0].score, 10);
        assert!(lb.time_attack.is_empty());
        assert!(lb.one_in_chamber.is_empty());
        assert!(lb.master_of_evasion.is_empty());
    }

    #[test]
    fn test_boards_are_independent() {
        let mut lb = Leaderboard::default();
        for board in Board::ALL {
            lb.record(board, entry(100, 10.0));
        }
        for board in Board::ALL {
            assert_eq!(lb.board(board).len(), 1, "{}", board.title());
        }
    }

    #[test]
    fn test_missing_board_keys_backfill_empty() {
        let json = r#"{"original":[{"score":10,"time":5.0,"date":"2020-01-01 00:00"}]}"#;
        let lb: Leaderboard = serde_json::from_str(json).unwrap();
        assert_eq!(lb.original.len(), 1);
        assert!(lb.time_attack.is_empty());
        assert!(lb.master_of_evasion.is_empty());
    }

    #[test]
    fn test_ammo_field_omitted_when_absent() {
        let lb = Leaderboard {
            original: vec![entry(10, 5.0)],
            ..Default::default()
        };
        let json = serde_json::to_string(&lb).unwrap();
        assert!(!json.contains("ammo"));
    }
}
