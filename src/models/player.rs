//! Player identifiers and derived statistics.

use serde::{Deserialize, Serialize};

/// A player's display name; unique within a roster.
pub type PlayerId = String;

/// Case-folded form of a name, used to keep names unique regardless of case.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// `part` out of `whole` as a whole percent, halves rounded to even; 0 when `whole` is 0.
pub fn whole_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) * 100.0 / f64::from(whole)).round_ties_even() as u32
}

/// League points for a championship win.
pub const POINTS_PER_WIN: u32 = 2;

/// League points for a championship loss (rewards turning up).
pub const POINTS_PER_LOSS: u32 = 1;

/// Cumulative statistics of one player, recomputed from match history.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_conceded: u32,
    pub set_diff: i64,
    pub points_won: u32,
    pub points_conceded: u32,
    pub point_diff: i64,
    pub whitewashes_inflicted: u32,
    pub whitewashes_suffered: u32,
}

impl PlayerStats {
    pub fn played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Share of matches won, as a whole percent; 0 when nothing was played.
    pub fn win_percentage(&self) -> u32 {
        whole_percent(self.wins, self.played())
    }

    /// Championship standing points.
    pub fn league_points(&self) -> u32 {
        self.wins * POINTS_PER_WIN + self.losses * POINTS_PER_LOSS
    }

    /// Fill in the differential fields once accumulation is done.
    pub(crate) fn finish(&mut self) {
        self.set_diff = i64::from(self.sets_won) - i64::from(self.sets_conceded);
        self.point_diff = i64::from(self.points_won) - i64::from(self.points_conceded);
    }
}

/// One line of a ranking table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position.
    pub position: usize,
    pub player: PlayerId,
    pub played: u32,
    pub win_percentage: u32,
    /// Only set for championship rankings.
    pub league_points: Option<u32>,
    pub stats: PlayerStats,
}
