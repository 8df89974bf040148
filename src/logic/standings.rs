//! Statistics and rankings derived from stored match records.

use crate::models::{EncodedMatch, EncodedSet, PlayerId, PlayerStats, Standing};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Which ordering a ranking table uses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    /// Wins, then set difference, then point difference.
    #[default]
    FreePlay,
    /// League points first, then as free play.
    Championship,
}

/// Per-match totals from the winner's point of view.
#[derive(Default)]
struct MatchTotals {
    winner_sets: u32,
    loser_sets: u32,
    winner_points: u32,
    loser_points: u32,
    whitewashes_by_winner: u32,
    whitewashes_by_loser: u32,
}

fn match_totals(m: &EncodedMatch) -> MatchTotals {
    let mut t = MatchTotals::default();
    for set in m.played_sets() {
        if let Some(d) = set.decode() {
            t.winner_points += d.winner_points;
            t.loser_points += d.loser_points;
        }
        if set.won_by_loser() {
            t.loser_sets += 1;
        } else {
            t.winner_sets += 1;
        }
        match set {
            EncodedSet::Whitewash => t.whitewashes_by_winner += 1,
            EncodedSet::WhitewashAgainst => t.whitewashes_by_loser += 1,
            _ => {}
        }
    }
    t
}

/// Fold match records into per-player statistics for every roster member.
///
/// Players outside the roster are ignored. A record that is not a coherent best-of-five result
/// is skipped (and logged) so one bad row cannot block the table.
pub fn aggregate(matches: &[EncodedMatch], roster: &[PlayerId]) -> HashMap<PlayerId, PlayerStats> {
    let mut stats: HashMap<PlayerId, PlayerStats> = roster
        .iter()
        .map(|p| (p.clone(), PlayerStats::default()))
        .collect();

    for m in matches {
        if let Err(e) = m.check_shape() {
            log::warn!("Skipping match {} vs {} ({}): {}", m.winner, m.loser, m.timestamp, e);
            continue;
        }
        let t = match_totals(m);

        if let Some(w) = stats.get_mut(&m.winner) {
            w.wins += 1;
            w.sets_won += t.winner_sets;
            w.sets_conceded += t.loser_sets;
            w.points_won += t.winner_points;
            w.points_conceded += t.loser_points;
            w.whitewashes_inflicted += t.whitewashes_by_winner;
            w.whitewashes_suffered += t.whitewashes_by_loser;
        }
        if let Some(l) = stats.get_mut(&m.loser) {
            l.losses += 1;
            l.sets_won += t.loser_sets;
            l.sets_conceded += t.winner_sets;
            l.points_won += t.loser_points;
            l.points_conceded += t.winner_points;
            l.whitewashes_inflicted += t.whitewashes_by_loser;
            l.whitewashes_suffered += t.whitewashes_by_winner;
        }
    }

    for s in stats.values_mut() {
        s.finish();
    }
    stats
}

/// Order aggregated statistics into a ranking table.
///
/// Ties on every ranking key are broken by player name so the table never depends on
/// input order.
pub fn rank(stats: &HashMap<PlayerId, PlayerStats>, ranking: Ranking) -> Vec<Standing> {
    let mut rows: Vec<(&PlayerId, &PlayerStats)> = stats.iter().collect();
    rows.sort_by_key(|(player, s)| {
        let league = match ranking {
            Ranking::FreePlay => 0,
            Ranking::Championship => s.league_points(),
        };
        (
            Reverse(league),
            Reverse(s.wins),
            Reverse(s.set_diff),
            Reverse(s.point_diff),
            *player,
        )
    });

    rows.into_iter()
        .enumerate()
        .map(|(i, (player, s))| Standing {
            position: i + 1,
            player: player.clone(),
            played: s.played(),
            win_percentage: s.win_percentage(),
            league_points: match ranking {
                Ranking::FreePlay => None,
                Ranking::Championship => Some(s.league_points()),
            },
            stats: s.clone(),
        })
        .collect()
}

/// Convenience: aggregate then rank.
pub fn standings(matches: &[EncodedMatch], roster: &[PlayerId], ranking: Ranking) -> Vec<Standing> {
    rank(&aggregate(matches, roster), ranking)
}

/// Set tallies between every pair that has met: `grid[row][column]` is `"s-t"` with `s` the
/// sets taken by `row`. A later meeting of the same pair replaces an earlier one.
pub type HeadToHead = BTreeMap<PlayerId, BTreeMap<PlayerId, String>>;

pub fn head_to_head(matches: &[EncodedMatch], players: &[PlayerId]) -> HeadToHead {
    let mut grid: HeadToHead = players
        .iter()
        .map(|p| (p.clone(), BTreeMap::new()))
        .collect();

    for m in matches {
        if !grid.contains_key(&m.winner) || !grid.contains_key(&m.loser) {
            continue;
        }
        let (w, l) = (m.winner_sets(), m.loser_sets());
        if let Some(row) = grid.get_mut(&m.winner) {
            row.insert(m.loser.clone(), format!("{}-{}", w, l));
        }
        if let Some(row) = grid.get_mut(&m.loser) {
            row.insert(m.winner.clone(), format!("{}-{}", l, w));
        }
    }
    grid
}
