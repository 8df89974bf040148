//! Free play: record friendly matches and rank the whole roster.

use crate::logic::encoding::validate_and_encode;
use crate::logic::standings::{standings, Ranking};
use crate::models::{Club, ClubError, EncodedMatch, MatchReport, SetScore, Standing};

/// Validate a friendly match between two roster players and append it to the club history.
pub fn record_free_play_result(
    club: &mut Club,
    player_a: &str,
    player_b: &str,
    sets: &[SetScore],
    timestamp: impl Into<String>,
) -> Result<MatchReport, ClubError> {
    club.require_player(player_a)?;
    club.require_player(player_b)?;
    let report = validate_and_encode(player_a, player_b, sets, timestamp)?;
    club.matches.push(report.record.clone());
    log::info!(
        "Free play: {} beat {} {}-{}",
        report.record.winner,
        report.record.loser,
        report.winner_sets,
        report.loser_sets
    );
    Ok(report)
}

/// Append already-encoded records (e.g. an import); incoherent ones are dropped.
/// Returns how many were kept.
pub fn import_free_play_matches(club: &mut Club, records: Vec<EncodedMatch>) -> usize {
    let before = club.matches.len();
    for m in records {
        match m.check_shape() {
            Ok(()) => club.matches.push(m),
            Err(e) => log::warn!("Not importing {} vs {}: {}", m.winner, m.loser, e),
        }
    }
    club.matches.len() - before
}

/// Ranking of every roster player over all free-play results.
pub fn free_play_standings(club: &Club) -> Vec<Standing> {
    standings(&club.matches, &club.roster, Ranking::FreePlay)
}
