//! Match result validation and encoding (shared by free play and the championship).

use crate::models::{
    ClubError, EncodedMatch, EncodedSet, MatchReport, SetScore, Side, MAX_SETS, SETS_TO_WIN,
};

/// Validate raw set scores between `player_a` and `player_b` and build the stored record.
///
/// 1. Sets 1-3 must each be decided (11+ points, 2 clear); a missing slot counts as 0-0.
/// 2. Set 4 is required if nobody has three sets after set 3, set 5 if still nobody after set 4.
/// 3. Slots after the clinching set are ignored.
/// 4. Every decided set is then re-encoded from the match winner's point of view.
///
/// Nothing is built until every check has passed.
pub fn validate_and_encode(
    player_a: &str,
    player_b: &str,
    sets: &[SetScore],
    timestamp: impl Into<String>,
) -> Result<MatchReport, ClubError> {
    if player_a == player_b {
        return Err(ClubError::SamePlayer);
    }

    let mut decided: Vec<(SetScore, Side)> = Vec::with_capacity(MAX_SETS);
    let (mut sets_a, mut sets_b) = (0u8, 0u8);
    for index in 0..MAX_SETS {
        if sets_a == SETS_TO_WIN || sets_b == SETS_TO_WIN {
            break;
        }
        let score = sets.get(index).copied().unwrap_or_default();
        let side = score
            .decided_for()
            .ok_or(ClubError::InvalidSetScore(index + 1))?;
        match side {
            Side::A => sets_a += 1,
            Side::B => sets_b += 1,
        }
        decided.push((score, side));
    }

    let (winner_side, winner, loser, winner_sets, loser_sets) = if sets_a == SETS_TO_WIN {
        (Side::A, player_a, player_b, sets_a, sets_b)
    } else if sets_b == SETS_TO_WIN {
        (Side::B, player_b, player_a, sets_b, sets_a)
    } else {
        return Err(ClubError::TiedMatch);
    };
    let loser_side = match winner_side {
        Side::A => Side::B,
        Side::B => Side::A,
    };

    // The clinching set must belong to the winner and the loser can hold at most two sets.
    let deciding_winner = decided.last().map(|(_, side)| *side);
    if deciding_winner != Some(winner_side) || loser_sets >= SETS_TO_WIN {
        return Err(ClubError::ImpossibleScoreline);
    }

    let mut encoded = [EncodedSet::NotPlayed; MAX_SETS];
    for (slot, (score, _)) in encoded.iter_mut().zip(&decided) {
        *slot = EncodedSet::from_points(score.points(winner_side), score.points(loser_side));
    }

    let detail = decided
        .iter()
        .map(|(score, _)| format!("{}-{}", score.a, score.b))
        .collect::<Vec<_>>()
        .join(", ");

    log::debug!(
        "{} beat {} {}-{} ({})",
        winner,
        loser,
        winner_sets,
        loser_sets,
        detail
    );

    Ok(MatchReport {
        record: EncodedMatch {
            winner: winner.to_string(),
            loser: loser.to_string(),
            sets: encoded,
            timestamp: timestamp.into(),
        },
        winner_sets,
        loser_sets,
        detail,
    })
}
