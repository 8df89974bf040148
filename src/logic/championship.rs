//! Championship lifecycle: schedule once, then fill in fixture results.

use crate::logic::encoding::validate_and_encode;
use crate::logic::round_robin::{fixtures_from_rounds, schedule};
use crate::logic::standings::{head_to_head, standings, HeadToHead, Ranking};
use crate::models::{
    Championship, Club, ClubError, FixtureId, FixtureStatus, MatchReport, PlayerId, SetScore,
    Standing,
};

/// Schedule the club championship between `participants` (every roster player when empty).
///
/// Fixtures are generated exactly once; a second call fails while a championship exists.
pub fn start_championship<'a>(
    club: &'a mut Club,
    participants: &[PlayerId],
    seed: u64,
) -> Result<&'a Championship, ClubError> {
    if club.championship.is_some() {
        return Err(ClubError::ChampionshipAlreadyScheduled);
    }
    let participants: Vec<PlayerId> = if participants.is_empty() {
        club.roster.clone()
    } else {
        participants.to_vec()
    };
    for p in &participants {
        club.require_player(p)?;
    }

    let rounds = schedule(&participants, seed)?;
    let fixtures = fixtures_from_rounds(&rounds);
    log::info!(
        "Championship scheduled: {} players, {} rounds, {} fixtures",
        participants.len(),
        rounds.len(),
        fixtures.len()
    );
    Ok(club
        .championship
        .insert(Championship::new(participants, seed, fixtures)))
}

/// Record the result of one fixture and mark it done.
///
/// The fixture must still be to play; the scores are validated before anything changes.
pub fn submit_fixture_result(
    club: &mut Club,
    fixture_id: FixtureId,
    sets: &[SetScore],
    timestamp: impl Into<String>,
) -> Result<MatchReport, ClubError> {
    let fixture = club.championship()?.fixture(fixture_id)?;
    if fixture.is_done() {
        return Err(ClubError::FixtureAlreadyPlayed(fixture_id));
    }
    let report = validate_and_encode(&fixture.player_a, &fixture.player_b, sets, timestamp)?;
    complete_fixture(club, fixture_id, report)
}

/// Record a result by naming the two players; picks their unplayed fixture.
///
/// Scores are read in the order the players are given, whichever way round the fixture was
/// drawn.
pub fn submit_result_between(
    club: &mut Club,
    player_a: &str,
    player_b: &str,
    sets: &[SetScore],
    timestamp: impl Into<String>,
) -> Result<MatchReport, ClubError> {
    let championship = club.championship()?;
    for p in [player_a, player_b] {
        if !championship.participants.iter().any(|x| x == p) {
            return Err(ClubError::UnknownPlayer(p.to_string()));
        }
    }
    let fixture_id = championship
        .pending_fixture_between(player_a, player_b)
        .map(|f| f.id)
        .ok_or_else(|| ClubError::NoPendingFixture(player_a.to_string(), player_b.to_string()))?;
    let report = validate_and_encode(player_a, player_b, sets, timestamp)?;
    complete_fixture(club, fixture_id, report)
}

fn complete_fixture(
    club: &mut Club,
    fixture_id: FixtureId,
    report: MatchReport,
) -> Result<MatchReport, ClubError> {
    let fixture = club.championship_mut()?.fixture_mut(fixture_id)?;
    if fixture.is_done() {
        return Err(ClubError::FixtureAlreadyPlayed(fixture_id));
    }
    fixture.result = Some(report.record.clone());
    fixture.status = FixtureStatus::Done;
    log::info!(
        "Fixture {} (round {}): {} beat {} {}-{}",
        fixture_id,
        fixture.round,
        report.record.winner,
        report.record.loser,
        report.winner_sets,
        report.loser_sets
    );
    Ok(report)
}

/// Championship ranking: league points, wins, set difference, point difference.
pub fn championship_standings(club: &Club) -> Result<Vec<Standing>, ClubError> {
    let c = club.championship()?;
    Ok(standings(&c.results(), &c.participants, Ranking::Championship))
}

/// Confrontations grid between championship participants.
pub fn championship_head_to_head(club: &Club) -> Result<HeadToHead, ClubError> {
    let c = club.championship()?;
    Ok(head_to_head(&c.results(), &c.participants))
}
