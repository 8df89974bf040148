//! Championship: participants, scheduled fixtures and their results.

use crate::models::club::ClubError;
use crate::models::fixture::{Fixture, FixtureId, FixtureStatus};
use crate::models::player::{whole_percent, PlayerId};
use crate::models::score::EncodedMatch;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a championship.
pub type ChampionshipId = Uuid;

/// How far the championship has got.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub played: usize,
    pub to_play: usize,
    pub total: usize,
    /// Whole percent of fixtures played; 0 for an empty championship.
    pub percent: u32,
}

/// A round-robin championship between a fixed set of players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Championship {
    pub id: ChampionshipId,
    pub participants: Vec<PlayerId>,
    pub seed: u64,
    pub fixtures: Vec<Fixture>,
}

impl Championship {
    pub fn new(participants: Vec<PlayerId>, seed: u64, fixtures: Vec<Fixture>) -> Self {
        Self {
            id: Uuid::new_v4(),
            participants,
            seed,
            fixtures,
        }
    }

    /// Rebuild a championship from stored fixtures; participants are whoever appears in them.
    pub fn from_fixtures(fixtures: Vec<Fixture>, seed: u64) -> Self {
        let mut participants: Vec<PlayerId> = Vec::new();
        for f in &fixtures {
            for p in [&f.player_a, &f.player_b] {
                if !participants.contains(p) {
                    participants.push(p.clone());
                }
            }
        }
        participants.sort();
        Self::new(participants, seed, fixtures)
    }

    pub fn fixture(&self, id: FixtureId) -> Result<&Fixture, ClubError> {
        self.fixtures
            .iter()
            .find(|f| f.id == id)
            .ok_or(ClubError::FixtureNotFound(id))
    }

    pub fn fixture_mut(&mut self, id: FixtureId) -> Result<&mut Fixture, ClubError> {
        self.fixtures
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(ClubError::FixtureNotFound(id))
    }

    /// The unplayed fixture between two players, in either order.
    pub fn pending_fixture_between(&self, x: &str, y: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| !f.is_done() && f.pairs(x, y))
    }

    /// Fixtures with the given status, sorted by round.
    pub fn fixtures_with_status(&self, status: FixtureStatus) -> Vec<&Fixture> {
        let mut found: Vec<&Fixture> = self.fixtures.iter().filter(|f| f.status == status).collect();
        found.sort_by_key(|f| (f.round, f.id));
        found
    }

    /// Results of every played fixture, in fixture order.
    pub fn results(&self) -> Vec<EncodedMatch> {
        self.fixtures
            .iter()
            .filter_map(|f| f.result.clone())
            .collect()
    }

    pub fn round_count(&self) -> u32 {
        self.fixtures.iter().map(|f| f.round).max().unwrap_or(0)
    }

    pub fn progress(&self) -> Progress {
        let total = self.fixtures.len();
        let played = self.fixtures.iter().filter(|f| f.is_done()).count();
        let percent = whole_percent(played as u32, total as u32);
        Progress {
            played,
            to_play: total - played,
            total,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.fixtures.iter().all(Fixture::is_done)
    }
}
