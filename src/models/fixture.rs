//! Championship fixtures and scheduled rounds.

use crate::models::player::PlayerId;
use crate::models::score::EncodedMatch;
use serde::{Deserialize, Serialize};

/// Identifier of a fixture: its 1-based position in the championship's fixture list.
pub type FixtureId = u32;

/// Whether a fixture still has to be played.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    #[serde(alias = "à jouer")]
    ToPlay,
    #[serde(alias = "terminé")]
    Done,
}

/// One round of a round-robin schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number.
    pub number: u32,
    pub pairings: Vec<(PlayerId, PlayerId)>,
}

/// A scheduled pairing between two championship players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub round: u32,
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub status: FixtureStatus,
    /// Set once, when the fixture is played.
    pub result: Option<EncodedMatch>,
}

impl Fixture {
    pub fn new(id: FixtureId, round: u32, player_a: PlayerId, player_b: PlayerId) -> Self {
        Self {
            id,
            round,
            player_a,
            player_b,
            status: FixtureStatus::ToPlay,
            result: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == FixtureStatus::Done
    }

    /// True when this fixture pairs `x` and `y`, in either order.
    pub fn pairs(&self, x: &str, y: &str) -> bool {
        (self.player_a == x && self.player_b == y) || (self.player_a == y && self.player_b == x)
    }
}
