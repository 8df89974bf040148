//! Club: roster, free-play history and the current championship.

use crate::models::championship::Championship;
use crate::models::fixture::FixtureId;
use crate::models::player::{name_key, PlayerId};
use crate::models::score::EncodedMatch;
use serde::{Deserialize, Serialize};

/// Errors that can occur during club operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClubError {
    /// Set number (1-based) does not have a valid finished score.
    InvalidSetScore(usize),
    /// Neither side reached three sets.
    TiedMatch,
    /// The scoreline contradicts how the match was clinched.
    ImpossibleScoreline,
    /// Scheduling needs at least two players.
    InsufficientPlayers,
    /// Both sides of a match are the same player.
    SamePlayer,
    /// A player appears twice (names are unique, case-insensitive).
    DuplicatePlayer(PlayerId),
    EmptyPlayerName,
    /// Player is not in the roster.
    UnknownPlayer(PlayerId),
    FixtureNotFound(FixtureId),
    /// The fixture already has a result.
    FixtureAlreadyPlayed(FixtureId),
    /// No unplayed fixture between these two players.
    NoPendingFixture(PlayerId, PlayerId),
    /// No championship has been scheduled.
    NoChampionship,
    /// A championship already exists; fixtures are only generated once.
    ChampionshipAlreadyScheduled,
    /// A stored set code is outside the legacy scheme.
    MalformedSetCode(i32),
    /// A stored match is not a coherent best-of-five result.
    MalformedMatch(String),
}

impl std::fmt::Display for ClubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClubError::InvalidSetScore(index) => write!(f, "Invalid score for set {}", index),
            ClubError::TiedMatch => write!(f, "Neither player won three sets"),
            ClubError::ImpossibleScoreline => {
                write!(f, "The match winner cannot lose the deciding set, check the scores")
            }
            ClubError::InsufficientPlayers => write!(f, "Need at least 2 players"),
            ClubError::SamePlayer => write!(f, "A player cannot play against themselves"),
            ClubError::DuplicatePlayer(name) => write!(f, "Player {} is listed twice", name),
            ClubError::EmptyPlayerName => write!(f, "Player name is empty"),
            ClubError::UnknownPlayer(name) => write!(f, "Unknown player {}", name),
            ClubError::FixtureNotFound(id) => write!(f, "Fixture {} not found", id),
            ClubError::FixtureAlreadyPlayed(id) => write!(f, "Fixture {} has already been played", id),
            ClubError::NoPendingFixture(a, b) => {
                write!(f, "No fixture left to play between {} and {}", a, b)
            }
            ClubError::NoChampionship => write!(f, "No championship has been scheduled"),
            ClubError::ChampionshipAlreadyScheduled => {
                write!(f, "The championship is already scheduled")
            }
            ClubError::MalformedSetCode(code) => write!(f, "Unknown set code {}", code),
            ClubError::MalformedMatch(reason) => write!(f, "Malformed match: {}", reason),
        }
    }
}

impl std::error::Error for ClubError {}

/// Everything the club keeps: who plays, free-play results and the championship.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Club {
    pub roster: Vec<PlayerId>,
    /// Free-play results, oldest first.
    pub matches: Vec<EncodedMatch>,
    pub championship: Option<Championship>,
}

impl Club {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a club with an initial roster; blank and repeated names are dropped.
    pub fn with_roster(players: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut club = Self::new();
        for name in players {
            let name = name.into();
            if let Err(e) = club.add_player(name.as_str()) {
                log::warn!("Skipping roster entry {:?}: {}", name, e);
            }
        }
        club
    }

    /// Add a player. Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<(), ClubError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(ClubError::EmptyPlayerName);
        }
        let key = name_key(name_trimmed);
        let is_duplicate = self.roster.iter().any(|p| name_key(p) == key);
        if is_duplicate {
            return Err(ClubError::DuplicatePlayer(name_trimmed.to_string()));
        }
        self.roster.push(name_trimmed.to_string());
        Ok(())
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.roster.iter().any(|p| p == name)
    }

    /// Error unless `name` is in the roster.
    pub fn require_player(&self, name: &str) -> Result<(), ClubError> {
        if self.has_player(name) {
            Ok(())
        } else {
            Err(ClubError::UnknownPlayer(name.to_string()))
        }
    }

    pub fn championship(&self) -> Result<&Championship, ClubError> {
        self.championship.as_ref().ok_or(ClubError::NoChampionship)
    }

    pub fn championship_mut(&mut self) -> Result<&mut Championship, ClubError> {
        self.championship.as_mut().ok_or(ClubError::NoChampionship)
    }
}
