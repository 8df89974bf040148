//! Data structures for the club: players, set scores, fixtures, championship state.

mod championship;
mod club;
mod fixture;
mod player;
mod score;

pub use championship::{Championship, ChampionshipId, Progress};
pub use club::{Club, ClubError};
pub use fixture::{Fixture, FixtureId, FixtureStatus, Round};
pub use player::{
    name_key, whole_percent, PlayerId, PlayerStats, Standing, POINTS_PER_LOSS, POINTS_PER_WIN,
};
pub use score::{
    DecodedSet, EncodedMatch, EncodedSet, MatchReport, SetScore, Side, MAX_SETS, MAX_SET_POINTS,
    SETS_TO_WIN, SET_MARGIN, SET_POINTS, WHITEWASH_AGAINST_CODE,
};
