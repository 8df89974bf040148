//! Table tennis club scorekeeper: library with models, business logic and CSV records.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    aggregate, championship_head_to_head, championship_standings, fixtures_from_rounds,
    free_play_standings, head_to_head, import_free_play_matches, rank, record_free_play_result,
    schedule, standings, start_championship, submit_fixture_result, submit_result_between,
    validate_and_encode, HeadToHead, Ranking,
};
pub use models::{
    name_key, whole_percent, Championship, ChampionshipId, Club, ClubError, DecodedSet,
    EncodedMatch, EncodedSet, Fixture, FixtureId, FixtureStatus, MatchReport, PlayerId,
    PlayerStats, Progress, Round, SetScore, Standing,
};
pub use storage::StorageError;
