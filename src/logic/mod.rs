//! Club business logic: match encoding, round-robin scheduling, standings.

mod championship;
mod encoding;
mod free_play;
mod round_robin;
mod standings;

pub use championship::{
    championship_head_to_head, championship_standings, start_championship,
    submit_fixture_result, submit_result_between,
};
pub use encoding::validate_and_encode;
pub use free_play::{free_play_standings, import_free_play_matches, record_free_play_result};
pub use round_robin::{fixtures_from_rounds, schedule};
pub use standings::{aggregate, head_to_head, rank, standings, HeadToHead, Ranking};
