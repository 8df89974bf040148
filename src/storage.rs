//! CSV records: the storage-boundary form of matches, fixtures and the roster.
//!
//! Set cells hold the legacy codes (`X`, `-X`, `0`, `-99`, empty) so files written by earlier
//! versions of the club sheets stay readable. Reads also accept the sheets' French headers
//! (`vainqueur`, `adversaire`, `Set_1`.., `joueur_1`, `tour n°`, `statut`) and their
//! `Tour N` / `à jouer` / `terminé` cells. Reading is tolerant: a row that does not decode is
//! logged and skipped, only I/O failures abort.

use crate::models::{
    ClubError, EncodedMatch, EncodedSet, Fixture, FixtureId, FixtureStatus, PlayerId,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::io;

/// Errors reading or writing CSV records.
#[derive(Debug)]
pub enum StorageError {
    Csv(csv::Error),
    Io(io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Csv(e) => write!(f, "CSV error: {}", e),
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<csv::Error> for StorageError {
    fn from(e: csv::Error) -> Self {
        StorageError::Csv(e)
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MatchRow {
    #[serde(alias = "vainqueur")]
    winner: PlayerId,
    #[serde(alias = "adversaire")]
    loser: PlayerId,
    #[serde(alias = "Set_1")]
    set_1: EncodedSet,
    #[serde(alias = "Set_2")]
    set_2: EncodedSet,
    #[serde(alias = "Set_3")]
    set_3: EncodedSet,
    #[serde(alias = "Set_4")]
    set_4: EncodedSet,
    #[serde(alias = "Set_5")]
    set_5: EncodedSet,
    date: String,
}

impl From<&EncodedMatch> for MatchRow {
    fn from(m: &EncodedMatch) -> Self {
        let [set_1, set_2, set_3, set_4, set_5] = m.sets;
        Self {
            winner: m.winner.clone(),
            loser: m.loser.clone(),
            set_1,
            set_2,
            set_3,
            set_4,
            set_5,
            date: m.timestamp.clone(),
        }
    }
}

impl TryFrom<MatchRow> for EncodedMatch {
    type Error = ClubError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let m = EncodedMatch {
            winner: row.winner,
            loser: row.loser,
            sets: [row.set_1, row.set_2, row.set_3, row.set_4, row.set_5],
            timestamp: row.date,
        };
        m.check_shape()?;
        Ok(m)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FixtureRow {
    /// Absent from the old sheets; 0 until numbered.
    #[serde(default)]
    id: FixtureId,
    #[serde(alias = "tour n°", deserialize_with = "round_number")]
    round: u32,
    #[serde(alias = "joueur_1")]
    player_a: PlayerId,
    #[serde(alias = "joueur_2")]
    player_b: PlayerId,
    #[serde(alias = "statut")]
    status: FixtureStatus,
    #[serde(alias = "vainqueur")]
    winner: Option<PlayerId>,
    #[serde(alias = "adversaire")]
    loser: Option<PlayerId>,
    #[serde(alias = "Set_1")]
    set_1: EncodedSet,
    #[serde(alias = "Set_2")]
    set_2: EncodedSet,
    #[serde(alias = "Set_3")]
    set_3: EncodedSet,
    #[serde(alias = "Set_4")]
    set_4: EncodedSet,
    #[serde(alias = "Set_5")]
    set_5: EncodedSet,
    date: Option<String>,
}

/// Accept `3` as well as the sheets' `Tour 3`.
fn round_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = String::deserialize(deserializer)?;
    let digits = cell.trim().trim_start_matches("Tour").trim();
    digits
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid round {:?}", cell)))
}

impl From<&Fixture> for FixtureRow {
    fn from(f: &Fixture) -> Self {
        let sets = f
            .result
            .as_ref()
            .map(|m| m.sets)
            .unwrap_or_default();
        let [set_1, set_2, set_3, set_4, set_5] = sets;
        Self {
            id: f.id,
            round: f.round,
            player_a: f.player_a.clone(),
            player_b: f.player_b.clone(),
            status: f.status,
            winner: f.result.as_ref().map(|m| m.winner.clone()),
            loser: f.result.as_ref().map(|m| m.loser.clone()),
            set_1,
            set_2,
            set_3,
            set_4,
            set_5,
            date: f.result.as_ref().map(|m| m.timestamp.clone()),
        }
    }
}

impl TryFrom<FixtureRow> for Fixture {
    type Error = ClubError;

    fn try_from(row: FixtureRow) -> Result<Self, Self::Error> {
        let mut fixture = Fixture::new(row.id, row.round, row.player_a, row.player_b);
        if row.status == FixtureStatus::ToPlay {
            return Ok(fixture);
        }
        let (winner, loser) = match (row.winner, row.loser) {
            (Some(w), Some(l)) => (w, l),
            _ => {
                return Err(ClubError::MalformedMatch(format!(
                    "fixture {} is done but has no winner",
                    row.id
                )))
            }
        };
        if !fixture.pairs(&winner, &loser) {
            return Err(ClubError::MalformedMatch(format!(
                "fixture {} result names {} and {}",
                row.id, winner, loser
            )));
        }
        let result = EncodedMatch {
            winner,
            loser,
            sets: [row.set_1, row.set_2, row.set_3, row.set_4, row.set_5],
            timestamp: row.date.unwrap_or_default(),
        };
        result.check_shape()?;
        fixture.result = Some(result);
        fixture.status = FixtureStatus::Done;
        Ok(fixture)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    first_name: String,
    #[serde(default)]
    last_name: String,
}

/// Deserialize every row, converting with `TryFrom` and skipping rows that fail.
fn read_rows<R, Row, T>(rdr: R, what: &str) -> Result<Vec<T>, StorageError>
where
    R: io::Read,
    Row: serde::de::DeserializeOwned,
    T: TryFrom<Row, Error = ClubError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let mut out = Vec::new();
    for (i, row) in reader.deserialize::<Row>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        match row {
            Ok(row) => match T::try_from(row) {
                Ok(item) => out.push(item),
                Err(e) => log::warn!("Skipping {} on line {}: {}", what, line, e),
            },
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => log::warn!("Skipping {} on line {}: {}", what, line, e),
        }
    }
    Ok(out)
}

/// Read match rows (`winner,loser,set_1..set_5,date`).
pub fn read_matches<R: io::Read>(rdr: R) -> Result<Vec<EncodedMatch>, StorageError> {
    read_rows::<_, MatchRow, EncodedMatch>(rdr, "match")
}

/// Write match rows with a header line.
pub fn write_matches<W: io::Write>(wtr: W, matches: &[EncodedMatch]) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_writer(wtr);
    for m in matches {
        writer.serialize(MatchRow::from(m))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read fixture rows (`id,round,player_a,player_b,status,winner,loser,set_1..set_5,date`).
///
/// Files without an `id` column get their fixtures numbered from 1 in file order.
pub fn read_fixtures<R: io::Read>(rdr: R) -> Result<Vec<Fixture>, StorageError> {
    let mut fixtures = read_rows::<_, FixtureRow, Fixture>(rdr, "fixture")?;
    if fixtures.iter().all(|f| f.id == 0) {
        for (i, f) in fixtures.iter_mut().enumerate() {
            f.id = i as FixtureId + 1;
        }
    }
    Ok(fixtures)
}

/// Write fixture rows with a header line.
pub fn write_fixtures<W: io::Write>(wtr: W, fixtures: &[Fixture]) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_writer(wtr);
    for f in fixtures {
        writer.serialize(FixtureRow::from(f))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read roster rows (`first_name,last_name`); each player is known as `"first last"`.
pub fn read_roster<R: io::Read>(rdr: R) -> Result<Vec<PlayerId>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let mut players = Vec::new();
    for row in reader.deserialize::<RosterRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping roster row: {}", e);
                continue;
            }
        };
        let name = format!("{} {}", row.first_name, row.last_name);
        let name = name.trim();
        if !name.is_empty() {
            players.push(name.to_string());
        }
    }
    Ok(players)
}
