//! Set scores and the canonical encoded match record.

use crate::models::club::ClubError;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Points a side needs to take a set.
pub const SET_POINTS: u32 = 11;

/// Minimum lead needed to take a set.
pub const SET_MARGIN: u32 = 2;

/// Upper bound on raw points for one side in one set.
pub const MAX_SET_POINTS: u32 = 50;

/// Sets needed to win a best-of-five match.
pub const SETS_TO_WIN: u8 = 3;

/// Maximum sets in a match.
pub const MAX_SETS: usize = 5;

/// Legacy stored code for a set the match loser won 11-0.
pub const WHITEWASH_AGAINST_CODE: i32 = -99;

/// Raw points of side A and side B in one set, as entered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

/// Which side took a set (or the match).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    A,
    B,
}

impl SetScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Side that won this set, or `None` when the score is not a finished set.
    pub fn decided_for(&self) -> Option<Side> {
        if self.a > MAX_SET_POINTS || self.b > MAX_SET_POINTS {
            return None;
        }
        if self.a >= SET_POINTS && self.a >= self.b + SET_MARGIN {
            Some(Side::A)
        } else if self.b >= SET_POINTS && self.b >= self.a + SET_MARGIN {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Points scored by `side`.
    pub fn points(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

impl From<(u32, u32)> for SetScore {
    fn from((a, b): (u32, u32)) -> Self {
        Self { a, b }
    }
}

/// One set of a stored match, seen from the match winner.
///
/// Serialized as the legacy integer code (`null` / empty cell for an unplayed set) so that
/// historical records stay decodable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "Option<i32>", try_from = "Option<i32>")]
pub enum EncodedSet {
    /// Match winner took the set; the loser scored `loser_points` (at least 1).
    WonByWinner { loser_points: u8 },
    /// Match loser took the set; the winner scored `winner_points` (at least 1).
    LostByWinner { winner_points: u8 },
    /// Match winner took the set 11-0.
    Whitewash,
    /// Match loser took the set 11-0.
    WhitewashAgainst,
    #[default]
    NotPlayed,
}

/// Points of both sides in a decoded set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodedSet {
    pub winner_points: u32,
    pub loser_points: u32,
}

/// Points credited to whoever took a set in which the other side scored `other`.
fn set_taker_points(other: u32) -> u32 {
    SET_POINTS.max(other + SET_MARGIN)
}

impl EncodedSet {
    /// Encode one set given both sides' raw points, relative to the match winner.
    pub fn from_points(winner_points: u32, loser_points: u32) -> Self {
        if winner_points > loser_points {
            match loser_points {
                0 => EncodedSet::Whitewash,
                p => EncodedSet::WonByWinner {
                    loser_points: p as u8,
                },
            }
        } else {
            match winner_points {
                0 => EncodedSet::WhitewashAgainst,
                p => EncodedSet::LostByWinner {
                    winner_points: p as u8,
                },
            }
        }
    }

    pub fn is_played(&self) -> bool {
        !matches!(self, EncodedSet::NotPlayed)
    }

    /// True when the match loser took this set.
    pub fn won_by_loser(&self) -> bool {
        matches!(
            self,
            EncodedSet::LostByWinner { .. } | EncodedSet::WhitewashAgainst
        )
    }

    /// True when the match winner took this set.
    pub fn won_by_winner(&self) -> bool {
        matches!(self, EncodedSet::WonByWinner { .. } | EncodedSet::Whitewash)
    }

    /// Recover both sides' points; `None` for an unplayed set.
    ///
    /// Codes keep only the points of the side that lost the set, so the set taker is credited
    /// `max(11, other + 2)`. Regulation sets (11-X, or a two-point finish after 10-10) come back
    /// exactly; an overlong score such as 15-5 is accepted by validation but reads back as 11-5.
    pub fn decode(&self) -> Option<DecodedSet> {
        match *self {
            EncodedSet::WonByWinner { loser_points } => {
                let loser_points = u32::from(loser_points);
                Some(DecodedSet {
                    winner_points: set_taker_points(loser_points),
                    loser_points,
                })
            }
            EncodedSet::LostByWinner { winner_points } => {
                let winner_points = u32::from(winner_points);
                Some(DecodedSet {
                    winner_points,
                    loser_points: set_taker_points(winner_points),
                })
            }
            EncodedSet::Whitewash => Some(DecodedSet {
                winner_points: SET_POINTS,
                loser_points: 0,
            }),
            EncodedSet::WhitewashAgainst => Some(DecodedSet {
                winner_points: 0,
                loser_points: SET_POINTS,
            }),
            EncodedSet::NotPlayed => None,
        }
    }

    /// Legacy storage code: `X`, `-X`, `0`, `-99`, or `None` when not played.
    pub fn code(&self) -> Option<i32> {
        match *self {
            EncodedSet::WonByWinner { loser_points } => Some(i32::from(loser_points)),
            EncodedSet::LostByWinner { winner_points } => Some(-i32::from(winner_points)),
            EncodedSet::Whitewash => Some(0),
            EncodedSet::WhitewashAgainst => Some(WHITEWASH_AGAINST_CODE),
            EncodedSet::NotPlayed => None,
        }
    }

    /// Parse a legacy storage code.
    pub fn from_code(code: Option<i32>) -> Result<Self, ClubError> {
        let max = MAX_SET_POINTS as i32;
        match code {
            None => Ok(EncodedSet::NotPlayed),
            Some(0) => Ok(EncodedSet::Whitewash),
            Some(WHITEWASH_AGAINST_CODE) => Ok(EncodedSet::WhitewashAgainst),
            Some(c) if (1..=max).contains(&c) => Ok(EncodedSet::WonByWinner {
                loser_points: c as u8,
            }),
            Some(c) if (-max..=-1).contains(&c) => Ok(EncodedSet::LostByWinner {
                winner_points: (-c) as u8,
            }),
            Some(c) => Err(ClubError::MalformedSetCode(c)),
        }
    }
}

impl From<EncodedSet> for Option<i32> {
    fn from(set: EncodedSet) -> Self {
        set.code()
    }
}

impl TryFrom<Option<i32>> for EncodedSet {
    type Error = ClubError;

    fn try_from(code: Option<i32>) -> Result<Self, Self::Error> {
        EncodedSet::from_code(code)
    }
}

/// Canonical stored form of a finished match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EncodedMatch {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub sets: [EncodedSet; MAX_SETS],
    /// Host-provided stamp, never interpreted.
    pub timestamp: String,
}

impl EncodedMatch {
    /// Sets taken by the match loser.
    pub fn loser_sets(&self) -> u8 {
        self.sets.iter().filter(|s| s.won_by_loser()).count() as u8
    }

    /// Sets taken by the match winner.
    pub fn winner_sets(&self) -> u8 {
        self.sets.iter().filter(|s| s.won_by_winner()).count() as u8
    }

    /// Played sets, in order.
    pub fn played_sets(&self) -> impl Iterator<Item = &EncodedSet> {
        self.sets.iter().filter(|s| s.is_played())
    }

    /// Check the record is a coherent best-of-five result.
    ///
    /// Played sets form a prefix, the winner took exactly three sets, the loser at most two,
    /// and the last played set went to the winner.
    pub fn check_shape(&self) -> Result<(), ClubError> {
        if self.winner == self.loser {
            return Err(ClubError::MalformedMatch(format!(
                "{} is recorded against themselves",
                self.winner
            )));
        }
        let played = self.sets.iter().take_while(|s| s.is_played()).count();
        if self.sets[played..].iter().any(|s| s.is_played()) {
            return Err(ClubError::MalformedMatch(
                "a played set follows an unplayed one".to_string(),
            ));
        }
        if self.winner_sets() != SETS_TO_WIN {
            return Err(ClubError::MalformedMatch(format!(
                "winner took {} sets",
                self.winner_sets()
            )));
        }
        if self.loser_sets() >= SETS_TO_WIN {
            return Err(ClubError::MalformedMatch(format!(
                "loser took {} sets",
                self.loser_sets()
            )));
        }
        if played > 0 && !self.sets[played - 1].won_by_winner() {
            return Err(ClubError::MalformedMatch(
                "deciding set went to the loser".to_string(),
            ));
        }
        Ok(())
    }

    /// Set tally as `"3-1"`.
    pub fn tally(&self) -> String {
        format!("{}-{}", self.winner_sets(), self.loser_sets())
    }
}

/// Result of validating and encoding one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub record: EncodedMatch,
    pub winner_sets: u8,
    pub loser_sets: u8,
    /// Decided sets as `"a-b"` in the order the players were entered.
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_codes_map_to_variants() {
        assert_eq!(EncodedSet::from_code(Some(7)).unwrap(), EncodedSet::WonByWinner { loser_points: 7 });
        assert_eq!(EncodedSet::from_code(Some(-9)).unwrap(), EncodedSet::LostByWinner { winner_points: 9 });
        assert_eq!(EncodedSet::from_code(Some(0)).unwrap(), EncodedSet::Whitewash);
        assert_eq!(EncodedSet::from_code(Some(-99)).unwrap(), EncodedSet::WhitewashAgainst);
        assert_eq!(EncodedSet::from_code(None).unwrap(), EncodedSet::NotPlayed);
        assert_eq!(
            EncodedSet::from_code(Some(120)),
            Err(ClubError::MalformedSetCode(120))
        );
    }

    #[test]
    fn deuce_sets_decode_to_two_point_lead() {
        let set = EncodedSet::from_points(14, 12);
        assert_eq!(set.code(), Some(12));
        assert_eq!(
            set.decode(),
            Some(DecodedSet { winner_points: 14, loser_points: 12 })
        );
    }

    #[test]
    fn overlong_set_reads_back_as_regulation_score() {
        let set = EncodedSet::from_points(15, 5);
        assert_eq!(set.code(), Some(5));
        assert_eq!(
            set.decode(),
            Some(DecodedSet { winner_points: 11, loser_points: 5 })
        );
    }

    #[test]
    fn set_needs_eleven_and_two_clear() {
        assert_eq!(SetScore::new(11, 9).decided_for(), Some(Side::A));
        assert_eq!(SetScore::new(10, 12).decided_for(), Some(Side::B));
        assert_eq!(SetScore::new(11, 10).decided_for(), None);
        assert_eq!(SetScore::new(10, 9).decided_for(), None);
        assert_eq!(SetScore::new(0, 0).decided_for(), None);
        assert_eq!(SetScore::new(60, 3).decided_for(), None);
    }

    #[test]
    fn json_uses_legacy_codes() {
        let sets = [
            EncodedSet::WonByWinner { loser_points: 5 },
            EncodedSet::WhitewashAgainst,
            EncodedSet::NotPlayed,
        ];
        assert_eq!(serde_json::to_string(&sets).unwrap(), "[5,-99,null]");
        let back: Vec<EncodedSet> = serde_json::from_str("[5,-99,null]").unwrap();
        assert_eq!(back, sets.to_vec());
    }
}
