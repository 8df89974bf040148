//! Round-robin scheduling (circle method) for the championship.

use crate::models::{name_key, ClubError, Fixture, FixtureId, PlayerId, Round};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// Generate every round of a single round robin between `players`.
///
/// 1. Shuffle the players with a PRNG seeded by `seed` (same seed, same schedule).
/// 2. Pad with a bye slot when the count is odd; `n` is the padded count.
/// 3. Each of the `n - 1` rounds pairs slot `i` with slot `n - 1 - i`; pairs with the bye are dropped.
/// 4. Between rounds slot 0 stays put and the last slot moves to slot 1.
pub fn schedule(players: &[PlayerId], seed: u64) -> Result<Vec<Round>, ClubError> {
    if players.len() < 2 {
        return Err(ClubError::InsufficientPlayers);
    }
    let mut seen = HashSet::new();
    for p in players {
        if !seen.insert(name_key(p)) {
            return Err(ClubError::DuplicatePlayer(p.clone()));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut slots: Vec<Option<&PlayerId>> = players.iter().map(Some).collect();
    slots.shuffle(&mut rng);
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let mut rounds = Vec::with_capacity(n - 1);
    for r in 0..n - 1 {
        let pairings = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                _ => None,
            })
            .collect();
        rounds.push(Round {
            number: r as u32 + 1,
            pairings,
        });
        slots[1..].rotate_right(1);
    }

    log::debug!(
        "Scheduled {} rounds for {} players (seed {})",
        rounds.len(),
        players.len(),
        seed
    );
    Ok(rounds)
}

/// Flatten rounds into fixtures numbered from 1, all still to play.
pub fn fixtures_from_rounds(rounds: &[Round]) -> Vec<Fixture> {
    rounds
        .iter()
        .flat_map(|round| {
            round
                .pairings
                .iter()
                .map(move |(a, b)| (round.number, a, b))
        })
        .enumerate()
        .map(|(i, (round, a, b))| Fixture::new(i as FixtureId + 1, round, a.clone(), b.clone()))
        .collect()
}
