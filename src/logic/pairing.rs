//! Round pairing: shuffle, bye assignment, pair walk.

use crate::models::{BracketMatch, Round, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build one round from the given team ids.
///
/// 1. Shuffle the ids uniformly.
/// 2. With an odd count, pick one position uniformly at random for the bye.
/// 3. Walk left to right, pairing each unused id with the next unused
///    non-bye id.
///
/// A team whose only remaining candidate is the bye slot advances on a bye
/// of its own, so every id is covered exactly once and the routine never
/// fails for a non-empty input. The round has `⌈N/2⌉` matches.
pub fn build_round(team_ids: &[TeamId], round_number: u32, rng: &mut impl Rng) -> Round {
    let mut ids = team_ids.to_vec();
    ids.shuffle(rng);

    let bye_index = if ids.len() % 2 == 1 {
        Some(rng.gen_range(0..ids.len()))
    } else {
        None
    };

    let mut matches = Round::with_capacity(ids.len().div_ceil(2));
    let mut used = vec![false; ids.len()];
    for i in 0..ids.len() {
        if used[i] {
            continue;
        }
        used[i] = true;

        if Some(i) == bye_index {
            matches.push(BracketMatch::bye(round_number, ids[i]));
            continue;
        }

        // Next unused partner, skipping the bye slot.
        let partner = (i + 1..ids.len()).find(|&j| !used[j] && Some(j) != bye_index);
        match partner {
            Some(j) => {
                used[j] = true;
                matches.push(BracketMatch::pairing(round_number, ids[i], ids[j]));
            }
            // Only the bye slot remains: advance unopposed rather than drop the team.
            None => matches.push(BracketMatch::bye(round_number, ids[i])),
        }
    }
    matches
}

/// Winners of the decided matches, in round order. Byes contribute their
/// sole team.
pub fn round_winners(matches: &[BracketMatch]) -> Vec<TeamId> {
    matches.iter().filter_map(|m| m.winner).collect()
}
