//! Winner recording and round advancement.

use crate::logic::pairing::{build_round, round_winners};
use crate::models::{MatchId, TeamId, Tournament, TournamentError, TournamentStatus};
use rand::Rng;

/// Record a winner on a match in the current round.
///
/// Re-reporting the same winner is a no-op. Changing an already-decided
/// match is rejected, so a completed round can never advance the bracket a
/// second time. When this call decides the last open match of the round, the
/// round's winners either crown a champion (one winner left) or seed the
/// next round within the same call, with no intermediate state.
pub fn record_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: TeamId,
    rng: &mut impl Rng,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Running {
        return Err(TournamentError::NotRunning);
    }

    let winners = {
        let matches = match tournament.current_matches_mut() {
            Some(ms) if !ms.is_empty() => ms,
            _ => return Err(TournamentError::RoundMissing),
        };
        let m = matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if !m.has_team(winner) {
            return Err(TournamentError::InvalidWinner(winner));
        }
        match m.winner {
            Some(prev) if prev == winner => {}
            Some(_) => return Err(TournamentError::MatchAlreadyDecided(match_id)),
            None => m.winner = Some(winner),
        }

        if !matches.iter().all(|m| m.is_decided()) {
            return Ok(());
        }
        round_winners(matches)
    };

    // Round complete: finish or build the next layer.
    if winners.len() == 1 {
        tournament.status = TournamentStatus::Finished;
        tournament.champion = Some(winners[0]);
    } else {
        let next_round = build_round(&winners, tournament.current_round + 1, rng);
        tournament.rounds.push(next_round);
        tournament.current_round += 1;
    }
    Ok(())
}
