//! Lifecycle transitions: start and reset.

use crate::logic::pairing::build_round;
use crate::models::{TeamId, Tournament, TournamentError, TournamentStatus};
use rand::Rng;

/// Minimum number of registered teams required to start a bracket.
pub const MIN_TEAMS: usize = 2;

/// Start the tournament: build round 1 from all registered team ids.
pub fn start_tournament(
    tournament: &mut Tournament,
    team_ids: &[TeamId],
    rng: &mut impl Rng,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Idle {
        return Err(TournamentError::AlreadyStarted);
    }
    if team_ids.len() < MIN_TEAMS {
        return Err(TournamentError::InsufficientTeams);
    }
    let first_round = build_round(team_ids, 1, rng);
    tournament.status = TournamentStatus::Running;
    tournament.current_round = 1;
    tournament.rounds = vec![first_round];
    tournament.champion = None;
    Ok(())
}

/// Abandon the tournament from any state and return to idle.
/// Rounds are discarded, not archived.
pub fn reset_tournament(tournament: &mut Tournament) {
    tournament.status = TournamentStatus::Idle;
    tournament.current_round = 0;
    tournament.rounds.clear();
    tournament.champion = None;
}
