//! Bracket engine: lifecycle transitions, winner validation, advancement.

use knockout_tournament_web::{
    record_winner, reset_tournament, start_tournament, TeamId, Tournament, TournamentError,
    TournamentStatus,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn team_ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

/// A running tournament over `n` fresh teams, with the rng used to build it.
fn started(n: usize, seed: u64) -> (Tournament, Vec<TeamId>, StdRng) {
    let ids = team_ids(n);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut t = Tournament::new();
    start_tournament(&mut t, &ids, &mut rng).unwrap();
    (t, ids, rng)
}

#[test]
fn start_requires_two_teams() {
    let mut t = Tournament::new();
    let mut rng = StdRng::seed_from_u64(0);
    let one = team_ids(1);
    assert!(matches!(
        start_tournament(&mut t, &one, &mut rng),
        Err(TournamentError::InsufficientTeams)
    ));
    assert_eq!(t.status, TournamentStatus::Idle);
    assert!(t.rounds.is_empty());
}

#[test]
fn start_builds_round_one() {
    let (t, ids, _) = started(4, 1);
    assert_eq!(t.status, TournamentStatus::Running);
    assert_eq!(t.current_round, 1);
    assert_eq!(t.rounds.len(), 1);
    assert_eq!(t.rounds[0].len(), 2);
    assert_eq!(t.champion, None);
    assert!(t.rounds[0].iter().all(|m| ids.contains(&m.team_a)));
}

#[test]
fn start_twice_fails() {
    let (mut t, ids, mut rng) = started(4, 2);
    assert!(matches!(
        start_tournament(&mut t, &ids, &mut rng),
        Err(TournamentError::AlreadyStarted)
    ));
}

#[test]
fn record_winner_requires_running() {
    let mut t = Tournament::new();
    let mut rng = StdRng::seed_from_u64(3);
    assert!(matches!(
        record_winner(&mut t, Uuid::new_v4(), Uuid::new_v4(), &mut rng),
        Err(TournamentError::NotRunning)
    ));
}

#[test]
fn record_winner_unknown_match() {
    let (mut t, ids, mut rng) = started(4, 4);
    assert!(matches!(
        record_winner(&mut t, Uuid::new_v4(), ids[0], &mut rng),
        Err(TournamentError::MatchNotFound(_))
    ));
}

#[test]
fn record_winner_rejects_third_party_team() {
    let (mut t, _, mut rng) = started(4, 5);
    let match_id = t.rounds[0][0].id;
    let outsider = Uuid::new_v4();
    assert!(matches!(
        record_winner(&mut t, match_id, outsider, &mut rng),
        Err(TournamentError::InvalidWinner(_))
    ));
    assert_eq!(t.rounds[0][0].winner, None);
}

#[test]
fn two_team_final_crowns_champion() {
    let (mut t, _, mut rng) = started(2, 6);
    assert_eq!(t.rounds[0].len(), 1);
    let m = t.rounds[0][0].clone();
    assert!(!m.bye);
    record_winner(&mut t, m.id, m.team_a, &mut rng).unwrap();
    assert_eq!(t.status, TournamentStatus::Finished);
    assert_eq!(t.champion, Some(m.team_a));
    assert_eq!(t.rounds.len(), 1);
    assert_eq!(t.current_round, 1);
}

/// Three teams: one bye in round 1, then a two-team round 2, then a champion.
#[test]
fn three_team_tournament_runs_to_completion() {
    let (mut t, _, mut rng) = started(3, 7);
    assert_eq!(t.rounds[0].len(), 2);
    let bye = t.rounds[0].iter().find(|m| m.bye).unwrap().clone();
    let open = t.rounds[0].iter().find(|m| !m.bye).unwrap().clone();

    // Deciding the only open match completes the round and seeds round 2.
    let advancing = open.team_b.unwrap();
    record_winner(&mut t, open.id, advancing, &mut rng).unwrap();
    assert_eq!(t.status, TournamentStatus::Running);
    assert_eq!(t.current_round, 2);
    assert_eq!(t.rounds.len(), 2);
    assert_eq!(t.rounds[1].len(), 1);

    let final_match = t.rounds[1][0].clone();
    assert!(!final_match.bye);
    assert!(final_match.has_team(advancing));
    assert!(final_match.has_team(bye.team_a));

    record_winner(&mut t, final_match.id, final_match.team_a, &mut rng).unwrap();
    assert_eq!(t.status, TournamentStatus::Finished);
    assert_eq!(t.champion, Some(final_match.team_a));
}

#[test]
fn same_winner_rereport_is_a_noop() {
    let (mut t, _, mut rng) = started(4, 8);
    let m = t.rounds[0][0].clone();
    record_winner(&mut t, m.id, m.team_a, &mut rng).unwrap();
    record_winner(&mut t, m.id, m.team_a, &mut rng).unwrap();
    // The other match is still open, so the round must not have advanced.
    assert_eq!(t.current_round, 1);
    assert_eq!(t.rounds.len(), 1);
    assert_eq!(t.rounds[0][0].winner, Some(m.team_a));
}

#[test]
fn changing_a_decided_match_is_rejected() {
    let (mut t, _, mut rng) = started(4, 9);
    let m = t.rounds[0][0].clone();
    let team_b = m.team_b.unwrap();
    record_winner(&mut t, m.id, m.team_a, &mut rng).unwrap();
    assert!(matches!(
        record_winner(&mut t, m.id, team_b, &mut rng),
        Err(TournamentError::MatchAlreadyDecided(_))
    ));
    assert_eq!(t.rounds[0][0].winner, Some(m.team_a));
}

/// Once a round completes and the bracket advances, its matches are no
/// longer addressable, so a completed round can never advance twice.
#[test]
fn completed_rounds_are_not_reentrant() {
    let (mut t, _, mut rng) = started(4, 10);
    let round_one: Vec<_> = t.rounds[0].clone();
    for m in &round_one {
        record_winner(&mut t, m.id, m.team_a, &mut rng).unwrap();
    }
    assert_eq!(t.current_round, 2);
    assert!(matches!(
        record_winner(&mut t, round_one[0].id, round_one[0].team_a, &mut rng),
        Err(TournamentError::MatchNotFound(_))
    ));
    assert_eq!(t.rounds.len(), 2);
}

#[test]
fn reset_returns_to_idle_from_any_state() {
    // Idle.
    let mut idle = Tournament::new();
    reset_tournament(&mut idle);
    assert_eq!(idle.status, TournamentStatus::Idle);

    // Running.
    let (mut running, _, _) = started(4, 11);
    reset_tournament(&mut running);
    assert_eq!(running.status, TournamentStatus::Idle);
    assert_eq!(running.current_round, 0);
    assert!(running.rounds.is_empty());
    assert_eq!(running.champion, None);

    // Finished.
    let (mut finished, _, mut rng) = started(2, 12);
    let m = finished.rounds[0][0].clone();
    record_winner(&mut finished, m.id, m.team_a, &mut rng).unwrap();
    assert_eq!(finished.status, TournamentStatus::Finished);
    reset_tournament(&mut finished);
    assert_eq!(finished.status, TournamentStatus::Idle);
    assert_eq!(finished.current_round, 0);
    assert!(finished.rounds.is_empty());
    assert_eq!(finished.champion, None);
}

#[test]
fn restart_after_reset_is_allowed() {
    let (mut t, ids, mut rng) = started(4, 13);
    reset_tournament(&mut t);
    start_tournament(&mut t, &ids, &mut rng).unwrap();
    assert_eq!(t.status, TournamentStatus::Running);
    assert_eq!(t.current_round, 1);
    assert_eq!(t.rounds.len(), 1);
}

/// Drive a nine-team bracket to completion by always picking team A. Each
/// round must shrink the field and the whole thing must converge.
#[test]
fn nine_team_bracket_converges() {
    let (mut t, _, mut rng) = started(9, 14);
    assert_eq!(t.rounds[0].len(), 5);

    let mut steps = 0;
    while t.status == TournamentStatus::Running {
        let open = t
            .current_matches()
            .unwrap()
            .iter()
            .find(|m| !m.is_decided())
            .expect("a running round has an open match")
            .clone();
        record_winner(&mut t, open.id, open.team_a, &mut rng).unwrap();
        steps += 1;
        assert!(steps < 100, "bracket did not converge");
    }

    assert_eq!(t.status, TournamentStatus::Finished);
    assert!(t.champion.is_some());
    // Every generated round pairs the surviving field: ceil(n/2) matches.
    let mut field = 9;
    for round in &t.rounds {
        assert_eq!(round.len(), (field + 1) / 2);
        field = round.len();
    }
    assert_eq!(field, 1);
}
