//! Tournament aggregate and error taxonomy.

use crate::models::bracket::{MatchId, Round};
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur during bracket operations. All are caller-input or
/// state-precondition violations, reported synchronously and never fatal;
/// `StorageUnavailable` is the one kind the caller should retry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Start requested but the tournament is already running or finished.
    AlreadyStarted,
    /// Fewer than two teams registered at start.
    InsufficientTeams,
    /// The operation requires a running tournament.
    NotRunning,
    /// The current round has no matches (guarded against even though the
    /// invariants should rule it out).
    RoundMissing,
    /// No match with this id in the current round.
    MatchNotFound(MatchId),
    /// The claimed winner is neither side of the addressed match.
    InvalidWinner(TeamId),
    /// The match already has a different winner recorded.
    MatchAlreadyDecided(MatchId),
    /// The tournament record could not be read or committed; retry later.
    StorageUnavailable,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::AlreadyStarted => {
                write!(f, "Tournament already started or finished")
            }
            TournamentError::InsufficientTeams => write!(f, "Need at least 2 teams to start"),
            TournamentError::NotRunning => write!(f, "Tournament not running"),
            TournamentError::RoundMissing => write!(f, "No matches in current round"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found in current round"),
            TournamentError::InvalidWinner(_) => write!(f, "Winner must be teamA or teamB"),
            TournamentError::MatchAlreadyDecided(_) => {
                write!(f, "Match already has a different winner")
            }
            TournamentError::StorageUnavailable => write!(f, "Tournament store unavailable"),
        }
    }
}

/// Where the tournament is in its life.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// Teams may register; no bracket exists.
    #[default]
    Idle,
    /// A bracket is live; winners are being recorded round by round.
    Running,
    /// A champion has been decided.
    Finished,
}

/// The single mutable aggregate: status, rounds played so far, champion.
///
/// Invariants: idle means `current_round == 0` with no rounds and no
/// champion; running means `rounds.len() == current_round >= 1` with no
/// champion; finished means a champion is set and the last round reduced to
/// one winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub status: TournamentStatus,
    /// 1-based index of the live round; 0 while idle.
    pub current_round: u32,
    /// Insertion order is round order.
    pub rounds: Vec<Round>,
    pub champion: Option<TeamId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// A fresh idle tournament with no rounds.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            status: TournamentStatus::Idle,
            current_round: 0,
            rounds: Vec::new(),
            champion: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Matches of the live round, if any.
    pub fn current_matches(&self) -> Option<&Round> {
        let idx = self.current_round.checked_sub(1)?;
        self.rounds.get(idx as usize)
    }

    /// Mutable matches of the live round, if any.
    pub fn current_matches_mut(&mut self) -> Option<&mut Round> {
        let idx = self.current_round.checked_sub(1)?;
        self.rounds.get_mut(idx as usize)
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}
