//! Bracket structures: matches and rounds of the single-elimination tree.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One layer of the bracket: every match carries the same round number.
pub type Round = Vec<BracketMatch>;

/// A single bracket slot: two teams, or one team advancing on a bye.
///
/// Invariant: `bye` implies `team_b` is absent and `winner == Some(team_a)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketMatch {
    pub id: MatchId,
    /// 1-based round number this match belongs to.
    pub round: u32,
    pub team_a: TeamId,
    /// Absent only for bye matches.
    pub team_b: Option<TeamId>,
    /// None until reported; byes are decided at creation.
    pub winner: Option<TeamId>,
    pub bye: bool,
}

impl BracketMatch {
    /// A regular pairing, undecided.
    pub fn pairing(round: u32, team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            team_a,
            team_b: Some(team_b),
            winner: None,
            bye: false,
        }
    }

    /// A bye: the team advances unopposed, winner set immediately.
    pub fn bye(round: u32, team: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            team_a: team,
            team_b: None,
            winner: Some(team),
            bye: true,
        }
    }

    /// Whether `team` plays in this match.
    pub fn has_team(&self, team: TeamId) -> bool {
        self.team_a == team || self.team_b == Some(team)
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }
}
