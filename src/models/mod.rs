//! Data structures for the tournament: teams, matches, bracket state.

mod bracket;
mod team;
mod tournament;

pub use bracket::{BracketMatch, MatchId, Round};
pub use team::{RegistryError, Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentStatus};
