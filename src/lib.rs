//! Single-elimination team tournament: models, bracket engine, and storage.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    build_round, record_winner, reset_tournament, round_winners, start_tournament, MIN_TEAMS,
};
pub use models::{
    BracketMatch, MatchId, RegistryError, Round, Team, TeamId, Tournament, TournamentError,
    TournamentStatus,
};
pub use storage::{TeamRegistry, TournamentStore};
