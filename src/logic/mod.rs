//! Bracket engine: pairing, advancement, lifecycle.
//!
//! Every transition takes the tournament aggregate explicitly and mutates it
//! in place; persistence is the storage layer's concern.

mod advancement;
mod lifecycle;
mod pairing;

pub use advancement::record_winner;
pub use lifecycle::{reset_tournament, start_tournament, MIN_TEAMS};
pub use pairing::{build_round, round_winners};
