//! Team identity and roster.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and bracket lookups).
pub type TeamId = Uuid;

/// Errors that can occur during team registration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// Team name is empty after trimming.
    NameRequired,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Roster size out of range after dropping blank entries.
    RosterSize { got: usize },
    /// The registry could not be read or written; retry later.
    StorageUnavailable,
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::NameRequired => write!(f, "Team name required"),
            RegistryError::DuplicateTeamName => write!(f, "Team name must be unique"),
            RegistryError::RosterSize { got } => write!(
                f,
                "Players must be {}-{} (got {})",
                Team::MIN_PLAYERS,
                Team::MAX_PLAYERS,
                got
            ),
            RegistryError::StorageUnavailable => write!(f, "Team registry unavailable"),
        }
    }
}

/// A registered team: unique name plus an ordered roster of player names.
/// Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 5;

    /// Validate and build a team. The name and every player name are trimmed;
    /// blank player entries are dropped before the roster size check.
    pub fn new(name: impl Into<String>, players: Vec<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::NameRequired);
        }
        let players: Vec<String> = players
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if players.len() < Self::MIN_PLAYERS || players.len() > Self::MAX_PLAYERS {
            return Err(RegistryError::RosterSize { got: players.len() });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            players,
            created_at: Utc::now(),
        })
    }
}
