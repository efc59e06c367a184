//! In-memory storage: the team registry and the singleton tournament store.

use crate::models::{RegistryError, Team, TeamId, Tournament, TournamentError};
use chrono::Utc;
use std::sync::{RwLock, TryLockError};
use std::thread;
use std::time::{Duration, Instant};

/// Registered teams, in registration order. Names are unique
/// case-insensitively.
#[derive(Debug, Default)]
pub struct TeamRegistry {
    teams: RwLock<Vec<Team>>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a team.
    pub fn create(&self, name: &str, players: Vec<String>) -> Result<Team, RegistryError> {
        let team = Team::new(name, players)?;
        let mut teams = self
            .teams
            .write()
            .map_err(|_| RegistryError::StorageUnavailable)?;
        if teams.iter().any(|t| t.name.eq_ignore_ascii_case(&team.name)) {
            return Err(RegistryError::DuplicateTeamName);
        }
        teams.push(team.clone());
        Ok(team)
    }

    /// All teams in registration order.
    pub fn list(&self) -> Result<Vec<Team>, RegistryError> {
        let teams = self
            .teams
            .read()
            .map_err(|_| RegistryError::StorageUnavailable)?;
        Ok(teams.clone())
    }

    /// Identifiers of all registered teams (consumed when starting a
    /// tournament).
    pub fn team_ids(&self) -> Result<Vec<TeamId>, RegistryError> {
        let teams = self
            .teams
            .read()
            .map_err(|_| RegistryError::StorageUnavailable)?;
        Ok(teams.iter().map(|t| t.id).collect())
    }
}

/// How long a writer waits for the tournament slot before failing fast.
const LOCK_WAIT: Duration = Duration::from_millis(500);
const LOCK_RETRY: Duration = Duration::from_millis(5);

/// Holds the single live tournament, created lazily on first access.
///
/// Every mutation goes through [`TournamentStore::update`], which runs the
/// transition on a copy of the aggregate and commits the copy only on `Ok`:
/// a failed transition never persists partial state, and concurrent
/// transitions serialize on the write lock.
#[derive(Debug, Default)]
pub struct TournamentStore {
    slot: RwLock<Option<Tournament>>,
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current tournament, creating the idle singleton if
    /// none exists yet. Read-only callers may see a slightly stale value
    /// relative to an in-flight update.
    pub fn get(&self) -> Result<Tournament, TournamentError> {
        {
            let slot = self
                .slot
                .read()
                .map_err(|_| TournamentError::StorageUnavailable)?;
            if let Some(t) = slot.as_ref() {
                return Ok(t.clone());
            }
        }
        self.update(|_| Ok(()))
    }

    /// Run one transition as an atomic read-modify-write and return the
    /// committed tournament. Lock acquisition is bounded: on timeout or a
    /// poisoned lock this fails fast with `StorageUnavailable`.
    pub fn update<F>(&self, transition: F) -> Result<Tournament, TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
    {
        let deadline = Instant::now() + LOCK_WAIT;
        let mut slot = loop {
            match self.slot.try_write() {
                Ok(guard) => break guard,
                Err(TryLockError::Poisoned(_)) => return Err(TournamentError::StorageUnavailable),
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(TournamentError::StorageUnavailable);
                    }
                    thread::sleep(LOCK_RETRY);
                }
            }
        };

        let mut next = (*slot).clone().unwrap_or_default();
        transition(&mut next)?;
        next.updated_at = Utc::now();
        *slot = Some(next.clone());
        Ok(next)
    }
}
