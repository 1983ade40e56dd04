//! Best-effort persistence of tournaments over a key-value backend.
//!
//! Every operation swallows storage failures: they are logged and show up as
//! "no data" (`None`, empty history) or a no-op. Callers cannot tell a record that
//! was never saved from one whose save failed.

mod backend;

pub use backend::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

use crate::logic::{tournament_summary, TournamentSummary};
use crate::models::{Tournament, TournamentId};
use chrono::{DateTime, TimeDelta, Utc};

const TOURNAMENT_PREFIX: &str = "tournament_";
const CURRENT_KEY: &str = "current";
const HISTORY_KEY: &str = "history";

/// Completed summaries kept in the history, newest first.
pub const HISTORY_LIMIT: usize = 20;

fn tournament_key(id: TournamentId) -> String {
    format!("{}{}", TOURNAMENT_PREFIX, id)
}

/// Tournament persistence with a "current tournament" pointer and a history of
/// completed tournaments. Owned by the caller; holds no global state.
#[derive(Clone, Debug, Default)]
pub struct TournamentStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> TournamentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `tournament` and make it the current one. Completed tournaments are
    /// also added to the history.
    pub fn save(&mut self, tournament: &Tournament) {
        if let Err(e) = self.try_save(tournament) {
            log::warn!("Failed to save tournament {}: {}", tournament.id, e);
        }
    }

    /// Load by id, or the current tournament when `id` is `None`.
    pub fn load(&self, id: Option<TournamentId>) -> Option<Tournament> {
        let id = match id {
            Some(id) => id,
            None => self.current_id()?,
        };
        match self.try_load(id) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to load tournament {}: {}", id, e);
                None
            }
        }
    }

    /// Remove a stored tournament; clears the current pointer if it pointed there.
    pub fn delete(&mut self, id: TournamentId) {
        if let Err(e) = self.try_delete(id) {
            log::warn!("Failed to delete tournament {}: {}", id, e);
        }
    }

    /// Id the current pointer refers to, if any.
    pub fn current_id(&self) -> Option<TournamentId> {
        let raw = match self.storage.get(CURRENT_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read current tournament pointer: {}", e);
                return None;
            }
        };
        match raw.trim().parse() {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Ignoring corrupt current tournament pointer {:?}: {}", raw, e);
                None
            }
        }
    }

    /// Summaries of completed tournaments, newest first.
    pub fn history(&self) -> Vec<TournamentSummary> {
        match self.try_history() {
            Ok(history) => history,
            Err(e) => {
                log::warn!("Failed to read tournament history: {}", e);
                Vec::new()
            }
        }
    }

    /// Ids of all stored tournaments (any order).
    pub fn tournament_ids(&self) -> Vec<TournamentId> {
        match self.storage.keys() {
            Ok(keys) => keys
                .iter()
                .filter_map(|k| k.strip_prefix(TOURNAMENT_PREFIX))
                .filter_map(|id| id.parse().ok())
                .collect(),
            Err(e) => {
                log::warn!("Failed to list stored tournaments: {}", e);
                Vec::new()
            }
        }
    }

    /// Delete unfinished tournaments idle for longer than `max_idle`. Returns how many
    /// were removed.
    pub fn prune_inactive(&mut self, now: DateTime<Utc>, max_idle: TimeDelta) -> usize {
        let stale: Vec<TournamentId> = self
            .tournament_ids()
            .into_iter()
            .filter(|&id| {
                self.load(Some(id))
                    .is_some_and(|t| !t.completed && now - t.last_activity() > max_idle)
            })
            .collect();
        for &id in &stale {
            self.delete(id);
        }
        stale.len()
    }

    fn try_save(&mut self, tournament: &Tournament) -> Result<(), StorageError> {
        let data = serde_json::to_string(tournament)?;
        self.storage.set(&tournament_key(tournament.id), &data)?;
        self.storage.set(CURRENT_KEY, &tournament.id.to_string())?;
        if let Some(summary) = tournament_summary(tournament) {
            self.push_history(summary)?;
        }
        Ok(())
    }

    fn try_load(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError> {
        match self.storage.get(&tournament_key(id))? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    fn try_delete(&mut self, id: TournamentId) -> Result<(), StorageError> {
        self.storage.remove(&tournament_key(id))?;
        if self.current_id() == Some(id) {
            self.storage.remove(CURRENT_KEY)?;
        }
        Ok(())
    }

    fn try_history(&self) -> Result<Vec<TournamentSummary>, StorageError> {
        match self.storage.get(HISTORY_KEY)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    fn push_history(&mut self, summary: TournamentSummary) -> Result<(), StorageError> {
        // A corrupt history is replaced rather than blocking the save.
        let mut history = self.history();
        history.retain(|s| s.tournament_id != summary.tournament_id);
        history.insert(0, summary);
        history.truncate(HISTORY_LIMIT);
        let data = serde_json::to_string(&history)?;
        self.storage.set(HISTORY_KEY, &data)
    }
}
