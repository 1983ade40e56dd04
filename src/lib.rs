//! Movie battle web app: library with models, bracket logic and persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    create_tournament, create_tournament_with, current_battle, record_battle_winner,
    record_battle_winner_at, total_rounds, tournament_progress, tournament_summary,
    validate_candidates, validate_tournament_movies, PathStep, TournamentProgress,
    TournamentSummary, ValidationResult,
};
pub use models::{
    BattleId, BattleMatch, BattleRecord, Candidate, CandidateId, Tournament, TournamentError,
    TournamentId, DEFAULT_TITLE, MIN_CANDIDATES,
};
pub use store::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, TournamentStore};
