//! Tournament business logic: setup, bracket play, progress and summary views.

mod bracket;
mod progress;
mod setup;

pub use bracket::{current_battle, record_battle_winner, record_battle_winner_at};
pub use progress::{
    total_rounds, tournament_progress, tournament_summary, PathStep, TournamentProgress,
    TournamentSummary,
};
pub use setup::{
    create_tournament, create_tournament_with, validate_candidates, validate_tournament_movies,
    ValidationResult,
};
