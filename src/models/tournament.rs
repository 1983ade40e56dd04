//! Tournament, BattleRecord and TournamentError.

use crate::models::battle::BattleMatch;
use crate::models::candidate::{Candidate, CandidateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 4 candidates.
    TooFewCandidates { count: usize },
    /// Candidate count is odd.
    OddCandidateCount { count: usize },
    /// The same candidate id appears more than once.
    DuplicateCandidate(CandidateId),
    /// Tournament is completed or has no battle to play.
    NoCurrentBattle,
    /// Winner is not one of the current battle's contestants.
    InvalidWinner(CandidateId),
}

impl TournamentError {
    /// Candidate list rejected at creation; the caller should ask for a new list.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            TournamentError::TooFewCandidates { .. }
                | TournamentError::OddCandidateCount { .. }
                | TournamentError::DuplicateCandidate(_)
        )
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::TooFewCandidates { .. } => {
                write!(f, "Tournament requires at least {} movies", MIN_CANDIDATES)
            }
            TournamentError::OddCandidateCount { .. } => {
                write!(f, "Tournament requires an even number of movies")
            }
            TournamentError::DuplicateCandidate(_) => write!(f, "All movies must be unique"),
            TournamentError::NoCurrentBattle => write!(f, "No battle is waiting for a winner"),
            TournamentError::InvalidWinner(_) => {
                write!(f, "Winner must be one of the two movies in the current battle")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Smallest bracket that can be created.
pub const MIN_CANDIDATES: usize = 4;

/// Title used when the caller gives none.
pub const DEFAULT_TITLE: &str = "Movie Battle";

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// One winner-recording call: the resolved battle and when it was recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub battle: BattleMatch,
    pub recorded_at: DateTime<Utc>,
}

/// Full tournament state. Transitions return a new value (see `logic::bracket`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub title: String,
    /// Entry list in shuffled order.
    pub candidates: Vec<Candidate>,
    /// Every battle created so far, all rounds, in creation order.
    pub battles: Vec<BattleMatch>,
    /// Index into `battles` of the next battle awaiting a winner.
    pub current_battle_index: usize,
    pub current_round: u32,
    pub champion: Option<Candidate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Decisive battles needed: candidates - 1.
    pub total_battles: usize,
    pub battle_history: Vec<BattleRecord>,
}

impl Tournament {
    /// Unfinished tournament over already shuffled candidates, with round 1 laid out.
    /// Validation is the caller's job (see `logic::create_tournament`).
    pub(crate) fn with_candidates(
        candidates: Vec<Candidate>,
        title: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let battles = candidates
            .chunks_exact(2)
            .enumerate()
            .map(|(position, pair)| {
                BattleMatch::new(1, position as u32, pair[0].clone(), pair[1].clone())
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            title,
            total_battles: candidates.len().saturating_sub(1),
            candidates,
            battles,
            current_battle_index: 0,
            current_round: 1,
            champion: None,
            completed: false,
            created_at,
            completed_at: None,
            battle_history: Vec::new(),
        }
    }

    /// Completed battles that were real decisions (byes excluded).
    pub fn decisive_battle_count(&self) -> usize {
        self.battles.iter().filter(|b| b.is_decisive()).count()
    }

    /// Battles belonging to `round`, in creation order.
    pub fn battles_in_round(&self, round: u32) -> impl Iterator<Item = &BattleMatch> {
        self.battles.iter().filter(move |b| b.round == round)
    }

    /// Last time a winner was recorded, or creation time if none yet.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.battle_history
            .last()
            .map(|r| r.recorded_at)
            .unwrap_or(self.created_at)
    }
}
