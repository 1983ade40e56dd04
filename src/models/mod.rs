//! Data structures for movie battles: candidates, battles, tournament state.

mod battle;
mod candidate;
mod tournament;

pub use battle::{BattleId, BattleMatch};
pub use candidate::{Candidate, CandidateId};
pub use tournament::{
    BattleRecord, Tournament, TournamentError, TournamentId, DEFAULT_TITLE, MIN_CANDIDATES,
};
