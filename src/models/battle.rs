//! BattleMatch: one pairwise contest between two candidates.

use crate::models::candidate::Candidate;
use serde::{Deserialize, Serialize};

/// Identifier of a battle, unique within a tournament (`battle-{round}-{position}`).
pub type BattleId = String;

/// A single battle. A bye holds the same candidate in both slots and is created completed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleMatch {
    pub id: BattleId,
    /// 1-based round number.
    pub round: u32,
    /// 0-based index within the round (display order).
    pub position: u32,
    pub candidate_1: Candidate,
    pub candidate_2: Candidate,
    /// None until decided.
    pub winner: Option<Candidate>,
    pub completed: bool,
}

impl BattleMatch {
    pub fn new(round: u32, position: u32, candidate_1: Candidate, candidate_2: Candidate) -> Self {
        Self {
            id: battle_id(round, position),
            round,
            position,
            candidate_1,
            candidate_2,
            winner: None,
            completed: false,
        }
    }

    /// Automatic advance for `candidate`: both slots filled with it, already won.
    pub fn bye(round: u32, position: u32, candidate: Candidate) -> Self {
        Self {
            id: battle_id(round, position),
            round,
            position,
            candidate_1: candidate.clone(),
            candidate_2: candidate.clone(),
            winner: Some(candidate),
            completed: true,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.candidate_1.is_same(&self.candidate_2)
    }

    /// True if `candidate_id` is one of the two contestants.
    pub fn involves(&self, candidate_id: &str) -> bool {
        self.candidate_1.id == candidate_id || self.candidate_2.id == candidate_id
    }

    /// The contestant facing `candidate_id`, if they are in this battle.
    pub fn opponent_of(&self, candidate_id: &str) -> Option<&Candidate> {
        if self.candidate_1.id == candidate_id {
            Some(&self.candidate_2)
        } else if self.candidate_2.id == candidate_id {
            Some(&self.candidate_1)
        } else {
            None
        }
    }

    /// Decided, with a real opponent.
    pub fn is_decisive(&self) -> bool {
        self.completed && !self.is_bye()
    }

    pub fn won_by(&self, candidate_id: &str) -> bool {
        self.winner.as_ref().is_some_and(|w| w.id == candidate_id)
    }
}

fn battle_id(round: u32, position: u32) -> BattleId {
    format!("battle-{round}-{position}")
}
