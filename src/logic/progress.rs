//! Read-only views over a tournament: progress bar data and the champion summary.

use crate::models::{Candidate, Tournament, TournamentId};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// How far a tournament has got.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentProgress {
    pub completed_battles: usize,
    pub total_battles: usize,
    pub current_round: u32,
    pub total_rounds: u32,
    /// 0..=100, rounded to the nearest integer.
    pub progress_percentage: u32,
}

/// One step on the champion's way to the title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub round: u32,
    pub opponent: Candidate,
}

/// Post-completion report for the champion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub tournament_id: TournamentId,
    pub title: String,
    pub champion: Candidate,
    /// Opponents the champion beat, in battle order.
    pub defeated: Vec<Candidate>,
    pub battle_path: Vec<PathStep>,
    /// Number of battles the champion played (byes excluded).
    pub total_battles: usize,
    pub duration_ms: i64,
    pub completed_at: DateTime<Utc>,
}

impl TournamentSummary {
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.duration_ms)
    }
}

/// Rounds a full bracket of `candidates` entries needs: ceil(log2(n)).
pub fn total_rounds(candidates: usize) -> u32 {
    if candidates < 2 {
        return 0;
    }
    usize::BITS - (candidates - 1).leading_zeros()
}

pub fn tournament_progress(tournament: &Tournament) -> TournamentProgress {
    let completed_battles = tournament.decisive_battle_count();
    let total_battles = tournament.total_battles;
    let progress_percentage = if total_battles == 0 {
        0
    } else {
        (100.0 * completed_battles as f64 / total_battles as f64).round() as u32
    };
    TournamentProgress {
        completed_battles,
        total_battles,
        current_round: tournament.current_round,
        total_rounds: total_rounds(tournament.candidates.len()),
        progress_percentage,
    }
}

/// Champion report, or `None` while the tournament is still running.
///
/// The path is every real battle the champion won, in the order they were created.
pub fn tournament_summary(tournament: &Tournament) -> Option<TournamentSummary> {
    if !tournament.completed {
        return None;
    }
    let champion = tournament.champion.as_ref()?;
    let completed_at = tournament.completed_at?;

    let battle_path: Vec<PathStep> = tournament
        .battles
        .iter()
        .filter(|b| b.is_decisive() && b.won_by(&champion.id))
        .filter_map(|b| {
            b.opponent_of(&champion.id).map(|opponent| PathStep {
                round: b.round,
                opponent: opponent.clone(),
            })
        })
        .collect();
    let defeated = battle_path.iter().map(|s| s.opponent.clone()).collect();

    Some(TournamentSummary {
        tournament_id: tournament.id,
        title: tournament.title.clone(),
        champion: champion.clone(),
        defeated,
        total_battles: battle_path.len(),
        battle_path,
        duration_ms: (completed_at - tournament.created_at).num_milliseconds(),
        completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::total_rounds;

    #[test]
    fn total_rounds_is_ceil_log2() {
        assert_eq!(total_rounds(4), 2);
        assert_eq!(total_rounds(6), 3);
        assert_eq!(total_rounds(8), 3);
        assert_eq!(total_rounds(10), 4);
        assert_eq!(total_rounds(16), 4);
        assert_eq!(total_rounds(1), 0);
    }
}
