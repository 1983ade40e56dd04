//! Single-elimination play: current battle lookup, winner recording and round advance.

use crate::models::{BattleMatch, BattleRecord, Candidate, Tournament, TournamentError};
use chrono::{DateTime, Utc};

/// The battle waiting for a winner. `None` if the tournament is over or the next
/// round has not been laid out yet; callers treat that as "wait".
pub fn current_battle(tournament: &Tournament) -> Option<&BattleMatch> {
    if tournament.completed {
        return None;
    }
    tournament.battles.get(tournament.current_battle_index)
}

/// Record the winner of the current battle and return the resulting state.
pub fn record_battle_winner(
    tournament: &Tournament,
    winner_id: &str,
) -> Result<Tournament, TournamentError> {
    record_battle_winner_at(tournament, winner_id, Utc::now())
}

/// `record_battle_winner` with the recording time supplied by the caller.
///
/// The input is left untouched. Byes are skipped here, so every battle returned by
/// `current_battle` afterwards is a real decision and N candidates take N - 1 calls.
pub fn record_battle_winner_at(
    tournament: &Tournament,
    winner_id: &str,
    now: DateTime<Utc>,
) -> Result<Tournament, TournamentError> {
    let battle = current_battle(tournament).ok_or(TournamentError::NoCurrentBattle)?;
    if battle.is_bye() {
        // Passing a bye only moves the pointer; it is not a decision.
        if !battle.involves(winner_id) {
            return Err(TournamentError::InvalidWinner(winner_id.to_string()));
        }
        let mut next = tournament.clone();
        next.current_battle_index += 1;
        skip_byes(&mut next);
        return Ok(next);
    }
    if battle.completed {
        return Err(TournamentError::NoCurrentBattle);
    }
    let winner = if battle.candidate_1.id == winner_id {
        battle.candidate_1.clone()
    } else if battle.candidate_2.id == winner_id {
        battle.candidate_2.clone()
    } else {
        return Err(TournamentError::InvalidWinner(winner_id.to_string()));
    };

    let mut next = tournament.clone();
    let index = next.current_battle_index;
    let resolved = &mut next.battles[index];
    resolved.winner = Some(winner.clone());
    resolved.completed = true;
    let record = BattleRecord {
        battle: resolved.clone(),
        recorded_at: now,
    };
    next.battle_history.push(record);
    next.current_battle_index += 1;

    if next.decisive_battle_count() >= next.total_battles {
        log::info!(
            "Tournament {} won by {} ({})",
            next.id,
            winner.title,
            winner.id
        );
        next.champion = Some(winner);
        next.completed = true;
        next.completed_at = Some(now);
        return Ok(next);
    }

    if round_complete(&next, next.current_round) {
        advance_round(&mut next);
    }
    skip_byes(&mut next);
    Ok(next)
}

fn round_complete(tournament: &Tournament, round: u32) -> bool {
    tournament.battles_in_round(round).all(|b| b.completed)
}

/// Lay out the next round from the winners of the current one, in battle order.
/// With an odd number of winners the last one gets a bye.
fn advance_round(tournament: &mut Tournament) {
    let mut winners: Vec<Candidate> = tournament
        .battles_in_round(tournament.current_round)
        .filter_map(|b| b.winner.clone())
        .collect();
    let round = tournament.current_round + 1;

    let bye = if winners.len() % 2 == 1 {
        winners.pop()
    } else {
        None
    };
    if let Some(candidate) = bye {
        let position = (winners.len() / 2) as u32;
        log::debug!(
            "Round {} bye for {} in tournament {}",
            round,
            candidate.id,
            tournament.id
        );
        tournament
            .battles
            .push(BattleMatch::bye(round, position, candidate));
    }
    let pairs: Vec<BattleMatch> = winners
        .chunks_exact(2)
        .enumerate()
        .map(|(position, pair)| {
            BattleMatch::new(round, position as u32, pair[0].clone(), pair[1].clone())
        })
        .collect();
    log::debug!(
        "Tournament {} advanced to round {} ({} battles)",
        tournament.id,
        round,
        pairs.len()
    );
    tournament.battles.extend(pairs);
    tournament.current_round = round;
}

/// Move the pointer past battles that were created already decided.
fn skip_byes(tournament: &mut Tournament) {
    while tournament
        .battles
        .get(tournament.current_battle_index)
        .is_some_and(|b| b.completed)
    {
        tournament.current_battle_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn c(id: &str) -> Candidate {
        Candidate::new(id, format!("Movie {id}"))
    }

    fn unshuffled(ids: &[&str]) -> Tournament {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 20, 0, 0).unwrap();
        Tournament::with_candidates(ids.iter().map(|id| c(id)).collect(), "Test".into(), start)
    }

    #[test]
    fn advance_round_pairs_winners_in_battle_order() {
        let mut t = unshuffled(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        for (b, w) in t.battles.iter_mut().zip(["a", "d", "e", "h"]) {
            b.winner = Some(c(w));
            b.completed = true;
        }
        advance_round(&mut t);
        let round_2: Vec<_> = t.battles_in_round(2).collect();
        assert_eq!(round_2.len(), 2);
        assert_eq!(round_2[0].candidate_1.id, "a");
        assert_eq!(round_2[0].candidate_2.id, "d");
        assert_eq!(round_2[1].candidate_1.id, "e");
        assert_eq!(round_2[1].candidate_2.id, "h");
        assert_eq!(round_2[1].position, 1);
        assert_eq!(t.current_round, 2);
    }

    #[test]
    fn advance_round_gives_last_winner_the_bye() {
        let mut t = unshuffled(&["a", "b", "c", "d", "e", "f"]);
        for (b, w) in t.battles.iter_mut().zip(["b", "c", "f"]) {
            b.winner = Some(c(w));
            b.completed = true;
        }
        advance_round(&mut t);
        let round_2: Vec<_> = t.battles_in_round(2).collect();
        assert_eq!(round_2.len(), 2);
        assert!(round_2[0].is_bye());
        assert_eq!(round_2[0].candidate_1.id, "f");
        assert_eq!(round_2[0].position, 1);
        assert_eq!(round_2[0].id, "battle-2-1");
        assert!(!round_2[1].is_bye());
        assert_eq!(round_2[1].id, "battle-2-0");
    }

    #[test]
    fn skip_byes_stops_at_first_open_battle() {
        let mut t = unshuffled(&["a", "b", "c", "d"]);
        t.battles[0].completed = true;
        skip_byes(&mut t);
        assert_eq!(t.current_battle_index, 1);
        skip_byes(&mut t);
        assert_eq!(t.current_battle_index, 1);
    }

    /// Six entries with round 1 decided and the pointer parked on the round-2 bye.
    fn parked_on_bye() -> Tournament {
        let mut t = unshuffled(&["a", "b", "c", "d", "e", "f"]);
        for w in ["a", "c", "e"] {
            t = record_battle_winner(&t, w).unwrap();
        }
        let bye_index = t.battles.iter().position(|b| b.is_bye()).unwrap();
        t.current_battle_index = bye_index;
        t
    }

    #[test]
    fn bye_at_pointer_is_passed_by_its_own_candidate() {
        let t = parked_on_bye();
        let bye = current_battle(&t).unwrap().clone();
        assert!(bye.is_bye());
        assert_eq!(bye.candidate_1.id, "e");

        let next = record_battle_winner(&t, "e").unwrap();
        assert_eq!(next.battle_history.len(), t.battle_history.len());
        assert_eq!(next.decisive_battle_count(), 3);
        assert_eq!(next.battles, t.battles);
        let open = current_battle(&next).unwrap();
        assert!(!open.is_bye());
        assert_eq!(open.candidate_1.id, "a");
        assert_eq!(open.candidate_2.id, "c");

        // The rest of the bracket plays out normally: pair, then final.
        let next = record_battle_winner(&next, "c").unwrap();
        let next = record_battle_winner(&next, "e").unwrap();
        assert!(next.completed);
        assert_eq!(next.champion.map(|c| c.id), Some("e".to_string()));
    }

    #[test]
    fn bye_at_pointer_rejects_other_candidates() {
        let t = parked_on_bye();
        assert_eq!(
            record_battle_winner(&t, "a"),
            Err(TournamentError::InvalidWinner("a".to_string()))
        );
    }
}
