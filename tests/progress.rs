//! Integration tests for progress and champion summary views.

use chrono::{TimeDelta, TimeZone, Utc};
use movie_battle::{
    create_tournament_with, current_battle, record_battle_winner_at, tournament_progress,
    tournament_summary, Candidate, Tournament,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, 21, 0, 0).unwrap()
}

fn tournament(n: usize, seed: u64) -> Tournament {
    let candidates = (0..n)
        .map(|i| Candidate::new(format!("{}", 100 + i), format!("Movie {i}")))
        .collect();
    create_tournament_with(candidates, Some("Friday"), &mut StdRng::seed_from_u64(seed), start())
        .unwrap()
}

/// Record one winner per minute, favouring `favourite` whenever it plays.
fn play(mut t: Tournament, favourite: &str) -> Tournament {
    let mut minute = 0;
    while let Some(b) = current_battle(&t) {
        minute += 1;
        let w = if b.involves(favourite) {
            favourite.to_string()
        } else {
            b.candidate_1.id.clone()
        };
        t = record_battle_winner_at(&t, &w, start() + TimeDelta::minutes(minute)).unwrap();
    }
    t
}

#[test]
fn progress_counts_decisive_battles() {
    let t = tournament(6, 3);
    let p = tournament_progress(&t);
    assert_eq!(p.completed_battles, 0);
    assert_eq!(p.total_battles, 5);
    assert_eq!(p.current_round, 1);
    assert_eq!(p.total_rounds, 3);
    assert_eq!(p.progress_percentage, 0);

    let mut t = t;
    for minute in 1..=3 {
        let w = current_battle(&t).unwrap().candidate_1.id.clone();
        t = record_battle_winner_at(&t, &w, start() + TimeDelta::minutes(minute)).unwrap();
    }
    // Round 2 holds a bye which does not count as progress.
    let p = tournament_progress(&t);
    assert_eq!(p.completed_battles, 3);
    assert_eq!(p.current_round, 2);
    assert_eq!(p.progress_percentage, 60);
}

#[test]
fn progress_rounds_to_nearest_percent() {
    let t = tournament(4, 9);
    let w = current_battle(&t).unwrap().candidate_1.id.clone();
    let t = record_battle_winner_at(&t, &w, start()).unwrap();
    assert_eq!(tournament_progress(&t).progress_percentage, 33);
    let w = current_battle(&t).unwrap().candidate_1.id.clone();
    let t = record_battle_winner_at(&t, &w, start()).unwrap();
    assert_eq!(tournament_progress(&t).progress_percentage, 67);
}

#[test]
fn summary_absent_until_completed() {
    let t = tournament(4, 1);
    assert!(tournament_summary(&t).is_none());
}

#[test]
fn summary_traces_champion_path() {
    let t = play(tournament(8, 5), "104");
    let summary = tournament_summary(&t).unwrap();
    assert_eq!(summary.champion.id, "104");
    assert_eq!(summary.title, "Friday");
    assert_eq!(summary.tournament_id, t.id);
    assert_eq!(summary.total_battles, 3);
    assert_eq!(summary.defeated.len(), 3);
    let rounds: Vec<_> = summary.battle_path.iter().map(|s| s.round).collect();
    assert_eq!(rounds, vec![1, 2, 3]);
    assert!(summary.defeated.iter().all(|c| c.id != "104"));
    assert_eq!(summary.duration(), TimeDelta::minutes(7));
    assert_eq!(summary.completed_at, start() + TimeDelta::minutes(7));
}

#[test]
fn summary_path_skips_byes() {
    // With 6 entries the last round-1 winner gets a bye; make that our champion.
    let t = tournament(6, 11);
    let favourite = t.battles[2].candidate_1.id.clone();
    let t = play(t, &favourite);
    let summary = tournament_summary(&t).unwrap();
    assert_eq!(summary.champion.id, favourite);
    assert_eq!(summary.total_battles, 2);
    let rounds: Vec<_> = summary.battle_path.iter().map(|s| s.round).collect();
    assert_eq!(rounds, vec![1, 3]);
    assert_eq!(tournament_progress(&t).progress_percentage, 100);
}

#[test]
fn projections_are_idempotent() {
    let t = play(tournament(10, 2), "100");
    assert_eq!(tournament_progress(&t), tournament_progress(&t));
    assert_eq!(tournament_summary(&t), tournament_summary(&t));
}
