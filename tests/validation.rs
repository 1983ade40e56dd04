//! Integration tests for candidate list validation.

use movie_battle::{validate_candidates, validate_tournament_movies, Candidate, TournamentError};

fn movie(id: &str) -> Candidate {
    Candidate::new(id, format!("Title {id}"))
}

#[test]
fn duplicate_ids_are_rejected() {
    let result = validate_tournament_movies(&[movie("a"), movie("a"), movie("b"), movie("c")]);
    assert!(!result.valid);
    assert_eq!(result.error.as_deref(), Some("All movies must be unique"));
}

#[test]
fn three_movies_are_too_few() {
    let result = validate_tournament_movies(&[movie("a"), movie("b"), movie("c")]);
    assert!(!result.valid);
    assert_eq!(
        result.error.as_deref(),
        Some("Tournament requires at least 4 movies")
    );
}

#[test]
fn odd_count_is_rejected() {
    let list: Vec<_> = ["a", "b", "c", "d", "e"].into_iter().map(movie).collect();
    let result = validate_tournament_movies(&list);
    assert!(!result.valid);
    assert_eq!(
        result.error.as_deref(),
        Some("Tournament requires an even number of movies")
    );
    assert_eq!(
        validate_candidates(&list),
        Err(TournamentError::OddCandidateCount { count: 5 })
    );
}

#[test]
fn size_checks_run_before_uniqueness() {
    // Three copies of one movie: the minimum-size rule is reported.
    assert_eq!(
        validate_candidates(&[movie("a"), movie("a"), movie("a")]),
        Err(TournamentError::TooFewCandidates { count: 3 })
    );
}

#[test]
fn identity_is_by_id_only() {
    let mut twin = movie("b");
    twin.title = "Title a".to_string();
    let result = validate_tournament_movies(&[movie("a"), twin, movie("c"), movie("d")]);
    assert!(result.valid);
    assert!(result.error.is_none());
}

#[test]
fn construction_errors_are_grouped() {
    assert!(TournamentError::TooFewCandidates { count: 0 }.is_construction_error());
    assert!(TournamentError::DuplicateCandidate("x".into()).is_construction_error());
    assert!(!TournamentError::NoCurrentBattle.is_construction_error());
    assert!(!TournamentError::InvalidWinner("x".into()).is_construction_error());
}

#[test]
fn validation_result_serializes_without_null_error() {
    let list: Vec<_> = ["a", "b", "c", "d"].into_iter().map(movie).collect();
    let json = serde_json::to_value(validate_tournament_movies(&list)).unwrap();
    assert_eq!(json, serde_json::json!({ "valid": true }));
}
