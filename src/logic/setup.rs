//! Setup: validate the candidate list and build round 1 of a new tournament.

use crate::models::{Candidate, Tournament, TournamentError, DEFAULT_TITLE, MIN_CANDIDATES};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of `validate_tournament_movies` (API / display shape).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check a candidate list: at least 4, even count, unique ids (in that order).
pub fn validate_candidates(candidates: &[Candidate]) -> Result<(), TournamentError> {
    let count = candidates.len();
    if count < MIN_CANDIDATES {
        return Err(TournamentError::TooFewCandidates { count });
    }
    if count % 2 != 0 {
        return Err(TournamentError::OddCandidateCount { count });
    }
    let mut seen = HashSet::with_capacity(count);
    for c in candidates {
        if !seen.insert(c.id.as_str()) {
            return Err(TournamentError::DuplicateCandidate(c.id.clone()));
        }
    }
    Ok(())
}

/// Same check as `validate_candidates`, as a `{valid, error}` value.
pub fn validate_tournament_movies(candidates: &[Candidate]) -> ValidationResult {
    match validate_candidates(candidates) {
        Ok(()) => ValidationResult {
            valid: true,
            error: None,
        },
        Err(e) => ValidationResult {
            valid: false,
            error: Some(e.to_string()),
        },
    }
}

/// Create a tournament: validate, shuffle, pair into round 1.
pub fn create_tournament(
    candidates: Vec<Candidate>,
    title: Option<&str>,
) -> Result<Tournament, TournamentError> {
    create_tournament_with(candidates, title, &mut rand::thread_rng(), Utc::now())
}

/// `create_tournament` with the shuffle RNG and creation time supplied by the caller.
pub fn create_tournament_with<R: Rng + ?Sized>(
    mut candidates: Vec<Candidate>,
    title: Option<&str>,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Tournament, TournamentError> {
    validate_candidates(&candidates)?;
    candidates.shuffle(rng);

    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();
    let tournament = Tournament::with_candidates(candidates, title, now);
    log::debug!(
        "Created tournament {} with {} candidates",
        tournament.id,
        tournament.candidates.len()
    );
    Ok(tournament)
}
