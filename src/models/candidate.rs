//! Candidate: a catalog title entered into a tournament.

use serde::{Deserialize, Serialize};

/// Stable identifier for a candidate (e.g. a TMDB id rendered as a string).
pub type CandidateId = String;

/// A movie or series taking part in a tournament.
///
/// Only `id` is meaningful to the bracket engine; everything else is display data
/// passed through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    /// Free-form catalog fields (genres, vote average, ...).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Candidate {
    /// Create a candidate with the given id and title. Optional fields start empty.
    pub fn new(id: impl Into<CandidateId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_path: None,
            release_year: None,
            metadata: serde_json::Map::new(),
        }
    }

    pub fn is_same(&self, other: &Candidate) -> bool {
        self.id == other.id
    }
}
