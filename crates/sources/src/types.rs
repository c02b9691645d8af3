//! Types shared by the candidate sources.

use data_loader::MovieId;
use serde::Serialize;

/// A neighbour of the selected movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Catalog row of the neighbour
    pub row: usize,
    pub movie_id: MovieId,
    /// Raw similarity score against the selected movie
    pub score: f32,
}

impl Candidate {
    pub fn new(row: usize, movie_id: MovieId, score: f32) -> Self {
        Self {
            row,
            movie_id,
            score,
        }
    }
}

/// How a title matched a search query, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Prefix,
    Substring,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleMatch {
    pub row: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub kind: MatchKind,
}
