//! Core domain types for the recommender dataset.
//!
//! The dataset is two things exported by an offline job:
//! - an ordered movie catalog, whose order defines matrix rows
//! - a dense, square similarity matrix over that catalog
//!
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (MovieId)
//! - Owned storage with borrowed views (`&[f32]` rows)
//! - HashMap secondary indices for O(1) lookups

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// External (TMDB) identifier of a movie
pub type MovieId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Position in the catalog, which is also the movie's row (and column)
    /// in the similarity matrix
    pub row: usize,
    pub movie_id: MovieId,
    pub title: String,
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Dense row-major `size x size` matrix of similarity scores.
///
/// Higher means more similar. The matrix is produced offline and is
/// treated as opaque input: no symmetry or range is assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from row-major values.
    ///
    /// Returns `None` when `values.len() != size * size`.
    pub fn from_row_major(size: usize, values: Vec<f32>) -> Option<Self> {
        if size.checked_mul(size)? != values.len() {
            return None;
        }
        Some(Self { size, values })
    }

    /// Build a matrix from a list of rows, all of which must be `rows.len()` long
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let values = rows.into_iter().flatten().collect();
        Some(Self { size, values })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrow one row of scores.
    ///
    /// Panics if `row >= size`, like slice indexing.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.size;
        &self.values[start..start + self.size]
    }

    /// Score between two rows, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.values[row * self.size + col])
    }
}

// =============================================================================
// DataIndex - catalog + matrix
// =============================================================================

/// Main data structure that holds the catalog, its indices and the matrix.
///
/// Built once at startup and shared read-only (usually behind an `Arc`).
#[derive(Debug)]
pub struct DataIndex {
    pub(crate) movies: Vec<Movie>,
    /// First catalog row for each exact title
    pub(crate) title_index: HashMap<String, usize>,
    pub(crate) movie_id_index: HashMap<MovieId, usize>,
    pub(crate) similarity: SimilarityMatrix,
}

impl DataIndex {
    /// Get a movie by catalog row
    pub fn get_movie(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    /// Get a movie by its external id
    pub fn get_movie_by_id(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movie_id_index
            .get(&movie_id)
            .and_then(|&row| self.movies.get(row))
    }

    /// Exact title lookup.
    ///
    /// When the catalog has duplicate titles the first one wins.
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.title_index
            .get(title)
            .and_then(|&row| self.movies.get(row))
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All titles in catalog order (duplicates included)
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Similarity scores of `row` against every catalog movie
    pub fn similarity_row(&self, row: usize) -> Option<&[f32]> {
        if row >= self.similarity.size() {
            return None;
        }
        Some(self.similarity.row(row))
    }

    /// The whole matrix
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
