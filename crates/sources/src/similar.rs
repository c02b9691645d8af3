//! Similarity Source - nearest neighbours from the precomputed matrix
//!
//! ## Algorithm
//! 1. Take the selected movie's row of scores
//! 2. Drop the movie itself
//! 3. Partially partition so the k best scores come first
//! 4. Sort only those k, best first
//!
//! Partitioning keeps selection O(n) for the full row and O(k log k) for
//! the final ordering, instead of sorting all n scores.

use crate::types::Candidate;
use data_loader::DataIndex;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Order two scores so that the higher one comes first.
///
/// NaN sorts after every real value, including negative infinity. This is
/// the opposite of numpy's argsort, which treats NaN as the largest value;
/// a corrupt score must never become the top neighbour.
fn by_score_desc(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

/// Indices of the `k` highest scores, best first, excluding `self_index`.
///
/// - `k` is clamped to `scores.len() - 1`
/// - ties are broken by the lower index
/// - a `self_index` outside the row excludes nothing
pub fn top_k_indices(scores: &[f32], k: usize, self_index: usize) -> Vec<usize> {
    let k = k.min(scores.len().saturating_sub(1));
    if k == 0 {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..scores.len()).filter(|&i| i != self_index).collect();
    let compare = |a: &usize, b: &usize| by_score_desc(scores[*a], scores[*b]).then(a.cmp(b));

    if k < indices.len() {
        indices.select_nth_unstable_by(k - 1, compare);
        indices.truncate(k);
    }
    indices.sort_unstable_by(compare);
    indices
}

/// Generates neighbour candidates from the similarity matrix
#[derive(Clone)]
pub struct SimilaritySource {
    /// Shared reference to the data index (read-only, so no Mutex needed)
    data_index: Arc<DataIndex>,
}

impl SimilaritySource {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self { data_index }
    }

    /// The `k` movies most similar to the movie at `row`.
    ///
    /// Returns an empty list for an unknown row.
    #[instrument(skip(self))]
    pub fn get_candidates(&self, row: usize, k: usize) -> Vec<Candidate> {
        let Some(scores) = self.data_index.similarity_row(row) else {
            debug!("Row {} is outside the catalog", row);
            return Vec::new();
        };

        let candidates: Vec<Candidate> = top_k_indices(scores, k, row)
            .into_iter()
            .filter_map(|j| {
                let movie = self.data_index.get_movie(j)?;
                Some(Candidate::new(j, movie.movie_id, scores[j]))
            })
            .collect();

        debug!("Generated {} similarity candidates", candidates.len());
        candidates
    }

    /// Neighbours of a movie selected by exact title.
    ///
    /// `None` when the title is not in the catalog.
    pub fn similar_to_title(&self, title: &str, k: usize) -> Option<Vec<Candidate>> {
        let movie = self.data_index.find_by_title(title)?;
        Some(self.get_candidates(movie.row, k))
    }

    /// Neighbours for many rows at once, computed in parallel.
    ///
    /// Output order matches `rows`.
    pub fn batch_candidates(&self, rows: &[usize], k: usize) -> Vec<Vec<Candidate>> {
        rows.par_iter()
            .map(|&row| self.get_candidates(row, k))
            .collect()
    }
}
