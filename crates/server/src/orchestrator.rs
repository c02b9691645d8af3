//! # Recommendation Orchestrator
//!
//! This module coordinates one recommendation request:
//! 1. Resolve the selected title to its catalog row
//! 2. Pick the k nearest neighbours from the similarity matrix
//! 3. Fetch display metadata for every neighbour concurrently
//! 4. Return the neighbours in rank order, enriched with metadata
//!
//! Metadata failures never fail the request; the provider substitutes
//! placeholder details.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, instrument};

use data_loader::{DataIndex, MovieId};
use sources::{Candidate, SimilaritySource};
use tmdb_client::{MetadataProvider, MovieDetails};

use crate::error::RecommendError;
use crate::render;

/// Largest k accepted, which also bounds concurrent metadata fetches
pub const MAX_K: usize = 50;

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub movie_id: MovieId,
    /// Title as written in the local catalog
    pub catalog_title: String,
    pub score: f32,
    pub details: MovieDetails,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    data_index: Arc<DataIndex>,
    similarity: SimilaritySource,
    metadata: Arc<dyn MetadataProvider>,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator
    ///
    /// # Arguments
    /// * `data_index` - Shared reference to the loaded catalog and matrix
    /// * `metadata` - Where card metadata comes from (TMDB in production)
    pub fn new(data_index: Arc<DataIndex>, metadata: Arc<dyn MetadataProvider>) -> Self {
        let similarity = SimilaritySource::new(data_index.clone());
        Self {
            data_index,
            similarity,
            metadata,
        }
    }

    pub fn data_index(&self) -> &Arc<DataIndex> {
        &self.data_index
    }

    /// Main entry point: movies similar to `title`, best first
    ///
    /// # Arguments
    /// * `title` - Exact catalog title of the selected movie
    /// * `k` - Number of recommendations (clamped to catalog size - 1)
    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        title: &str,
        k: usize,
    ) -> Result<Vec<MovieRecommendation>, RecommendError> {
        let start_time = Instant::now();

        if k > MAX_K {
            return Err(RecommendError::InvalidLimit { k, max: MAX_K });
        }

        let candidates = self
            .similarity
            .similar_to_title(title, k)
            .ok_or_else(|| RecommendError::MovieNotFound(title.to_string()))?;
        debug!("Selected {} neighbours", candidates.len());

        let details = self.fetch_details(&candidates).await;
        let recommendations = self.assemble(candidates, details);

        info!(
            "Recommended {} movies for {:?} in {:.2?}",
            recommendations.len(),
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Recommendations rendered as the card HTML fragment.
    ///
    /// Unknown titles render the "Movie not found." paragraph instead of
    /// failing.
    pub async fn recommend_html(&self, title: &str, k: usize) -> Result<String, RecommendError> {
        match self.recommend(title, k).await {
            Ok(recommendations) => Ok(render::render_cards(&recommendations)),
            Err(RecommendError::MovieNotFound(_)) => Ok(render::NOT_FOUND_HTML.to_string()),
            Err(e) => Err(e),
        }
    }

    /// Fetch metadata for all candidates at once, keeping their order
    async fn fetch_details(&self, candidates: &[Candidate]) -> Vec<MovieDetails> {
        let fetches = candidates
            .iter()
            .map(|candidate| self.metadata.fetch_movie_details(candidate.movie_id));
        join_all(fetches).await
    }

    /// Pair candidates with their metadata
    fn assemble(
        &self,
        candidates: Vec<Candidate>,
        details: Vec<MovieDetails>,
    ) -> Vec<MovieRecommendation> {
        candidates
            .into_iter()
            .zip(details)
            .enumerate()
            .map(|(i, (candidate, details))| MovieRecommendation {
                rank: i + 1,
                movie_id: candidate.movie_id,
                catalog_title: self
                    .data_index
                    .get_movie(candidate.row)
                    .map(|m| m.title.clone())
                    .unwrap_or_default(),
                score: candidate.score,
                details,
            })
            .collect()
    }
}
