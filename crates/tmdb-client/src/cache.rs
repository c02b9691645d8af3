//! In-memory memoization of metadata lookups.
//!
//! Only successful lookups are stored, so a movie whose fetch failed
//! (and got placeholder details) is retried on the next request.

use crate::{MetadataProvider, MovieDetails, TmdbError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Wraps a provider with a shared movie-id keyed cache
#[derive(Clone)]
pub struct CachingProvider<P> {
    inner: P,
    cache: Arc<DashMap<u32, MovieDetails>>,
}

impl<P: MetadataProvider> CachingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Number of cached movies
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[async_trait]
impl<P: MetadataProvider> MetadataProvider for CachingProvider<P> {
    async fn try_fetch_movie_details(&self, movie_id: u32) -> Result<MovieDetails, TmdbError> {
        if let Some(hit) = self.cache.get(&movie_id) {
            debug!(movie_id, "Metadata cache hit");
            return Ok(hit.value().clone());
        }

        let details = self.inner.try_fetch_movie_details(movie_id).await?;
        self.cache.insert(movie_id, details.clone());
        Ok(details)
    }

    fn placeholder(&self, movie_id: u32) -> MovieDetails {
        self.inner.placeholder(movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; fails for odd ids
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetadataProvider for CountingProvider {
        async fn try_fetch_movie_details(&self, movie_id: u32) -> Result<MovieDetails, TmdbError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if movie_id % 2 == 1 {
                return Err(TmdbError::Status {
                    status: 404,
                    body: String::new(),
                });
            }
            let mut details = MovieDetails::placeholder(movie_id, "poster");
            details.title = format!("Movie {}", movie_id);
            Ok(details)
        }
    }

    #[tokio::test]
    async fn test_successful_lookups_are_cached() {
        let provider = CachingProvider::new(CountingProvider::default());

        let first = provider.fetch_movie_details(2).await;
        let second = provider.fetch_movie_details(2).await;

        assert_eq!(first, second);
        assert_eq!(first.title, "Movie 2");
        assert_eq!(provider.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = CachingProvider::new(CountingProvider::default());

        let details = provider.fetch_movie_details(3).await;
        provider.fetch_movie_details(3).await;

        assert_eq!(details.title, "Unknown");
        assert_eq!(provider.inner.calls.load(Ordering::SeqCst), 2);
        assert!(provider.is_empty());
    }
}
