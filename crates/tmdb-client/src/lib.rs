//! Metadata client for The Movie Database (TMDB).
//!
//! This crate fetches the display metadata shown on recommendation cards:
//! - Poster URL, title, rating, release year and genres
//! - A trailer link from the appended `videos` block
//!
//! Fetching never fails from the caller's point of view:
//! [`MetadataProvider::fetch_movie_details`] falls back to placeholder
//! details and logs the cause. Use `try_fetch_movie_details` to see the
//! typed error.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod cache;
pub mod config;
pub mod details;

pub use cache::CachingProvider;
pub use config::TmdbConfig;
pub use details::MovieDetails;

use details::TmdbMovie;

/// Errors that can occur when talking to TMDB
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("No TMDB API key configured")]
    MissingApiKey,

    /// The request URL carries the API key, so it is stripped before the
    /// error is built.
    #[error("HTTP error talking to TMDB: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDB returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Source of per-movie display metadata.
///
/// Implementors only provide `try_fetch_movie_details`; the fallback
/// behaviour is shared.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch details, surfacing any failure
    async fn try_fetch_movie_details(&self, movie_id: u32) -> Result<MovieDetails, TmdbError>;

    /// Details to show when fetching fails
    fn placeholder(&self, movie_id: u32) -> MovieDetails {
        MovieDetails::placeholder(movie_id, config::DEFAULT_PLACEHOLDER_POSTER)
    }

    /// Fetch details, falling back to the placeholder on any failure
    async fn fetch_movie_details(&self, movie_id: u32) -> MovieDetails {
        match self.try_fetch_movie_details(movie_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(movie_id, error = %e, "Falling back to placeholder details");
                self.placeholder(movie_id)
            }
        }
    }
}

/// HTTP client for TMDB's v3 REST API
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Build a client with the configured timeout
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;

        if config.is_offline() {
            warn!("No TMDB API key configured; every card will use placeholder details");
        } else {
            info!(api_base = %config.api_base, "TMDB client ready");
        }

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn try_fetch_movie_details(&self, movie_id: u32) -> Result<MovieDetails, TmdbError> {
        if self.config.is_offline() {
            return Err(TmdbError::MissingApiKey);
        }

        debug!(movie_id, "Fetching movie details from TMDB");
        let response = self
            .http_client
            .get(self.config.movie_url(movie_id))
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
                ("append_to_response", "videos"),
            ])
            .send()
            .await
            .map_err(|e| e.without_url())?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::Status { status, body });
        }

        let movie: TmdbMovie = response.json().await.map_err(|e| e.without_url())?;
        Ok(MovieDetails::from_tmdb(
            movie_id,
            movie,
            &self.config.image_base,
            &self.config.placeholder_poster,
        ))
    }

    fn placeholder(&self, movie_id: u32) -> MovieDetails {
        MovieDetails::placeholder(movie_id, &self.config.placeholder_poster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;

    #[async_trait]
    impl MetadataProvider for AlwaysFails {
        async fn try_fetch_movie_details(&self, _movie_id: u32) -> Result<MovieDetails, TmdbError> {
            Err(TmdbError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_falls_back_to_placeholder() {
        let details = AlwaysFails.fetch_movie_details(7).await;
        assert_eq!(details.movie_id, 7);
        assert_eq!(details.title, "Unknown");
        assert_eq!(details.poster, config::DEFAULT_PLACEHOLDER_POSTER);
    }

    #[tokio::test]
    async fn test_offline_client_skips_network() {
        let client = TmdbClient::new(
            TmdbConfig::new("").with_placeholder_poster("http://localhost/none.png"),
        )
        .unwrap();

        let err = client.try_fetch_movie_details(550).await.unwrap_err();
        assert!(matches!(err, TmdbError::MissingApiKey));

        let details = client.fetch_movie_details(550).await;
        assert_eq!(details.poster, "http://localhost/none.png");
    }
}
