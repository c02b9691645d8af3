//! Connection settings for the TMDB API.

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/200x300?text=No+Image";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// TMDB client configuration.
///
/// Build with [`TmdbConfig::new`] and adjust with the `with_*` setters.
#[derive(Debug, Clone, PartialEq)]
pub struct TmdbConfig {
    /// v3 API key, sent as the `api_key` query parameter
    pub api_key: String,
    pub api_base: String,
    /// Prefix joined with a movie's `poster_path`
    pub image_base: String,
    /// Poster shown when TMDB has none or cannot be reached
    pub placeholder_poster: String,
    pub language: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            placeholder_poster: DEFAULT_PLACEHOLDER_POSTER.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_image_base(mut self, image_base: impl Into<String>) -> Self {
        self.image_base = image_base.into();
        self
    }

    pub fn with_placeholder_poster(mut self, url: impl Into<String>) -> Self {
        self.placeholder_poster = url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `true` when no API key was configured
    pub fn is_offline(&self) -> bool {
        self.api_key.trim().is_empty()
    }

    /// Endpoint for one movie's details
    pub(crate) fn movie_url(&self, movie_id: u32) -> String {
        format!("{}/movie/{}", self.api_base.trim_end_matches('/'), movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TmdbConfig::new("key");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.language, "en-US");
        assert!(!config.is_offline());
        assert!(TmdbConfig::new("  ").is_offline());
    }

    #[test]
    fn test_movie_url_trims_trailing_slash() {
        let config = TmdbConfig::new("key").with_api_base("http://127.0.0.1:9000/3/");
        assert_eq!(config.movie_url(550), "http://127.0.0.1:9000/3/movie/550");
    }
}
