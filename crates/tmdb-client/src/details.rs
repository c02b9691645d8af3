//! Movie details as shown on a recommendation card, and the conversion
//! from TMDB's `/movie/{id}` response.

use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "Unknown";
const NO_YEAR: &str = "N/A";
const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch?v=";

/// Display metadata for one movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub movie_id: u32,
    /// Absolute poster URL (placeholder when TMDB has none)
    pub poster: String,
    pub title: String,
    /// Vote average rounded to one decimal
    pub rating: f64,
    /// Release year, or "N/A"
    pub year: String,
    /// Comma-separated genre names, or "Unknown"
    pub genres: String,
    /// YouTube trailer link, when TMDB lists one
    pub trailer: Option<String>,
}

impl MovieDetails {
    /// Details used when the real ones cannot be fetched
    pub fn placeholder(movie_id: u32, poster: &str) -> Self {
        Self {
            movie_id,
            poster: poster.to_string(),
            title: UNKNOWN.to_string(),
            rating: 0.0,
            year: NO_YEAR.to_string(),
            genres: UNKNOWN.to_string(),
            trailer: None,
        }
    }

    /// Map a TMDB response onto card fields
    pub(crate) fn from_tmdb(
        movie_id: u32,
        movie: TmdbMovie,
        image_base: &str,
        placeholder_poster: &str,
    ) -> Self {
        let poster = match movie.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}", image_base, path),
            _ => placeholder_poster.to_string(),
        };

        let title = movie.title.unwrap_or_else(|| UNKNOWN.to_string());

        let rating = round_one_decimal(movie.vote_average.unwrap_or(0.0));

        let year = movie
            .release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .unwrap_or(NO_YEAR)
            .to_string();

        let genres = movie
            .genres
            .unwrap_or_default()
            .into_iter()
            .filter_map(|g| g.name)
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let genres = if genres.is_empty() {
            UNKNOWN.to_string()
        } else {
            genres
        };

        let trailer = movie
            .videos
            .and_then(|v| v.results)
            .unwrap_or_default()
            .into_iter()
            .find(|video| {
                video.site.as_deref() == Some("YouTube") && video.kind.as_deref() == Some("Trailer")
            })
            .and_then(|video| video.key)
            .filter(|key| !key.is_empty())
            .map(|key| format!("{}{}", YOUTUBE_WATCH, key));

        Self {
            movie_id,
            poster,
            title,
            rating,
            year,
            genres,
            trailer,
        }
    }
}

/// Round to one decimal the way the rating is displayed: on the exact
/// binary value, ties to even (8.45 -> 8.4, 7.25 -> 7.2).
fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    format!("{:.1}", value).parse().unwrap_or(0.0)
}

// TMDB wire format. Every field is optional: TMDB returns nulls freely.

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbMovie {
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub genres: Option<Vec<TmdbGenre>>,
    pub videos: Option<TmdbVideos>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbGenre {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbVideos {
    pub results: Option<Vec<TmdbVideo>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbVideo {
    pub key: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMG: &str = "https://image.tmdb.org/t/p/w500";
    const PLACEHOLDER: &str = "https://via.placeholder.com/200x300?text=No+Image";

    fn convert(json: &str) -> MovieDetails {
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        MovieDetails::from_tmdb(550, movie, IMG, PLACEHOLDER)
    }

    #[test]
    fn test_full_response() {
        let details = convert(
            r#"{
                "title": "Fight Club",
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "vote_average": 8.433,
                "release_date": "1999-10-15",
                "genres": [{"id": 18, "name": "Drama"}, {"id": 53, "name": "Thriller"}],
                "videos": {"results": [
                    {"key": "abc", "site": "YouTube", "type": "Featurette"},
                    {"key": "SUXWAEX2jlg", "site": "YouTube", "type": "Trailer"}
                ]}
            }"#,
        );

        assert_eq!(details.poster, format!("{}/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg", IMG));
        assert_eq!(details.title, "Fight Club");
        assert_eq!(details.rating, 8.4);
        assert_eq!(details.year, "1999");
        assert_eq!(details.genres, "Drama, Thriller");
        assert_eq!(
            details.trailer.as_deref(),
            Some("https://www.youtube.com/watch?v=SUXWAEX2jlg")
        );
    }

    #[test]
    fn test_missing_and_null_fields_fall_back() {
        let details = convert(
            r#"{"title": null, "poster_path": null, "vote_average": null,
                "release_date": "", "genres": []}"#,
        );

        assert_eq!(details.poster, PLACEHOLDER);
        assert_eq!(details.title, "Unknown");
        assert_eq!(details.rating, 0.0);
        assert_eq!(details.year, "N/A");
        assert_eq!(details.genres, "Unknown");
        assert_eq!(details.trailer, None);
    }

    #[test]
    fn test_empty_title_is_kept() {
        let details = convert(r#"{"title": "", "vote_average": 8.45}"#);
        assert_eq!(details.title, "");
        assert_eq!(details.rating, 8.4);
    }

    #[test]
    fn test_empty_object() {
        let details = convert("{}");
        assert_eq!(details, MovieDetails::placeholder(550, PLACEHOLDER));
    }

    #[test]
    fn test_rating_rounding() {
        assert_eq!(round_one_decimal(7.25), 7.2);
        assert_eq!(round_one_decimal(8.45), 8.4);
        assert_eq!(round_one_decimal(6.35), 6.3);
        assert_eq!(round_one_decimal(7.26), 7.3);
        assert_eq!(round_one_decimal(6.04), 6.0);
        assert_eq!(round_one_decimal(f64::NAN), 0.0);
    }
}
