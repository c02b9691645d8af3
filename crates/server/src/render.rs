//! HTML rendering for the browser front-end.
//!
//! Everything interpolated into markup goes through [`escape_html`];
//! titles and genres come from external data.

use std::fmt::Write;

use crate::orchestrator::{MovieRecommendation, MAX_K};

pub const NOT_FOUND_HTML: &str = "<p style='color:red;'>Movie not found.</p>";

const PAGE_TITLE: &str = "🎬 Movie Recommender System 🎥";
const PAGE_DESCRIPTION: &str = "Select a movie and see posters of similar movies.";

/// Escape text for use in element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Poster cards in a wrapping flex row
pub fn render_cards(recommendations: &[MovieRecommendation]) -> String {
    let mut html = String::from("<div style='display:flex;flex-wrap:wrap;gap:20px;'>");

    for rec in recommendations {
        let m = &rec.details;
        // Writing to a String cannot fail
        let _ = write!(
            html,
            r#"
        <div style="width:200px;text-align:center;background:#0d1b2a;color:white;
                    padding:10px;border-radius:10px;box-shadow:0 2px 6px rgba(0,0,0,0.3);">
            <img src="{poster}" alt="Poster" style="width:100%;border-radius:8px;">
            <h4 style="margin:10px 0 5px 0;">{title}</h4>
            <p>⭐ {rating:.1} | 📅 {year}</p>
            <p style="font-size:13px;">{genres}</p>"#,
            poster = escape_html(&m.poster),
            title = escape_html(&m.title),
            rating = m.rating,
            year = escape_html(&m.year),
            genres = escape_html(&m.genres),
        );
        if let Some(trailer) = &m.trailer {
            let _ = write!(
                html,
                r#"
            <a href="{}" target="_blank" rel="noopener" style="color:#f9c74f;">▶ Trailer</a>"#,
                escape_html(trailer)
            );
        }
        html.push_str("\n        </div>\n        ");
    }

    html.push_str("</div>");
    html
}

/// Full page: heading, the movie picker and an optional result area
pub fn render_page<'a>(
    titles: impl Iterator<Item = &'a str>,
    selected: Option<&str>,
    k: usize,
    results: Option<&str>,
) -> String {
    let mut options = String::new();
    for title in titles {
        let escaped = escape_html(title);
        let marker = if selected == Some(title) { " selected" } else { "" };
        let _ = writeln!(options, r#"<option value="{0}"{1}>{0}</option>"#, escaped, marker);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Movie Recommender</title>
</head>
<body style="font-family:sans-serif;background:#f4f4f9;margin:0;padding:24px;">
<h1>{PAGE_TITLE}</h1>
<p>{PAGE_DESCRIPTION}</p>
<form method="get" action="/recommend" style="margin-bottom:24px;">
<label for="title">Pick a Movie</label>
<select id="title" name="title">
{options}</select>
<label for="k">How many</label>
<input id="k" name="k" type="number" min="1" max="{MAX_K}" value="{k}">
<button type="submit">Recommend</button>
</form>
<div id="results">{results}</div>
</body>
</html>
"#,
        results = results.unwrap_or(""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmdb_client::MovieDetails;

    fn recommendation(title: &str, trailer: Option<&str>) -> MovieRecommendation {
        MovieRecommendation {
            rank: 1,
            movie_id: 1,
            catalog_title: title.to_string(),
            score: 0.5,
            details: MovieDetails {
                movie_id: 1,
                poster: "https://img.test/p.jpg".to_string(),
                title: title.to_string(),
                rating: 7.0,
                year: "2010".to_string(),
                genres: "Action, Science Fiction".to_string(),
                trailer: trailer.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_card_fields() {
        let html = render_cards(&[recommendation("Inception", None)]);
        assert!(html.contains(r#"<img src="https://img.test/p.jpg" alt="Poster""#));
        assert!(html.contains(r#"<h4 style="margin:10px 0 5px 0;">Inception</h4>"#));
        assert!(html.contains("<p>⭐ 7.0 | 📅 2010</p>"));
        assert!(html.contains("Action, Science Fiction"));
        assert!(!html.contains("Trailer"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_card_escapes_titles_and_links_trailer() {
        let html = render_cards(&[recommendation(
            "<script>alert(1)</script>",
            Some("https://www.youtube.com/watch?v=x&y"),
        )]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"href="https://www.youtube.com/watch?v=x&amp;y""#));
    }

    #[test]
    fn test_empty_cards() {
        assert_eq!(
            render_cards(&[]),
            "<div style='display:flex;flex-wrap:wrap;gap:20px;'></div>"
        );
    }

    #[test]
    fn test_page_marks_selection() {
        let titles = ["Avatar", "Tom & Jerry"];
        let page = render_page(titles.iter().copied(), Some("Tom & Jerry"), 5, Some(NOT_FOUND_HTML));

        assert!(page.contains("Pick a Movie"));
        assert!(page.contains(r#"<option value="Avatar">Avatar</option>"#));
        assert!(page.contains(r#"<option value="Tom &amp; Jerry" selected>Tom &amp; Jerry</option>"#));
        assert!(page.contains(r#"value="5""#));
        assert!(page.contains("Movie not found."));
    }
}
