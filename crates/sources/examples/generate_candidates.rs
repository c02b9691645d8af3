//! Example: Find movies similar to a title
//!
//! Run with: cargo run --package sources --example generate_candidates -- "Avatar"
//!
//! This example shows how to:
//! 1. Load the catalog and similarity matrix
//! 2. Resolve a search query to a catalog title
//! 3. Generate the nearest neighbours
//! 4. Display the results

use data_loader::DataIndex;
use sources::{search_titles, SimilaritySource};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "Avatar".to_string());

    println!("=== Similar Movie Candidate Example ===\n");

    println!("Loading data...");
    let start = Instant::now();
    let data_index = Arc::new(DataIndex::load_from_files(Path::new("data"))?);
    println!("Loaded {} movies in {:?}\n", data_index.len(), start.elapsed());

    let hits = search_titles(&data_index, &query, 1);
    let Some(hit) = hits.first() else {
        println!("No title matches {:?}", query);
        return Ok(());
    };
    println!("Selected: {} (TMDB id {})\n", hit.title, hit.movie_id);

    let source = SimilaritySource::new(data_index.clone());
    let start = Instant::now();
    let candidates = source.get_candidates(hit.row, 10);
    println!("Generated {} candidates in {:?}", candidates.len(), start.elapsed());

    for (i, candidate) in candidates.iter().enumerate() {
        if let Some(movie) = data_index.get_movie(candidate.row) {
            println!("  {:2}. {} (score: {:.3})", i + 1, movie.title, candidate.score);
        }
    }

    Ok(())
}
