//! DataIndex building and validation.
//!
//! Loading is two independent parses (catalog, matrix) that run in
//! parallel, followed by index construction and a shape check.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Catalog file names, in order of preference
const CATALOG_FILES: [&str; 2] = ["movies.dat", "movies.json"];

/// Matrix file names, in order of preference
const MATRIX_FILES: [&str; 2] = ["similarity.bin", "similarity.csv"];

impl DataIndex {
    /// Load the catalog and similarity matrix from a directory
    ///
    /// Steps:
    /// 1. Pick the catalog and matrix files present in `data_dir`
    /// 2. Parse both IN PARALLEL using Rayon
    /// 3. Build the title and id indices
    /// 4. Validate that the matrix matches the catalog
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading recommender data from {:?}", data_dir);

        let catalog_path = pick_file(data_dir, &CATALOG_FILES)?;
        let matrix_path = pick_file(data_dir, &MATRIX_FILES)?;
        debug!(?catalog_path, ?matrix_path, "Selected input files");

        let (movies, similarity) = rayon::join(
            || parse_catalog(&catalog_path),
            || parse_matrix(&matrix_path),
        );
        let movies = movies?;
        let similarity = similarity?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix",
            movies.len(),
            similarity.size(),
            similarity.size()
        );

        Self::from_parts(movies, similarity)
    }

    /// Build an index from already-parsed data.
    ///
    /// Movie rows are renumbered to their position in `movies`.
    pub fn from_parts(mut movies: Vec<Movie>, similarity: SimilarityMatrix) -> Result<Self> {
        for (row, movie) in movies.iter_mut().enumerate() {
            movie.row = row;
        }

        let mut title_index = HashMap::with_capacity(movies.len());
        let mut movie_id_index = HashMap::with_capacity(movies.len());
        for movie in &movies {
            // First occurrence wins for both indices
            title_index.entry(movie.title.clone()).or_insert(movie.row);
            movie_id_index.entry(movie.movie_id).or_insert(movie.row);
        }

        let index = Self {
            movies,
            title_index,
            movie_id_index,
            similarity,
        };
        index.validate()?;
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// The matrix must have exactly one row per catalog movie.
    pub fn validate(&self) -> Result<()> {
        if self.similarity.size() != self.movies.len() {
            return Err(DataLoadError::DimensionMismatch {
                what: "similarity matrix vs catalog".to_string(),
                expected: self.movies.len(),
                found: self.similarity.size(),
            });
        }

        let duplicates = self.movies.len() - self.title_index.len();
        if duplicates > 0 {
            debug!("Catalog has {} duplicate titles; first occurrence is used", duplicates);
        }
        Ok(())
    }
}

fn pick_file(data_dir: &Path, candidates: &[&str]) -> Result<PathBuf> {
    candidates
        .iter()
        .map(|name| data_dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| DataLoadError::FileNotFound {
            path: data_dir
                .join(format!("{{{}}}", candidates.join(",")))
                .display()
                .to_string(),
        })
}

fn parse_catalog(path: &Path) -> Result<Vec<Movie>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parser::parse_movies_json(path),
        _ => parser::parse_movies_dat(path),
    }
}

fn parse_matrix(path: &Path) -> Result<SimilarityMatrix> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("bin") => parser::parse_similarity_bin(path),
        _ => parser::parse_similarity_csv(path),
    }
}
