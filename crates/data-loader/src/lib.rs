//! # Data Loader Crate
//!
//! This crate loads the recommender's precomputed inputs: the movie catalog
//! and the movie-to-movie similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, SimilarityMatrix, DataIndex)
//! - **parser**: Parse catalog and matrix files into Rust structs
//! - **index**: Build lookup indices and validate shapes
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data"))?;
//!
//! let avatar = index.find_by_title("Avatar").unwrap();
//! let scores = index.similarity_row(avatar.row).unwrap();
//! println!("{} has {} neighbours", avatar.title, scores.len() - 1);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{DataIndex, Movie, MovieId, SimilarityMatrix};

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(movie_id: MovieId, title: &str) -> Movie {
        Movie {
            row: 0,
            movie_id,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_from_parts_assigns_rows() {
        let movies = vec![movie(10, "Avatar"), movie(20, "Spectre")];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.2], vec![0.2, 1.0]]).unwrap();

        let index = DataIndex::from_parts(movies, matrix).unwrap();
        assert_eq!(index.get_movie(1).unwrap().row, 1);
        assert_eq!(index.get_movie_by_id(20).unwrap().title, "Spectre");
        assert!(index.get_movie(2).is_none());
        assert!(index.similarity_row(2).is_none());
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first_row() {
        let movies = vec![movie(1, "The Host"), movie(2, "Other"), movie(3, "The Host")];
        let matrix = SimilarityMatrix::from_row_major(3, vec![0.0; 9]).unwrap();

        let index = DataIndex::from_parts(movies, matrix).unwrap();
        let found = index.find_by_title("The Host").unwrap();
        assert_eq!(found.row, 0);
        assert_eq!(found.movie_id, 1);
        assert_eq!(index.titles().count(), 3);
    }

    #[test]
    fn test_title_lookup_is_exact() {
        let movies = vec![movie(1, "Avatar")];
        let matrix = SimilarityMatrix::from_row_major(1, vec![1.0]).unwrap();

        let index = DataIndex::from_parts(movies, matrix).unwrap();
        assert!(index.find_by_title("avatar").is_none());
        assert!(index.find_by_title("Avatar ").is_none());
    }

    #[test]
    fn test_matrix_constructors_check_shape() {
        assert!(SimilarityMatrix::from_row_major(2, vec![0.0; 3]).is_none());
        assert!(SimilarityMatrix::from_rows(vec![vec![0.0, 1.0]]).is_none());
        let m = SimilarityMatrix::from_rows(vec![]).unwrap();
        assert_eq!(m.size(), 0);
        assert_eq!(m.get(0, 0), None);
    }
}
