//! # Sources Crate
//!
//! Candidate generation for "movies like this one" recommendations.
//!
//! ## Components
//!
//! ### Similarity Source
//! Nearest neighbours straight out of the precomputed similarity matrix:
//! - Takes the selected movie's row
//! - Excludes the movie itself
//! - Returns the k best-scoring movies, best first
//!
//! ### Title Search
//! Case-insensitive catalog search, used to find the exact title to
//! recommend from.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{search_titles, SimilaritySource};
//! use data_loader::DataIndex;
//! use std::sync::Arc;
//!
//! let data_index = Arc::new(DataIndex::load_from_files("data".as_ref())?);
//!
//! let hits = search_titles(&data_index, "dark knight", 5);
//! let source = SimilaritySource::new(data_index.clone());
//! let neighbours = source.similar_to_title(&hits[0].title, 5);
//! ```

// Public modules
pub mod types;
pub mod similar;
pub mod search;

// Re-export commonly used types
pub use types::{Candidate, MatchKind, TitleMatch};
pub use similar::{top_k_indices, SimilaritySource};
pub use search::search_titles;
