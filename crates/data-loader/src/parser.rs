//! Parsers for the exported catalog and similarity matrix.
//!
//! Supported inputs:
//! - `movies.dat`: `movie_id::title`, one movie per line
//! - `movies.json`: column-oriented dict (`{"movie_id": {"0": ..}, "title": {"0": ..}}`)
//! - `similarity.bin`: little-endian `f32`, row-major, `n * n` values
//! - `similarity.csv`: one matrix row per line, comma or whitespace separated
//!
//! Rust concepts you'll see here:
//! - Error handling with `?` and `ok_or_else`
//! - Converting bytes to numbers with `f32::from_le_bytes`
//! - Parallel parsing with Rayon's `par_iter` collecting into `Result`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file, turning "not found" into a `FileNotFound` error
fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = read_file(path)?;
    String::from_utf8(bytes).map_err(|e| DataLoadError::InvalidValue {
        field: file_name(path),
        value: format!("not valid UTF-8: {}", e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// =============================================================================
// Catalog
// =============================================================================

/// Parse a `movie_id::title` catalog
pub fn parse_movies_dat(path: &Path) -> Result<Vec<Movie>> {
    let content = read_text(path)?;
    let file = file_name(path);
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split("::");

        let movie_id = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: "Missing movieId".to_string(),
        })?;

        let title = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: "Missing title".to_string(),
        })?;

        if parts.next().is_some() {
            return Err(DataLoadError::ParseError {
                file,
                line: line_no,
                reason: "Too many fields, expected movie_id::title".to_string(),
            });
        }

        let movie = Movie {
            row: movies.len(),
            movie_id: movie_id
                .trim()
                .parse()
                .map_err(|e| DataLoadError::ParseError {
                    file: file.clone(),
                    line: line_no,
                    reason: format!("Invalid movieId: {}", e),
                })?,
            title: title.to_string(),
        };

        movies.push(movie);
    }

    Ok(movies)
}

/// Column-oriented catalog as written by `DataFrame.to_dict()`.
///
/// Unknown columns (tags, overview, ...) are ignored by serde.
#[derive(Debug, Deserialize)]
struct ColumnarCatalog {
    movie_id: HashMap<String, MovieId>,
    title: HashMap<String, String>,
}

/// Parse the column-oriented JSON catalog
pub fn parse_movies_json(path: &Path) -> Result<Vec<Movie>> {
    let bytes = read_file(path)?;
    parse_movies_json_bytes(&bytes)
}

fn parse_movies_json_bytes(bytes: &[u8]) -> Result<Vec<Movie>> {
    let mut catalog: ColumnarCatalog = serde_json::from_slice(bytes)?;

    if catalog.movie_id.len() != catalog.title.len() {
        return Err(DataLoadError::DimensionMismatch {
            what: "catalog columns".to_string(),
            expected: catalog.movie_id.len(),
            found: catalog.title.len(),
        });
    }

    // Row order is the numeric order of the pandas index keys
    let mut keys: Vec<(usize, String)> = catalog
        .movie_id
        .keys()
        .map(|k| {
            k.parse::<usize>()
                .map(|n| (n, k.clone()))
                .map_err(|_| DataLoadError::InvalidValue {
                    field: "index".to_string(),
                    value: k.clone(),
                })
        })
        .collect::<Result<_>>()?;
    keys.sort_unstable_by_key(|(n, _)| *n);

    let mut movies = Vec::with_capacity(keys.len());
    for (row, (_, key)) in keys.into_iter().enumerate() {
        let title = catalog
            .title
            .remove(&key)
            .ok_or_else(|| DataLoadError::ValidationError(format!(
                "title column has no entry for index {}",
                key
            )))?;
        movies.push(Movie {
            row,
            movie_id: catalog.movie_id[&key],
            title,
        });
    }

    Ok(movies)
}

// =============================================================================
// Similarity matrix
// =============================================================================

/// Parse a raw little-endian `f32` matrix.
///
/// The side length is inferred from the byte count, which must describe a
/// square matrix.
pub fn parse_similarity_bin(path: &Path) -> Result<SimilarityMatrix> {
    let bytes = read_file(path)?;
    parse_similarity_bin_bytes(&bytes)
}

fn parse_similarity_bin_bytes(bytes: &[u8]) -> Result<SimilarityMatrix> {
    if bytes.len() % 4 != 0 {
        return Err(DataLoadError::InvalidValue {
            field: "similarity.bin".to_string(),
            value: format!("{} bytes is not a whole number of f32 values", bytes.len()),
        });
    }

    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let found = values.len();
    let size = integer_sqrt(found);
    SimilarityMatrix::from_row_major(size, values).ok_or(DataLoadError::DimensionMismatch {
        what: "similarity.bin (square)".to_string(),
        expected: size * size,
        found,
    })
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Parse a text matrix, one row per line.
///
/// Rows are parsed in parallel; blank lines are skipped.
pub fn parse_similarity_csv(path: &Path) -> Result<SimilarityMatrix> {
    let content = read_text(path)?;
    parse_similarity_text(&content, &file_name(path))
}

fn parse_similarity_text(content: &str, file: &str) -> Result<SimilarityMatrix> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let rows: Vec<Vec<f32>> = lines
        .par_iter()
        .map(|&(line_no, line)| parse_row(line, line_no, file))
        .collect::<Result<_>>()?;

    let size = rows.len();
    if let Some((line_no, row)) = lines
        .iter()
        .zip(&rows)
        .map(|(&(line_no, _), row)| (line_no, row))
        .find(|(_, row)| row.len() != size)
    {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Expected {} values but found {}", size, row.len()),
        });
    }

    SimilarityMatrix::from_rows(rows).ok_or_else(|| {
        DataLoadError::ValidationError(format!("{} is not a square matrix", file))
    })
}

fn parse_row(line: &str, line_no: usize, file: &str) -> Result<Vec<f32>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|value| {
            value.parse::<f32>().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid score {:?}: {}", value, e),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_movies_dat() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "19995::Avatar").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "285::Pirates of the Caribbean: At World's End").unwrap();

        let movies = parse_movies_dat(file.path()).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].movie_id, 19995);
        assert_eq!(movies[0].row, 0);
        assert_eq!(movies[1].title, "Pirates of the Caribbean: At World's End");
        assert_eq!(movies[1].row, 1);
    }

    #[test]
    fn test_parse_movies_dat_rejects_bad_id() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "abc::Avatar").unwrap();

        let err = parse_movies_dat(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movies_dat(Path::new("/definitely/not/here.dat")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_movies_json_orders_by_index() {
        let json = br#"{
            "movie_id": {"10": 3, "2": 2, "0": 1},
            "title": {"0": "Avatar", "2": "Spectre", "10": "Tangled"},
            "tags": {"0": "x", "2": "y", "10": "z"}
        }"#;

        let movies = parse_movies_json_bytes(json).unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Avatar", "Spectre", "Tangled"]);
        assert_eq!(movies[2].movie_id, 3);
        assert_eq!(movies[2].row, 2);
    }

    #[test]
    fn test_parse_movies_json_column_mismatch() {
        let json = br#"{"movie_id": {"0": 1, "1": 2}, "title": {"0": "Avatar"}}"#;
        assert!(matches!(
            parse_movies_json_bytes(json),
            Err(DataLoadError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_similarity_bin() {
        let values = [1.0f32, 0.5, 0.5, 1.0];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();

        let matrix = parse_similarity_bin_bytes(&bytes).unwrap();
        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.row(1), &[0.5, 1.0]);
    }

    #[test]
    fn test_parse_similarity_bin_not_square() {
        let bytes: Vec<u8> = [1.0f32, 2.0, 3.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        assert!(parse_similarity_bin_bytes(&bytes).is_err());
        assert!(parse_similarity_bin_bytes(&[0u8; 5]).is_err());
    }

    #[test]
    fn test_parse_similarity_text_mixed_separators() {
        let text = "1.0, 0.2 0.3\n\n0.2,1.0,0.4\n0.3 0.4 1.0\n";
        let matrix = parse_similarity_text(text, "similarity.csv").unwrap();
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.get(1, 2), Some(0.4));
    }

    #[test]
    fn test_parse_similarity_text_ragged_row() {
        let text = "1.0,0.2\n0.2\n";
        let err = parse_similarity_text(text, "similarity.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_integer_sqrt() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(16), 4);
        assert_eq!(integer_sqrt(17), 4);
    }
}
