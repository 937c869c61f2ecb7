//! Region catalog loading from newline-delimited JSON.
//!
//! Each non-blank line holds one region:
//!
//! ```json
//! {"state": "Colorado", "border": [[-109.05, 41.0], [-102.05, 41.0], ...]}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use geo::Coord;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Region;
use crate::pip::{round_coord, RegionCatalog};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid region record: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: vertex {index} has {len} components, expected 2")]
    Vertex { line: usize, index: usize, len: usize },
}

/// Raw record as it appears in the dataset
#[derive(Debug, Deserialize)]
struct BorderRecord {
    #[serde(default)]
    state: String,
    #[serde(default)]
    border: Vec<Vec<f64>>,
}

/// Load the region catalog from a file on disk
pub fn load_catalog(path: &Path) -> Result<RegionCatalog, LoadError> {
    info!("Loading region boundaries from {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(BufReader::new(file))
}

/// Parse a region catalog from any buffered reader.
///
/// Vertices are rounded to the lookup precision and an explicit closing
/// vertex is removed. Unnamed records are skipped.
pub fn parse_catalog<R: BufRead>(reader: R) -> Result<RegionCatalog, LoadError> {
    let mut regions = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Read {
            line: line_no,
            source,
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let record: BorderRecord =
            serde_json::from_str(&line).map_err(|source| LoadError::Parse {
                line: line_no,
                source,
            })?;

        if record.state.is_empty() {
            warn!(
                "Skipping unnamed region on line {} ({} vertices)",
                line_no,
                record.border.len()
            );
            continue;
        }

        let vertices = ring_vertices(&record.border, line_no)?;

        if vertices.len() < 3 {
            warn!(
                "Region '{}' on line {} has only {} vertices and will never match",
                record.state,
                line_no,
                vertices.len()
            );
        }

        regions.push(Region::new(record.state, vertices));
    }

    info!("Loaded {} region boundaries", regions.len());

    Ok(RegionCatalog::new(regions))
}

/// Round every vertex and drop the closing vertex if the ring repeats its start
fn ring_vertices(border: &[Vec<f64>], line: usize) -> Result<Vec<Coord<f64>>, LoadError> {
    let mut vertices = border
        .iter()
        .enumerate()
        .map(|(index, pair)| match pair.as_slice() {
            [lon, lat] => Ok(round_coord(Coord { x: *lon, y: *lat })),
            _ => Err(LoadError::Vertex {
                line,
                index,
                len: pair.len(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = r#"{"state": "RegionA", "border": [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]}

{"state": "RegionB", "border": [[5.0000001, 5], [15, 5], [15, 15], [5, 15]]}
"#;

    #[test]
    fn test_parse_sample() {
        let catalog = parse_catalog(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(catalog.len(), 2);

        let regions = catalog.regions();
        assert_eq!(regions[0].name, "RegionA");
        // Closing vertex removed
        assert_eq!(regions[0].boundary.len(), 4);
        // Open ring left untouched
        assert_eq!(regions[1].boundary.len(), 4);
        // Rounded to six places
        assert_eq!(regions[1].boundary.vertices()[0], Coord { x: 5.0, y: 5.0 });
    }

    #[test]
    fn test_parsed_catalog_lookup() {
        let catalog = parse_catalog(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(catalog.find_name(Coord { x: 7.0, y: 7.0 }), "RegionA");
        assert_eq!(catalog.find_name(Coord { x: 12.0, y: 12.5 }), "RegionB");
    }

    #[test]
    fn test_unnamed_records_skipped() {
        let input = r#"{"state": "", "border": [[0, 0], [1, 0], [1, 1]]}
{"border": []}
{"state": "Kept", "border": [[0, 0], [1, 0], [1, 1]]}
"#;
        let catalog = parse_catalog(Cursor::new(input)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.regions()[0].name, "Kept");
    }

    #[test]
    fn test_short_border_kept_but_degenerate() {
        let input = r#"{"state": "Tiny", "border": [[0, 0], [1, 1], [0, 0]]}"#;
        let catalog = parse_catalog(Cursor::new(input)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.regions()[0].boundary.is_degenerate());
    }

    #[test]
    fn test_invalid_json_reports_line() {
        let input = "{\"state\": \"Ok\", \"border\": []}\n{not json\n";
        let err = parse_catalog(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_vertex_rejected() {
        let input = r#"{"state": "Odd", "border": [[0, 0], [1, 0, 3], [1, 1]]}"#;
        let err = parse_catalog(Cursor::new(input)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Vertex {
                line: 1,
                index: 1,
                len: 3
            }
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/states.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/states.json"));
    }
}
