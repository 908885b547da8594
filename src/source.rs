//! Loading match records from the data file.
//!
//! The cache talks to a [`MatchSource`]; the production source finds the
//! CSV on disk and runs the parser on the blocking pool.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::MatchRecord;
use crate::parse::{parse_matches, ParseError, ParseOptions};

/// Errors raised while loading matches.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Data file {file_name} not found (searched {} locations)", .searched.len())]
    NotFound {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Loader task failed: {0}")]
    Join(String),
}

/// Something that can produce the full list of completed matches.
#[async_trait]
pub trait MatchSource: Send + Sync {
    async fn load(&self) -> Result<Vec<MatchRecord>, SourceError>;
}

/// Where to look for the data file.
#[derive(Debug, Clone)]
pub struct DataLocation {
    /// File name probed in each candidate directory
    pub file_name: String,

    /// Explicit path, tried before any directory probing
    pub path: Option<PathBuf>,

    /// Directory the search starts from
    pub start_dir: PathBuf,

    /// How many parent directories above `start_dir` to probe
    pub search_depth: usize,
}

impl DataLocation {
    /// Candidate paths in probe order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(self.search_depth + 2);
        if let Some(path) = &self.path {
            out.push(path.clone());
        }
        for dir in self.start_dir.ancestors().take(self.search_depth + 1) {
            out.push(dir.join(&self.file_name));
        }
        out
    }

    /// The first candidate that exists as a file.
    pub fn locate(&self) -> Result<PathBuf, SourceError> {
        let candidates = self.candidates();
        match candidates.iter().find(|p| p.is_file()) {
            Some(found) => {
                debug!("Found data file at {:?}", found);
                Ok(found.clone())
            }
            None => Err(SourceError::NotFound {
                file_name: self.file_name.clone(),
                searched: candidates,
            }),
        }
    }
}

/// Read and parse one CSV file.
pub fn load_file(path: &Path, options: &ParseOptions) -> Result<Vec<MatchRecord>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let matches = parse_matches(BufReader::new(file), options)?;
    info!("Loaded {} matches from {:?}", matches.len(), path);
    Ok(matches)
}

/// CSV file on local disk, located on every load.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    location: DataLocation,
    options: ParseOptions,
}

impl CsvFileSource {
    pub fn new(location: DataLocation, options: ParseOptions) -> Self {
        Self { location, options }
    }
}

#[async_trait]
impl MatchSource for CsvFileSource {
    async fn load(&self) -> Result<Vec<MatchRecord>, SourceError> {
        let location = self.location.clone();
        let options = self.options.clone();

        tokio::task::spawn_blocking(move || {
            let path = location.locate()?;
            load_file(&path, &options)
        })
        .await
        .map_err(|e| SourceError::Join(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "competition_code,status,home_team,away_team,fulltime_home,fulltime_away\n\
                       FL1,FINISHED,Stade Brestois 29,FC Nantes,2,0\n\
                       FL1,FINISHED,FC Nantes,Stade Brestois 29,N/A,0\n";

    fn location(dir: &Path, depth: usize) -> DataLocation {
        DataLocation {
            file_name: "matches.csv".to_string(),
            path: None,
            start_dir: dir.to_path_buf(),
            search_depth: depth,
        }
    }

    #[test]
    fn test_candidates_order() {
        let loc = DataLocation {
            path: Some(PathBuf::from("/srv/data.csv")),
            ..location(Path::new("/a/b/c"), 2)
        };
        assert_eq!(
            loc.candidates(),
            vec![
                PathBuf::from("/srv/data.csv"),
                PathBuf::from("/a/b/c/matches.csv"),
                PathBuf::from("/a/b/matches.csv"),
                PathBuf::from("/a/matches.csv"),
            ]
        );
    }

    #[test]
    fn test_locate_in_parent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("backend").join("target");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("matches.csv"), CSV).unwrap();

        let found = location(&nested, 5).locate().unwrap();
        assert_eq!(found, tmp.path().join("matches.csv"));
    }

    #[test]
    fn test_locate_respects_depth() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("matches.csv"), CSV).unwrap();

        let err = location(&nested, 1).locate().unwrap_err();
        match err {
            SourceError::NotFound { searched, .. } => assert_eq!(searched.len(), 2),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let explicit = tmp.path().join("custom.csv");
        std::fs::write(&explicit, CSV).unwrap();
        std::fs::write(tmp.path().join("matches.csv"), "").unwrap();

        let loc = DataLocation {
            path: Some(explicit.clone()),
            ..location(tmp.path(), 0)
        };
        assert_eq!(loc.locate().unwrap(), explicit);
    }

    #[test]
    fn test_csv_source_load() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("matches.csv"), CSV).unwrap();

        let source = CsvFileSource::new(location(tmp.path(), 0), ParseOptions::default());
        let matches = tokio_test::block_on(source.load()).unwrap();
        assert_eq!(matches, vec![MatchRecord::new("Brest", "Nantes", 2, 0)]);
    }

    #[tokio::test]
    async fn test_csv_source_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let source = CsvFileSource::new(location(tmp.path(), 0), ParseOptions::default());
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_csv_source_missing_columns() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("matches.csv"), "home,away\nLens,Nice\n").unwrap();

        let source = CsvFileSource::new(location(tmp.path(), 0), ParseOptions::default());
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(ParseError::MissingColumns(_))));
    }
}
