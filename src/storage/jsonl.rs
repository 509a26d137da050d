//! JSONL (JSON Lines) tournament export.
//!
//! Each line is a valid JSON object representing one tournament.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{StorageError, TournamentRepository};
use crate::models::{sort_by_schedule, Tournament};

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read all entities from the file, skipping lines that fail to parse.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Tournament repository backed by a JSONL export.
///
/// The file is re-read on every call so each computation sees a fresh snapshot.
#[derive(Debug, Clone)]
pub struct JsonlRepository {
    path: PathBuf,
}

impl JsonlRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TournamentRepository for JsonlRepository {
    fn all_tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        let reader = JsonlReader::<Tournament>::new(self.path.clone());
        let mut tournaments: Vec<Tournament> = reader
            .read_all()?
            .into_iter()
            .filter(|t| match t.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Skipping tournament {}: {}", t.id, e);
                    false
                }
            })
            .collect();

        sort_by_schedule(&mut tournaments);
        Ok(tournaments)
    }
}
