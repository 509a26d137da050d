//! Read-only tournament sources.
//!
//! The engine never stores anything. It pulls tournaments from a
//! [`TournamentRepository`]:
//! - [`InMemoryRepository`] for callers that already hold the records
//! - [`JsonlRepository`] for a JSON Lines export, one tournament per line

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{sort_by_schedule, Tournament};

/// Errors that can occur while loading tournaments.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Source of tournament records. Every method returns tournaments in
/// ascending scheduled order.
pub trait TournamentRepository {
    /// Every stored tournament.
    fn all_tournaments(&self) -> Result<Vec<Tournament>, StorageError>;

    /// Tournaments counting towards `season`.
    fn tournaments_by_season(&self, season: i32) -> Result<Vec<Tournament>, StorageError> {
        let mut tournaments = self.all_tournaments()?;
        tournaments.retain(|t| t.info.season == season);
        Ok(tournaments)
    }

    /// Tournaments scheduled strictly between `from` and `to`.
    fn tournaments_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Tournament>, StorageError> {
        let mut tournaments = self.all_tournaments()?;
        tournaments.retain(|t| t.info.scheduled.is_some_and(|when| when > from && when < to));
        Ok(tournaments)
    }
}

/// Repository over tournaments already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tournaments: Vec<Tournament>,
}

impl InMemoryRepository {
    pub fn new(mut tournaments: Vec<Tournament>) -> Self {
        sort_by_schedule(&mut tournaments);
        Self { tournaments }
    }
}

impl TournamentRepository for InMemoryRepository {
    fn all_tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        Ok(self.tournaments.clone())
    }
}
