//! Tournament model.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{CateringId, LocationId, PlayerId, TournamentId};

/// Reasons a tournament record is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Tournament needs scheduled date")]
    MissingSchedule,

    #[error("Tournament needs a stake")]
    MissingStake,

    #[error("Tournament needs a season")]
    MissingSeason,
}

/// Scheduling and money details of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// When the tournament takes place
    #[serde(default, deserialize_with = "schedule")]
    pub scheduled: Option<DateTime<Utc>>,

    /// Buy-in paid by every player
    #[serde(default)]
    pub stake: i64,

    /// Season (league year) the tournament counts towards
    #[serde(default)]
    pub season: i32,

    /// Host location
    #[serde(default, deserialize_with = "nil_as_none")]
    pub location: Option<LocationId>,

    /// Who brings the food
    #[serde(default, deserialize_with = "nil_as_none")]
    pub catering: Option<CateringId>,
}

/// Exports write an unset date as the year-1 zero time; read it as unscheduled.
fn schedule<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let when = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(when.filter(|w| w.year() > 1))
}

/// The nil UUID means "none".
fn nil_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<Uuid>,
{
    let id = Option::<Uuid>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_nil()).map(T::from))
}

/// Accept `null` wherever an empty collection is meant.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Info {
    /// Create info for a tournament on the given date.
    pub fn new(scheduled: DateTime<Utc>, stake: i64, season: i32) -> Self {
        Self {
            scheduled: Some(scheduled),
            stake,
            season,
            location: None,
            catering: None,
        }
    }
}

/// A player who announced they would not attend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Absentee {
    pub player: PlayerId,
    #[serde(default)]
    pub reason: String,
}

/// A pre-tournament prediction of the finishing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub player: PlayerId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prediction: Vec<PlayerId>,
}

/// A single league tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(rename = "uuid")]
    pub id: TournamentId,

    pub info: Info,

    #[serde(default, deserialize_with = "null_as_default")]
    pub noshows: Vec<Absentee>,

    /// Finishing order, index 0 is the winner
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<PlayerId>,

    #[serde(default)]
    pub played: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub bets: Vec<Bet>,

    /// Eliminating player -> players they knocked out
    #[serde(default, rename = "bountyHunters", deserialize_with = "null_as_default")]
    pub bounty_hunters: BTreeMap<PlayerId, Vec<PlayerId>>,
}

impl Tournament {
    /// Create an unplayed tournament.
    pub fn new(info: Info) -> Self {
        Self {
            id: TournamentId::random(),
            info,
            noshows: Vec::new(),
            result: Vec::new(),
            played: false,
            bets: Vec::new(),
            bounty_hunters: BTreeMap::new(),
        }
    }

    /// Builder method to record the finishing order, which also marks it played.
    pub fn with_result(mut self, result: Vec<PlayerId>) -> Self {
        self.result = result;
        self.played = true;
        self
    }

    /// Builder method to credit knockouts to a player.
    pub fn with_knockouts(mut self, hunter: PlayerId, eliminated: Vec<PlayerId>) -> Self {
        self.bounty_hunters.entry(hunter).or_default().extend(eliminated);
        self
    }

    /// Whether this tournament counts towards statistics.
    ///
    /// It must have been played, have a result and have a date.
    pub fn qualifies(&self) -> bool {
        self.played && !self.result.is_empty() && self.info.scheduled.is_some()
    }

    /// Number of players in the finishing order.
    pub fn field_size(&self) -> usize {
        self.result.len()
    }

    /// Check the fields every stored tournament must have.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.info.scheduled.is_none() {
            return Err(ValidationError::MissingSchedule);
        }
        if self.info.stake == 0 {
            return Err(ValidationError::MissingStake);
        }
        if self.info.season == 0 {
            return Err(ValidationError::MissingSeason);
        }
        Ok(())
    }
}

/// Sort tournaments by scheduled date, keeping the input order for equal dates.
/// Undated tournaments come first.
pub fn sort_by_schedule(tournaments: &mut [Tournament]) {
    tournaments.sort_by_key(|t| t.info.scheduled);
}

/// Tournaments that have been played.
pub fn played(tournaments: &[Tournament]) -> Vec<&Tournament> {
    tournaments.iter().filter(|t| t.played).collect()
}

/// Distinct seasons, ascending.
pub fn seasons(tournaments: &[Tournament]) -> Vec<i32> {
    tournaments
        .iter()
        .map(|t| t.info.season)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Tournaments scheduled in the calendar year `season`, keyed by month (1-12).
pub fn group_by_months(tournaments: &[Tournament], season: i32) -> BTreeMap<u32, Vec<&Tournament>> {
    let mut by_month: BTreeMap<u32, Vec<&Tournament>> = BTreeMap::new();
    for t in tournaments {
        if let Some(when) = t.info.scheduled.filter(|w| w.year() == season) {
            by_month.entry(when.month()).or_default().push(t);
        }
    }
    by_month
}
