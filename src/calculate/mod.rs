//! Statistics calculation engine.
//!
//! Computes derived league statistics from tournament results:
//! - Per-player standings and the rankings built on them
//! - Standings combined across seasons
//! - Season leadership periods and month-by-month best/worst players
//! - Season titles
//!
//! Every function recomputes from the tournaments it is given and returns
//! freshly allocated records.

mod leadership;
mod merge;
mod period;
pub mod ranking;
mod standings;
mod titles;

pub use leadership::*;
pub use merge::*;
pub use period::*;
pub use ranking::{first_eligible, rank_all, RankingOrder};
pub use standings::*;
pub use titles::*;

use thiserror::Error;
use tracing::info;

use crate::config::ScoringRules;
use crate::models::{
    seasons, PeriodStats, PlayerStanding, SeasonTitles, StandingsBundle, Tournament, YellowPeriod,
};
use crate::storage::{StorageError, TournamentRepository};

/// Errors surfaced by repository-backed computations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load tournaments: {0}")]
    Storage(#[from] StorageError),
}

/// Entry points for presentation code, reading tournaments from a repository.
pub struct StandingsEngine<R> {
    repository: R,
    rules: ScoringRules,
}

impl<R: TournamentRepository> StandingsEngine<R> {
    pub fn new(repository: R, rules: ScoringRules) -> Self {
        Self { repository, rules }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Raw, unsorted standings for the given tournaments.
    pub fn compute_standings(&self, tournaments: &[Tournament]) -> Vec<PlayerStanding> {
        StandingsBuilder::new(self.rules).build(tournaments)
    }

    /// Leadership periods over the given tournaments.
    pub fn compute_yellow_periods(&self, tournaments: &[Tournament]) -> Vec<YellowPeriod> {
        compute_yellow_periods(tournaments, &self.rules)
    }

    /// Every season with at least one stored tournament, ascending.
    pub fn all_seasons(&self) -> Result<Vec<i32>, EngineError> {
        Ok(seasons(&self.repository.all_tournaments()?))
    }

    /// One season's standings under a single ordering.
    pub fn season_ranking(
        &self,
        season: i32,
        order: RankingOrder,
    ) -> Result<Vec<PlayerStanding>, EngineError> {
        let tournaments = self.repository.tournaments_by_season(season)?;
        Ok(order.sorted(&self.compute_standings(&tournaments)))
    }

    /// Every ordering of one season's standings.
    pub fn season_standings(&self, season: i32) -> Result<StandingsBundle, EngineError> {
        let tournaments = self.repository.tournaments_by_season(season)?;
        let standings = self.compute_standings(&tournaments);
        info!(
            "Season {}: {} players over {} tournaments",
            season,
            standings.len(),
            tournaments.len()
        );

        let winnings = RankingOrder::winnings_for_season(season, &self.rules);
        Ok(rank_all(&standings, winnings))
    }

    /// Standings of several seasons combined, in every ordering.
    ///
    /// Each season is aggregated on its own (so absence penalties and
    /// dropped scores apply per season) before the seasons are combined.
    /// Totals are always ranked with the points tie-break, whatever the seasons.
    pub fn total_standings(&self, seasons: &[i32]) -> Result<StandingsBundle, EngineError> {
        let all = self.repository.all_tournaments()?;

        let per_season: Vec<Vec<PlayerStanding>> = seasons
            .iter()
            .map(|&season| {
                StandingsBuilder::new(self.rules)
                    .build(all.iter().filter(|t| t.info.season == season))
            })
            .collect();

        let combined = combine_all(per_season.iter().map(Vec::as_slice), &self.rules);
        info!(
            "Total standings over {} seasons: {} players",
            seasons.len(),
            combined.len()
        );

        Ok(rank_all(&combined, RankingOrder::Winnings))
    }

    /// Leadership periods and month stats for `seasons`.
    pub fn season_stats(&self, seasons: &[i32]) -> Result<PeriodStats, EngineError> {
        let all = self.repository.all_tournaments()?;
        Ok(compute_season_stats(&all, seasons, &self.rules))
    }

    /// Titles for each of `seasons`.
    pub fn titles(&self, seasons: &[i32]) -> Result<Vec<SeasonTitles>, EngineError> {
        let all = self.repository.all_tournaments()?;
        Ok(compute_titles(&all, seasons, &self.rules))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::storage::InMemoryRepository;
    use pretty_assertions::assert_eq;

    fn engine(tournaments: Vec<Tournament>) -> StandingsEngine<InMemoryRepository> {
        StandingsEngine::new(
            InMemoryRepository::new(tournaments),
            ScoringRules::default(),
        )
    }

    fn two_seasons() -> Vec<Tournament> {
        vec![
            played(date(2012, 3, 2), 2012, &[1, 2, 3]),
            played(date(2012, 3, 9), 2012, &[1, 3, 2]),
            played(date(2013, 3, 1), 2013, &[2, 1, 3]),
            played(date(2013, 3, 8), 2013, &[2, 1]),
        ]
    }

    #[test]
    fn test_all_seasons() {
        assert_eq!(engine(two_seasons()).all_seasons().unwrap(), vec![2012, 2013]);
        assert!(engine(vec![]).all_seasons().unwrap().is_empty());
    }

    #[test]
    fn test_season_standings_bundle() {
        let bundle = engine(two_seasons()).season_standings(2013).unwrap();
        assert_eq!(bundle.by_winnings.len(), 3);
        assert_eq!(bundle.by_winnings[0].player, p(2));
        assert_eq!(bundle.by_winnings[0].winnings, 100);
        assert_eq!(bundle.by_points[0].player, p(2));
        assert_eq!(bundle.by_num_played.last().map(|s| s.player), Some(p(3)));
    }

    #[test]
    fn test_season_standings_empty_season() {
        let bundle = engine(two_seasons()).season_standings(2020).unwrap();
        assert_eq!(bundle, StandingsBundle::default());
    }

    #[test]
    fn test_total_standings_sums_seasons() {
        let bundle = engine(two_seasons()).total_standings(&[2012, 2013]).unwrap();
        let p1 = bundle
            .by_winnings
            .iter()
            .find(|s| s.player == p(1))
            .unwrap();

        assert_eq!(p1.winnings, 200);
        assert_eq!(p1.num_played, 4);
        assert_eq!(p1.num_total, 4);
        assert_eq!(p1.num_wins, 2);
        assert_eq!(p1.results.len(), 4);
        assert_eq!(p1.avg_place, 1.5);
    }

    #[test]
    fn test_season_ranking() {
        let ranked = engine(two_seasons())
            .season_ranking(2012, RankingOrder::AvgPlace)
            .unwrap();
        assert_eq!(ranked[0].player, p(1));
    }

    #[test]
    fn test_season_stats_and_titles() {
        let engine = engine(two_seasons());
        let stats = engine.season_stats(&[2012, 2013]).unwrap();
        assert_eq!(stats.month_stats.len(), 2);
        assert_eq!(stats.yellow_periods.len(), 2);

        let titles = engine.titles(&[2012, 2013]).unwrap();
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].season, 2012);
        assert!(titles[0].champion.is_none());
        assert_eq!(
            titles[1].player_of_the_year.as_ref().map(|t| t.player),
            Some(p(2))
        );
    }

    #[test]
    fn test_engine_yellow_periods() {
        let engine = engine(vec![]);
        let periods = engine.compute_yellow_periods(&two_seasons());
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1].player, p(2));
    }
}
