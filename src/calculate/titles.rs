//! Season awards.

use std::collections::BTreeMap;

use tracing::debug;

use super::ranking::{by_avg_place, by_best_player, by_points, first_eligible};
use super::{compute_season_stats, yellow_days_in_season, RankingOrder, StandingsBuilder};
use crate::config::ScoringRules;
use crate::models::{
    AvgPlaceTitle, ChampionTitle, MonthStats, MonthsTitle, PeriodStats, PlayerId,
    PlayerStanding, PointsTitle, SeasonTitles, Tournament, YellowDaysTitle,
};

/// Which end of a ranking breaks a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Top,
    Bottom,
}

/// Sort key for a tied player: eligible first, then nearest to `end`, then id.
fn ranking_key(ranking: &[PlayerStanding], player: PlayerId, end: End) -> (bool, usize, PlayerId) {
    match ranking.iter().position(|s| s.player == player) {
        Some(pos) => {
            let distance = match end {
                End::Top => pos,
                End::Bottom => ranking.len() - 1 - pos,
            };
            (!ranking[pos].enough, distance, player)
        }
        None => (true, usize::MAX, player),
    }
}

/// The player named most often by `pick` across the season's months.
fn most_months<F>(
    months: &[MonthStats],
    season: i32,
    pick: F,
    ranking: &[PlayerStanding],
    end: End,
) -> Option<MonthsTitle>
where
    F: Fn(&MonthStats) -> PlayerId,
{
    let mut counts: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for m in months.iter().filter(|m| m.year == season) {
        *counts.entry(pick(m)).or_insert(0) += 1;
    }

    let max = counts.values().copied().max()?;
    counts
        .into_iter()
        .filter(|&(_, c)| c == max)
        .map(|(player, _)| player)
        .min_by_key(|&player| ranking_key(ranking, player, end))
        .map(|player| MonthsTitle {
            player,
            months: max,
        })
}

/// The player who led the season on winnings for the most days.
fn most_yellow_days(
    stats: &PeriodStats,
    season: i32,
    winnings_ranking: &[PlayerStanding],
) -> Option<YellowDaysTitle> {
    let days = yellow_days_in_season(&stats.yellow_periods, season);
    let max = days.values().copied().max().filter(|&d| d > 0)?;

    days.into_iter()
        .filter(|&(_, d)| d == max)
        .map(|(player, _)| player)
        .min_by_key(|&player| ranking_key(winnings_ranking, player, End::Top))
        .map(|player| YellowDaysTitle { player, days: max })
}

/// Awards for one season.
///
/// `season_tournaments` are the tournaments of that season and `stats` the
/// period stats covering it.
pub fn compute_season_titles(
    season: i32,
    season_tournaments: &[Tournament],
    stats: &PeriodStats,
    rules: &ScoringRules,
) -> SeasonTitles {
    let standings = StandingsBuilder::new(*rules).build(season_tournaments);

    let by_winnings = RankingOrder::winnings_for_season(season, rules).sorted(&standings);
    let by_avg = by_avg_place(&standings);
    let by_pts = by_points(&standings);
    let by_best = by_best_player(&standings);

    SeasonTitles {
        season,
        champion: first_eligible(&by_winnings).map(|s| ChampionTitle {
            player: s.player,
            winnings: s.winnings,
        }),
        avg_place_winner: first_eligible(&by_avg).map(|s| AvgPlaceTitle {
            player: s.player,
            avg_place: s.avg_place,
        }),
        points_winner: first_eligible(&by_pts).map(|s| PointsTitle {
            player: s.player,
            points: s.points,
        }),
        most_yellow_days: most_yellow_days(stats, season, &by_winnings),
        player_of_the_year: most_months(&stats.month_stats, season, |m| m.best, &by_best, End::Top),
        loser_of_the_year: most_months(
            &stats.month_stats,
            season,
            |m| m.worst,
            &by_best,
            End::Bottom,
        ),
    }
}

/// Awards for each of `seasons`, computed from the full tournament list.
pub fn compute_titles(
    tournaments: &[Tournament],
    seasons: &[i32],
    rules: &ScoringRules,
) -> Vec<SeasonTitles> {
    let stats = compute_season_stats(tournaments, seasons, rules);

    seasons
        .iter()
        .map(|&season| {
            let season_tournaments: Vec<Tournament> = tournaments
                .iter()
                .filter(|t| t.info.season == season)
                .cloned()
                .collect();
            let titles = compute_season_titles(season, &season_tournaments, &stats, rules);
            debug!("Computed titles for {}", season);
            titles
        })
        .collect()
}
