//! Best and worst player per calendar month.

use tracing::{debug, warn};

use super::{compute_yellow_periods, RankingOrder, StandingsBuilder};
use crate::config::ScoringRules;
use crate::models::{
    group_by_months, results_equal, MonthStats, PeriodStats, PlayerId, PlayerStanding, Tournament,
};

fn ranked(
    builder: &StandingsBuilder,
    tournaments: &[&Tournament],
    order: RankingOrder,
) -> Vec<PlayerStanding> {
    let mut standings = builder.build(tournaments.iter().copied());
    order.sort(&mut standings);
    standings
}

/// Top player of `month` under `order`.
///
/// When the top two cannot be told apart, both are looked up in a ranking of
/// `year_to_date` and whichever stands higher there wins. If they are still
/// level the lower player id is taken.
fn month_leader(
    builder: &StandingsBuilder,
    month: &[&Tournament],
    year_to_date: &[&Tournament],
    order: RankingOrder,
) -> Option<PlayerId> {
    let standings = ranked(builder, month, order);
    let first = standings.first()?;
    let Some(second) = standings.get(1) else {
        return Some(first.player);
    };
    if !results_equal(&first.results, &second.results) {
        return Some(first.player);
    }

    let tied = [first.player, second.player];
    let expanded = ranked(builder, year_to_date, order);
    let mut candidates = expanded.iter().filter(|s| tied.contains(&s.player));

    match (candidates.next(), candidates.next()) {
        (Some(a), Some(b)) if order.compare(a, b).is_eq() => {
            let pick = a.player.min(b.player);
            warn!(
                "Still tied on {} between {} and {} after year-to-date tie-break, taking {}",
                order, a.player, b.player, pick
            );
            Some(pick)
        }
        (Some(a), _) => Some(a.player),
        (None, _) => Some(first.player),
    }
}

/// Month-by-month best and worst players for the calendar year `season`.
///
/// Only tournaments scheduled in that calendar year are considered; months
/// without a played tournament are left out.
pub fn compute_month_stats(
    tournaments: &[Tournament],
    season: i32,
    rules: &ScoringRules,
) -> Vec<MonthStats> {
    let builder = StandingsBuilder::new(*rules);
    let by_month = group_by_months(tournaments, season);
    let mut stats = Vec::new();

    for (&month, month_tournaments) in &by_month {
        if !month_tournaments.iter().any(|t| t.qualifies()) {
            continue;
        }

        let year_to_date: Vec<&Tournament> = by_month
            .range(..=month)
            .flat_map(|(_, ts)| ts.iter().copied())
            .collect();

        let best = month_leader(
            &builder,
            month_tournaments,
            &year_to_date,
            RankingOrder::BestPlayer,
        );
        let worst = month_leader(
            &builder,
            month_tournaments,
            &year_to_date,
            RankingOrder::WorstPlayer,
        );

        if let (Some(best), Some(worst)) = (best, worst) {
            stats.push(MonthStats {
                year: season,
                month,
                best,
                worst,
            });
        }
    }

    debug!("Computed {} month stats for {}", stats.len(), season);
    stats
}

/// Leadership periods across `seasons` plus month stats for each of them.
pub fn compute_season_stats(
    tournaments: &[Tournament],
    seasons: &[i32],
    rules: &ScoringRules,
) -> PeriodStats {
    let selected: Vec<Tournament> = tournaments
        .iter()
        .filter(|t| seasons.contains(&t.info.season))
        .cloned()
        .collect();

    let month_stats = seasons
        .iter()
        .flat_map(|&season| compute_month_stats(&selected, season, rules))
        .collect();

    PeriodStats {
        yellow_periods: compute_yellow_periods(&selected, rules),
        month_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_months_in_order_and_empty_months_skipped() {
        let ts = vec![
            played(date(2014, 3, 7), 2014, &[2, 1, 3]),
            played(date(2014, 1, 10), 2014, &[1, 2, 3]),
            tournament(date(2014, 2, 7), 2014, &[]),
        ];
        let stats = compute_month_stats(&ts, 2014, &ScoringRules::default());
        assert_eq!(
            stats,
            vec![
                MonthStats {
                    year: 2014,
                    month: 1,
                    best: p(1),
                    worst: p(3),
                },
                MonthStats {
                    year: 2014,
                    month: 3,
                    best: p(2),
                    worst: p(3),
                },
            ]
        );
    }

    #[test]
    fn test_only_calendar_year_counts() {
        let ts = vec![
            played(date(2013, 12, 20), 2014, &[1, 2]),
            played(date(2014, 1, 10), 2014, &[2, 1]),
        ];
        let stats = compute_month_stats(&ts, 2014, &ScoringRules::default());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].best, p(2));
    }

    #[test]
    fn test_month_tie_resolved_by_placement_history() {
        // p1 and p2 both average 1.5 in February; p1 won the bigger field
        let ts = vec![
            played(date(2014, 2, 7), 2014, &[1, 2, 3, 4]),
            played(date(2014, 2, 14), 2014, &[2, 1]),
        ];
        let stats = compute_month_stats(&ts, 2014, &ScoringRules::default());
        assert_eq!(stats[0].best, p(1));
    }

    #[test]
    fn test_month_tie_escalates_to_year_to_date() {
        let ts = vec![
            // January: p2 does better than p1
            played(date(2014, 1, 10), 2014, &[2, 1, 3]),
            // February: p1 and p2 have identical records
            played(date(2014, 2, 7), 2014, &[1, 2, 3]),
            played(date(2014, 2, 14), 2014, &[2, 1, 3]),
        ];
        let stats = compute_month_stats(&ts, 2014, &ScoringRules::default());
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].month, 2);
        assert_eq!(stats[1].best, p(2));
        assert_eq!(stats[1].worst, p(3));
    }

    #[test]
    fn test_worst_tie_escalates_to_year_to_date() {
        let ts = vec![
            // January: p4 finishes last
            played(date(2014, 1, 10), 2014, &[1, 3, 4]),
            // February: p3 and p4 have identical records
            played(date(2014, 2, 7), 2014, &[1, 2, 3, 4]),
            played(date(2014, 2, 14), 2014, &[1, 2, 4, 3]),
        ];
        let stats = compute_month_stats(&ts, 2014, &ScoringRules::default());
        assert_eq!(stats[1].worst, p(4));
    }

    #[test]
    fn test_unresolvable_tie_takes_lower_id() {
        let ts = vec![
            played(date(2014, 2, 7), 2014, &[7, 5]),
            played(date(2014, 2, 14), 2014, &[5, 7]),
        ];
        let stats = compute_month_stats(&ts, 2014, &ScoringRules::default());
        assert_eq!(stats[0].best, p(5));
        assert_eq!(stats[0].worst, p(5));
    }

    #[test]
    fn test_single_player_month() {
        let ts = vec![played(date(2014, 4, 4), 2014, &[9])];
        let stats = compute_month_stats(&ts, 2014, &ScoringRules::default());
        assert_eq!(stats[0].best, p(9));
        assert_eq!(stats[0].worst, p(9));
    }

    #[test]
    fn test_season_stats_filters_seasons() {
        let ts = vec![
            played(date(2013, 5, 3), 2013, &[1, 2]),
            played(date(2014, 5, 2), 2014, &[2, 1]),
            played(date(2014, 6, 6), 2014, &[2, 1]),
        ];
        let stats = compute_season_stats(&ts, &[2014], &ScoringRules::default());
        assert_eq!(stats.month_stats.len(), 2);
        assert!(stats.month_stats.iter().all(|m| m.year == 2014));
        assert_eq!(stats.yellow_periods.len(), 1);
        assert_eq!(stats.yellow_periods[0].player, p(2));
        assert_eq!(stats.yellow_periods[0].from, date(2014, 5, 2));
    }

    #[test]
    fn test_season_stats_empty() {
        let stats = compute_season_stats(&[], &[2014], &ScoringRules::default());
        assert_eq!(stats, PeriodStats::default());
    }
}
