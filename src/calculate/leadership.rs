//! Season leadership ("yellow jersey") tracking.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::{RankingOrder, StandingsBuilder};
use crate::config::ScoringRules;
use crate::models::{PlayerId, Tournament, YellowPeriod};

/// Who led the season on winnings after each tournament, as contiguous periods.
///
/// Tournaments are processed in scheduled order. Leadership starts from
/// scratch with the first tournament of every season. The last period is
/// left active.
pub fn compute_yellow_periods(tournaments: &[Tournament], rules: &ScoringRules) -> Vec<YellowPeriod> {
    let mut ordered: Vec<&Tournament> = tournaments.iter().collect();
    ordered.sort_by_key(|t| t.info.scheduled);

    let builder = StandingsBuilder::new(*rules);
    let mut periods = Vec::new();
    let mut current: Option<YellowPeriod> = None;
    let mut season: Option<i32> = None;
    let mut season_start = 0;

    for (i, t) in ordered.iter().enumerate() {
        let Some(when) = t.info.scheduled.filter(|_| t.qualifies()) else {
            continue;
        };

        if season != Some(t.info.season) {
            season = Some(t.info.season);
            season_start = i;
        }

        let standings = builder.build(ordered[season_start..=i].iter().copied());
        let order = RankingOrder::winnings_for_season(t.info.season, rules);
        let Some(leader) = standings
            .iter()
            .min_by(|a, b| order.compare(a, b))
            .map(|s| s.player)
        else {
            continue;
        };

        current = match current.take() {
            None => Some(YellowPeriod::start(leader, when)),
            Some(mut period) if period.player == leader => {
                period.to = when;
                Some(period)
            }
            Some(mut period) => {
                debug!("Lead passes from {} to {} on {}", period.player, leader, when);
                period.close(when);
                periods.push(period);
                Some(YellowPeriod::start(leader, when))
            }
        };
    }

    periods.extend(current);
    periods
}

fn season_start(season: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(season, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whole days each player held the lead within the calendar year `season`.
///
/// Periods are clipped to `[Jan 1 season, Jan 1 season+1)`. Active periods
/// run until the end of the season.
pub fn yellow_days_in_season(periods: &[YellowPeriod], season: i32) -> BTreeMap<PlayerId, i64> {
    let mut days_by_player = BTreeMap::new();
    let (Some(start), Some(end)) = (season_start(season), season_start(season + 1)) else {
        return days_by_player;
    };

    for p in periods {
        if p.to < start || p.from > end {
            continue;
        }

        let from = p.from.max(start);
        let to = if p.to > end || p.active { end } else { p.to };

        let days = (to - from).num_hours() / 24;
        *days_by_player.entry(p.player).or_insert(0) += days;
    }

    days_by_player
}
