//! Derived statistics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PlayerId, PlayerStanding};

/// A stretch of time during which one player led the season on winnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YellowPeriod {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,

    #[serde(rename = "uuid")]
    pub player: PlayerId,

    /// Still ongoing (the most recent period)
    pub active: bool,
}

impl YellowPeriod {
    /// Open a new period at `when`.
    pub fn start(player: PlayerId, when: DateTime<Utc>) -> Self {
        Self {
            from: when,
            to: when,
            player,
            active: true,
        }
    }

    /// Close this period at `when`.
    pub fn close(&mut self, when: DateTime<Utc>) {
        self.to = when;
        self.active = false;
    }
}

/// Best and worst player of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStats {
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    pub best: PlayerId,
    pub worst: PlayerId,
}

/// Leadership history plus month-by-month stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    #[serde(rename = "yellowPeriods")]
    pub yellow_periods: Vec<YellowPeriod>,

    #[serde(rename = "monthStats")]
    pub month_stats: Vec<MonthStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionTitle {
    #[serde(rename = "uuid")]
    pub player: PlayerId,
    pub winnings: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgPlaceTitle {
    #[serde(rename = "uuid")]
    pub player: PlayerId,
    #[serde(rename = "avgPlace")]
    pub avg_place: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsTitle {
    #[serde(rename = "uuid")]
    pub player: PlayerId,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YellowDaysTitle {
    #[serde(rename = "uuid")]
    pub player: PlayerId,
    pub days: i64,
}

/// Player of the year / loser of the year: number of months as best (worst) player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthsTitle {
    #[serde(rename = "uuid")]
    pub player: PlayerId,
    pub months: u32,
}

/// Awards for one season. A `None` field means nobody qualified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonTitles {
    pub season: i32,
    pub champion: Option<ChampionTitle>,
    #[serde(rename = "avgPlaceWinner")]
    pub avg_place_winner: Option<AvgPlaceTitle>,
    #[serde(rename = "pointsWinner")]
    pub points_winner: Option<PointsTitle>,
    #[serde(rename = "mostYellowDays")]
    pub most_yellow_days: Option<YellowDaysTitle>,
    #[serde(rename = "playerOfTheYear")]
    pub player_of_the_year: Option<MonthsTitle>,
    #[serde(rename = "loserOfTheYear")]
    pub loser_of_the_year: Option<MonthsTitle>,
}

impl SeasonTitles {
    /// A season with no awards handed out.
    pub fn empty(season: i32) -> Self {
        Self {
            season,
            champion: None,
            avg_place_winner: None,
            points_winner: None,
            most_yellow_days: None,
            player_of_the_year: None,
            loser_of_the_year: None,
        }
    }
}

/// Every ranking of one standings set, each an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingsBundle {
    #[serde(rename = "byWinnings")]
    pub by_winnings: Vec<PlayerStanding>,
    #[serde(rename = "byAvgPlace")]
    pub by_avg_place: Vec<PlayerStanding>,
    #[serde(rename = "byPoints")]
    pub by_points: Vec<PlayerStanding>,
    #[serde(rename = "byHeadsUp")]
    pub by_heads_up: Vec<PlayerStanding>,
    #[serde(rename = "byWinRatio")]
    pub by_win_ratio: Vec<PlayerStanding>,
    #[serde(rename = "byWinRatioTotal")]
    pub by_win_ratio_total: Vec<PlayerStanding>,
    #[serde(rename = "byNumPlayed")]
    pub by_num_played: Vec<PlayerStanding>,
    #[serde(rename = "byKnockouts")]
    pub by_knockouts: Vec<PlayerStanding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_yellow_period_lifecycle() {
        let p = PlayerId::random();
        let start = Utc.with_ymd_and_hms(2014, 1, 3, 19, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2014, 2, 7, 19, 0, 0).unwrap();

        let mut period = YellowPeriod::start(p, start);
        assert!(period.active);
        assert_eq!(period.from, period.to);

        period.close(end);
        assert!(!period.active);
        assert_eq!(period.to, end);
    }

    #[test]
    fn test_empty_titles_serialize_as_null() {
        let json = serde_json::to_value(SeasonTitles::empty(2014)).unwrap();
        assert_eq!(json["season"], 2014);
        assert!(json["champion"].is_null());
        assert!(json["loserOfTheYear"].is_null());
    }

    #[test]
    fn test_period_stats_field_names() {
        let json = serde_json::to_value(PeriodStats::default()).unwrap();
        assert!(json.get("yellowPeriods").is_some());
        assert!(json.get("monthStats").is_some());
    }
}
