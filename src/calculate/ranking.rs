//! Orderings of a standings set.
//!
//! Every ordering sorts its own copy of the standings, so two rankings of
//! the same season never share storage. Sorts are stable: players that tie
//! on every key keep their relative input order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::config::ScoringRules;
use crate::models::{compare_results, PlayerStanding, StandingsBundle};

/// A ranking policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingOrder {
    /// Winnings, then points, then wins
    Winnings,
    /// Winnings, then average place, then wins (seasons before the points tie-break)
    WinningsOld,
    /// Average place, then winnings, then wins
    AvgPlace,
    /// Points (low is good), then winnings, then wins
    Points,
    /// Heads-up rate, then heads-up conversion, then winnings
    HeadsUp,
    /// Wins per tournament played, then wins
    WinRatio,
    /// Wins per tournament held, then wins
    WinRatioTotal,
    /// Attendance, then wins
    NumPlayed,
    /// Knockouts, then winnings, then wins
    Knockouts,
    /// Average place, then placement history
    BestPlayer,
    /// Reverse of `BestPlayer`
    WorstPlayer,
}

impl RankingOrder {
    pub const ALL: [RankingOrder; 11] = [
        RankingOrder::Winnings,
        RankingOrder::WinningsOld,
        RankingOrder::AvgPlace,
        RankingOrder::Points,
        RankingOrder::HeadsUp,
        RankingOrder::WinRatio,
        RankingOrder::WinRatioTotal,
        RankingOrder::NumPlayed,
        RankingOrder::Knockouts,
        RankingOrder::BestPlayer,
        RankingOrder::WorstPlayer,
    ];

    /// The winnings ordering in force for `season`.
    pub fn winnings_for_season(season: i32, rules: &ScoringRules) -> Self {
        if rules.uses_old_tiebreak(season) {
            RankingOrder::WinningsOld
        } else {
            RankingOrder::Winnings
        }
    }

    /// `Less` when `a` ranks above `b`.
    pub fn compare(self, a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
        match self {
            RankingOrder::Winnings => desc(a.winnings, b.winnings)
                .then(a.points.cmp(&b.points))
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::WinningsOld => desc(a.winnings, b.winnings)
                .then(a.avg_place.total_cmp(&b.avg_place))
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::AvgPlace => a
                .avg_place
                .total_cmp(&b.avg_place)
                .then(desc(a.winnings, b.winnings))
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::Points => a
                .points
                .cmp(&b.points)
                .then(desc(a.winnings, b.winnings))
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::HeadsUp => ratio_desc(a.heads_up_ratio(), b.heads_up_ratio())
                .then(ratio_desc(a.heads_up_win_ratio(), b.heads_up_win_ratio()))
                .then(desc(a.winnings, b.winnings)),
            RankingOrder::WinRatio => ratio_desc(a.win_ratio(), b.win_ratio())
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::WinRatioTotal => ratio_desc(a.win_ratio_total(), b.win_ratio_total())
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::NumPlayed => ratio_asc(a.absence_ratio(), b.absence_ratio())
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::Knockouts => desc(a.knockouts, b.knockouts)
                .then(desc(a.winnings, b.winnings))
                .then(desc(a.num_wins, b.num_wins)),
            RankingOrder::BestPlayer => a
                .avg_place
                .total_cmp(&b.avg_place)
                .then_with(|| compare_results(&a.results, &b.results)),
            RankingOrder::WorstPlayer => RankingOrder::BestPlayer.compare(a, b).reverse(),
        }
    }

    /// Sort a slice the caller owns.
    pub fn sort(self, standings: &mut [PlayerStanding]) {
        standings.sort_by(|a, b| self.compare(a, b));
    }

    /// A sorted copy, leaving `standings` untouched.
    pub fn sorted(self, standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
        let mut copy = standings.to_vec();
        self.sort(&mut copy);
        copy
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingOrder::Winnings => "winnings",
            RankingOrder::WinningsOld => "winnings-old",
            RankingOrder::AvgPlace => "avg-place",
            RankingOrder::Points => "points",
            RankingOrder::HeadsUp => "heads-up",
            RankingOrder::WinRatio => "win-ratio",
            RankingOrder::WinRatioTotal => "win-ratio-total",
            RankingOrder::NumPlayed => "num-played",
            RankingOrder::Knockouts => "knockouts",
            RankingOrder::BestPlayer => "best-player",
            RankingOrder::WorstPlayer => "worst-player",
        }
    }
}

impl fmt::Display for RankingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankingOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("unknown ranking order: {}", s))
    }
}

fn desc<T: Ord>(a: T, b: T) -> Ordering {
    b.cmp(&a)
}

/// Higher ratio first; an undefined ratio ranks last.
fn ratio_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Lower ratio first; an undefined ratio ranks last.
fn ratio_asc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First player in a ranking who is eligible for awards.
pub fn first_eligible(ranked: &[PlayerStanding]) -> Option<&PlayerStanding> {
    ranked.iter().find(|s| s.enough)
}

pub fn by_winnings(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::Winnings.sorted(standings)
}

pub fn by_winnings_old(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::WinningsOld.sorted(standings)
}

pub fn by_avg_place(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::AvgPlace.sorted(standings)
}

pub fn by_points(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::Points.sorted(standings)
}

pub fn by_heads_up(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::HeadsUp.sorted(standings)
}

pub fn by_win_ratio(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::WinRatio.sorted(standings)
}

pub fn by_win_ratio_total(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::WinRatioTotal.sorted(standings)
}

pub fn by_num_played(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::NumPlayed.sorted(standings)
}

pub fn by_knockouts(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::Knockouts.sorted(standings)
}

pub fn by_best_player(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::BestPlayer.sorted(standings)
}

pub fn by_worst_player(standings: &[PlayerStanding]) -> Vec<PlayerStanding> {
    RankingOrder::WorstPlayer.sorted(standings)
}

/// Every presentation ranking of one standings set.
pub fn rank_all(standings: &[PlayerStanding], winnings: RankingOrder) -> StandingsBundle {
    StandingsBundle {
        by_winnings: winnings.sorted(standings),
        by_avg_place: by_avg_place(standings),
        by_points: by_points(standings),
        by_heads_up: by_heads_up(standings),
        by_win_ratio: by_win_ratio(standings),
        by_win_ratio_total: by_win_ratio_total(standings),
        by_num_played: by_num_played(standings),
        by_knockouts: by_knockouts(standings),
    }
}
