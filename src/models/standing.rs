//! Per-player standing records.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One finish of a player in one tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    /// Finishing place (1 = winner)
    pub place: u32,

    /// When the tournament was played
    pub when: DateTime<Utc>,

    /// Field size of the tournament
    #[serde(rename = "numPlayers")]
    pub num_players: u32,
}

impl PlayerResult {
    pub fn new(place: u32, when: DateTime<Utc>, num_players: u32) -> Self {
        Self {
            place,
            when,
            num_players,
        }
    }
}

/// Finishes sorted best first: lower place, then bigger field.
fn best_first(results: &[PlayerResult]) -> Vec<(u32, u32)> {
    let mut keyed: Vec<(u32, u32)> = results.iter().map(|r| (r.place, r.num_players)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    keyed
}

/// Compare two placement histories, `Less` meaning `r` is the better record.
///
/// Both histories are sorted best first and compared pairwise. At the first
/// differing pair the lower place wins, and on equal places the larger field
/// wins. If one history is a prefix of the other, the longer one wins.
pub fn compare_results(r: &[PlayerResult], t: &[PlayerResult]) -> Ordering {
    let r = best_first(r);
    let t = best_first(t);

    for (a, b) in r.iter().zip(t.iter()) {
        let ord = a.0.cmp(&b.0).then(b.1.cmp(&a.1));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    t.len().cmp(&r.len())
}

/// Whether `r` is a strictly better placement history than `t`.
pub fn results_better_than(r: &[PlayerResult], t: &[PlayerResult]) -> bool {
    compare_results(r, t) == Ordering::Less
}

/// Whether two placement histories are indistinguishable.
pub fn results_equal(r: &[PlayerResult], t: &[PlayerResult]) -> bool {
    r.len() == t.len() && best_first(r) == best_first(t)
}

/// Aggregated performance of one player over a set of tournaments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    #[serde(rename = "uuid")]
    pub player: PlayerId,

    /// Every finish, in tournament order
    pub results: Vec<PlayerResult>,

    /// Net money won
    pub winnings: i64,

    #[serde(rename = "avgPlace")]
    pub avg_place: f64,

    /// Low-point score (lower is better)
    pub points: u32,

    #[serde(rename = "headsUp")]
    pub num_heads_up: u32,

    #[serde(rename = "wins")]
    pub num_wins: u32,

    #[serde(rename = "played")]
    pub num_played: u32,

    /// Eligible for season awards
    #[serde(rename = "playedEnough")]
    pub enough: bool,

    /// Qualifying tournaments in the input set
    #[serde(rename = "numTotal")]
    pub num_total: u32,

    #[serde(default)]
    pub knockouts: u32,
}

fn ratio(num: u32, den: u32) -> Option<f64> {
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

impl PlayerStanding {
    /// An empty record for a player.
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            results: Vec::new(),
            winnings: 0,
            avg_place: 0.0,
            points: 0,
            num_heads_up: 0,
            num_wins: 0,
            num_played: 0,
            enough: false,
            num_total: 0,
            knockouts: 0,
        }
    }

    /// Share of played tournaments that ended in heads-up.
    pub fn heads_up_ratio(&self) -> Option<f64> {
        ratio(self.num_heads_up, self.num_played)
    }

    /// Share of heads-ups converted into wins.
    pub fn heads_up_win_ratio(&self) -> Option<f64> {
        ratio(self.num_wins, self.num_heads_up)
    }

    /// Wins per tournament played.
    pub fn win_ratio(&self) -> Option<f64> {
        ratio(self.num_wins, self.num_played)
    }

    /// Wins per tournament held.
    pub fn win_ratio_total(&self) -> Option<f64> {
        ratio(self.num_wins, self.num_total)
    }

    /// Share of held tournaments the player missed.
    pub fn absence_ratio(&self) -> Option<f64> {
        ratio(self.num_total.saturating_sub(self.num_played), self.num_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn results(entries: &[(u32, u32)]) -> Vec<PlayerResult> {
        let when = Utc.with_ymd_and_hms(2014, 1, 1, 19, 0, 0).unwrap();
        entries
            .iter()
            .map(|&(place, n)| PlayerResult::new(place, when, n))
            .collect()
    }

    #[test]
    fn test_better_than_empty_opponent() {
        assert!(results_better_than(&results(&[(5, 6)]), &[]));
        assert!(!results_better_than(&[], &results(&[(5, 6)])));
    }

    #[test]
    fn test_better_than_both_empty() {
        assert!(!results_better_than(&[], &[]));
        assert!(results_equal(&[], &[]));
    }

    #[test]
    fn test_better_than_lower_place_wins() {
        let r = results(&[(3, 6), (1, 6)]);
        let t = results(&[(2, 6), (2, 6)]);
        assert!(results_better_than(&r, &t));
        assert!(!results_better_than(&t, &r));
    }

    #[test]
    fn test_better_than_bigger_field_wins_on_same_place() {
        let r = results(&[(1, 8)]);
        let t = results(&[(1, 6)]);
        assert!(results_better_than(&r, &t));
        assert!(!results_better_than(&t, &r));
    }

    #[test]
    fn test_better_than_longer_history_wins() {
        let r = results(&[(2, 6), (4, 6)]);
        let t = results(&[(2, 6)]);
        assert!(results_better_than(&r, &t));
        assert!(!results_better_than(&t, &r));
    }

    #[test]
    fn test_equal_histories() {
        let r = results(&[(2, 6), (4, 6)]);
        let t = results(&[(4, 6), (2, 6)]);
        assert!(results_equal(&r, &t));
        assert!(!results_better_than(&r, &t));
        assert!(!results_better_than(&t, &r));
    }

    #[test]
    fn test_equality_is_symmetric_in_field_size() {
        let r = results(&[(2, 7)]);
        let t = results(&[(2, 6)]);
        assert!(!results_equal(&r, &t));
        assert!(!results_equal(&t, &r));
    }

    #[test]
    fn test_ratios_with_zero_denominator() {
        let s = PlayerStanding::new(PlayerId::random());
        assert_eq!(s.heads_up_ratio(), None);
        assert_eq!(s.heads_up_win_ratio(), None);
        assert_eq!(s.win_ratio(), None);
        assert_eq!(s.win_ratio_total(), None);
        assert_eq!(s.absence_ratio(), None);
    }

    #[test]
    fn test_absence_ratio() {
        let mut s = PlayerStanding::new(PlayerId::random());
        s.num_total = 4;
        s.num_played = 3;
        assert_eq!(s.absence_ratio(), Some(0.25));
    }

    #[test]
    fn test_standing_json_field_names() {
        let s = PlayerStanding::new(PlayerId::random());
        let json = serde_json::to_value(&s).unwrap();
        for key in [
            "uuid",
            "results",
            "winnings",
            "avgPlace",
            "points",
            "headsUp",
            "wins",
            "played",
            "playedEnough",
            "numTotal",
            "knockouts",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
