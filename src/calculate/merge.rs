//! Combining standings computed over different tournament sets.

use std::collections::HashMap;

use crate::config::ScoringRules;
use crate::models::{PlayerId, PlayerStanding};

/// Fold `incoming` into `existing`, producing a fresh collection.
///
/// Players present in both get their counters summed, their results
/// concatenated and their average place weighted by tournaments played.
/// Everyone else is copied over unchanged. Order: players of `existing`
/// first, then new players of `incoming`, each in input order.
pub fn combine(
    existing: &[PlayerStanding],
    incoming: &[PlayerStanding],
    rules: &ScoringRules,
) -> Vec<PlayerStanding> {
    let mut combined: Vec<PlayerStanding> = Vec::with_capacity(existing.len() + incoming.len());
    let mut index: HashMap<PlayerId, usize> = HashMap::new();

    for s in existing.iter().chain(incoming.iter()) {
        match index.get(&s.player).copied() {
            Some(idx) => absorb(&mut combined[idx], s),
            None => {
                index.insert(s.player, combined.len());
                combined.push(s.clone());
            }
        }
    }

    for s in &mut combined {
        s.enough = rules.is_eligible(s.num_played);
    }

    combined
}

fn absorb(into: &mut PlayerStanding, other: &PlayerStanding) {
    let played = into.num_played + other.num_played;
    into.avg_place = if played > 0 {
        (into.avg_place * into.num_played as f64 + other.avg_place * other.num_played as f64)
            / played as f64
    } else {
        0.0
    };

    into.results.extend(other.results.iter().cloned());
    into.winnings += other.winnings;
    into.points += other.points;
    into.num_heads_up += other.num_heads_up;
    into.num_wins += other.num_wins;
    into.num_played = played;
    into.num_total += other.num_total;
    into.knockouts += other.knockouts;
}

/// An independent copy of `standings`, ready to be re-sorted.
pub fn duplicate(standings: &[PlayerStanding], rules: &ScoringRules) -> Vec<PlayerStanding> {
    combine(standings, &[], rules)
}

/// Combine any number of standings sets, left to right.
pub fn combine_all<'a, I>(sets: I, rules: &ScoringRules) -> Vec<PlayerStanding>
where
    I: IntoIterator<Item = &'a [PlayerStanding]>,
{
    sets.into_iter()
        .fold(Vec::new(), |acc, set| combine(&acc, set, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::ranking::by_winnings;
    use crate::calculate::test_support::*;
    use pretty_assertions::assert_eq;

    fn standing(n: u128, winnings: i64, played: u32, avg_place: f64) -> PlayerStanding {
        let mut s = PlayerStanding::new(p(n));
        s.winnings = winnings;
        s.num_played = played;
        s.num_total = played;
        s.avg_place = avg_place;
        s
    }

    fn totals(standings: &[PlayerStanding]) -> Vec<(PlayerId, i64, u32, u32, u32)> {
        let mut t: Vec<_> = standings
            .iter()
            .map(|s| (s.player, s.winnings, s.num_played, s.num_wins, s.num_total))
            .collect();
        t.sort_by_key(|e| e.0);
        t
    }

    #[test]
    fn test_combine_across_seasons() {
        let rules = ScoringRules::default();
        let season_2012 = vec![standing(1, 100, 5, 2.0)];
        let season_2013 = vec![standing(1, 50, 5, 4.0)];

        let combined = combine(&season_2012, &season_2013, &rules);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].winnings, 150);
        assert_eq!(combined[0].num_played, 10);
        assert_eq!(combined[0].num_total, 10);
        assert_eq!(combined[0].avg_place, 3.0);
        assert!(!combined[0].enough);
    }

    #[test]
    fn test_combine_weights_avg_place() {
        let rules = ScoringRules::default();
        let a = vec![standing(1, 0, 9, 2.0)];
        let b = vec![standing(1, 0, 3, 6.0)];

        let combined = combine(&a, &b, &rules);
        assert_eq!(combined[0].avg_place, 3.0);
        assert!(combined[0].enough);
    }

    #[test]
    fn test_combine_is_commutative_on_sums() {
        let rules = ScoringRules::default();
        let mut x = standing(1, 100, 4, 2.0);
        x.num_wins = 2;
        let a = vec![x, standing(2, -40, 3, 5.0)];
        let b = vec![standing(3, 20, 1, 1.0), standing(1, -10, 2, 3.0)];

        assert_eq!(
            totals(&combine(&a, &b, &rules)),
            totals(&combine(&b, &a, &rules))
        );
    }

    #[test]
    fn test_combine_concatenates_results() {
        let ts_a = vec![played(date(2012, 3, 2), 2012, &[1, 2])];
        let ts_b = vec![played(date(2013, 3, 1), 2013, &[2, 1])];
        let a = crate::calculate::compute_standings(&ts_a);
        let b = crate::calculate::compute_standings(&ts_b);

        let combined = combine(&a, &b, &ScoringRules::default());
        let p1 = combined.iter().find(|s| s.player == p(1)).unwrap();
        let places: Vec<u32> = p1.results.iter().map(|r| r.place).collect();
        assert_eq!(places, vec![1, 2]);
        assert_eq!(p1.knockouts, 0);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let rules = ScoringRules::default();
        let original = vec![standing(1, -5, 1, 3.0), standing(2, 5, 1, 1.0)];
        let snapshot = original.clone();

        let mut copy = duplicate(&original, &rules);
        assert_eq!(copy, original);

        copy.reverse();
        copy[0].winnings = 1_000;
        assert_eq!(original, snapshot);

        let ranked = by_winnings(&copy);
        assert_eq!(ranked[0].winnings, 1_000);
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_combine_all() {
        let rules = ScoringRules::default();
        let a = vec![standing(1, 10, 1, 1.0)];
        let b = vec![standing(1, 10, 1, 1.0), standing(2, 3, 1, 2.0)];
        let c = vec![standing(2, 3, 1, 2.0)];

        let combined = combine_all([a.as_slice(), b.as_slice(), c.as_slice()], &rules);
        assert_eq!(
            totals(&combined),
            vec![(p(1), 20, 2, 0, 2), (p(2), 6, 2, 0, 2)]
        );
    }

    #[test]
    fn test_combine_empty() {
        let rules = ScoringRules::default();
        assert!(combine(&[], &[], &rules).is_empty());
    }
}
