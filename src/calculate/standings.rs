//! Aggregation of tournament results into per-player standings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::ScoringRules;
use crate::models::{PlayerId, PlayerResult, PlayerStanding, Tournament};

/// Running totals for one player while tournaments are folded in.
struct Tally {
    standing: PlayerStanding,
    sum_place: u32,
    point_scores: Vec<u32>,
}

impl Tally {
    fn new(player: PlayerId) -> Self {
        Self {
            standing: PlayerStanding::new(player),
            sum_place: 0,
            point_scores: Vec::new(),
        }
    }

    fn record_finish(&mut self, place: u32, when: DateTime<Utc>, tournament: &Tournament) {
        let field = tournament.field_size();
        let stake = tournament.info.stake;
        let s = &mut self.standing;

        s.results.push(PlayerResult::new(place, when, field as u32));
        s.num_played += 1;
        self.sum_place += place;
        self.point_scores.push(place);

        match place {
            1 => {
                s.num_wins += 1;
                s.num_heads_up += 1;
                s.winnings += (field as i64 - 2) * stake;
            }
            2 => s.num_heads_up += 1,
            _ => s.winnings -= stake,
        }
    }

    fn finish(mut self, num_total: u32, rules: &ScoringRules) -> PlayerStanding {
        self.point_scores.sort_unstable();
        let dropped = rules
            .dropped_scores(self.standing.num_played)
            .min(self.point_scores.len());
        self.point_scores.truncate(self.point_scores.len() - dropped);

        let mut s = self.standing;
        s.points = self.point_scores.iter().sum();
        s.avg_place = if s.num_played > 0 {
            self.sum_place as f64 / s.num_played as f64
        } else {
            0.0
        };
        s.enough = rules.is_eligible(s.num_played);
        s.num_total = num_total;
        s
    }
}

/// Builds raw (unsorted) standings from a set of tournaments.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandingsBuilder {
    rules: ScoringRules,
}

impl StandingsBuilder {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    /// One standing per player appearing in a played tournament's result.
    ///
    /// Unplayed or undated tournaments and tournaments without a result are ignored.
    /// Players are listed in order of first appearance. A player missing a
    /// tournament scores one more point than the largest field in the set.
    pub fn build<'a, I>(&self, tournaments: I) -> Vec<PlayerStanding>
    where
        I: IntoIterator<Item = &'a Tournament>,
    {
        let qualifying: Vec<(DateTime<Utc>, &Tournament)> = tournaments
            .into_iter()
            .filter(|t| t.qualifies())
            .filter_map(|t| t.info.scheduled.map(|when| (when, t)))
            .collect();

        let mut index: HashMap<PlayerId, usize> = HashMap::new();
        let mut tallies: Vec<Tally> = Vec::new();
        let mut max_players = 0;

        for (_, t) in &qualifying {
            for player in &t.result {
                index.entry(*player).or_insert_with(|| {
                    tallies.push(Tally::new(*player));
                    tallies.len() - 1
                });
            }
            max_players = max_players.max(t.field_size());
        }

        let absent_score = max_players as u32 + 1;

        for &(when, t) in &qualifying {
            let mut present = vec![false; tallies.len()];

            for (i, player) in t.result.iter().enumerate() {
                if let Some(&idx) = index.get(player) {
                    present[idx] = true;
                    tallies[idx].record_finish(i as u32 + 1, when, t);
                }
            }

            for (idx, tally) in tallies.iter_mut().enumerate() {
                if !present[idx] {
                    tally.point_scores.push(absent_score);
                }
            }

            for (hunter, eliminated) in &t.bounty_hunters {
                if let Some(&idx) = index.get(hunter) {
                    tallies[idx].standing.knockouts += eliminated.len() as u32;
                }
            }
        }

        let num_total = qualifying.len() as u32;
        debug!(
            "Built standings for {} players over {} tournaments",
            tallies.len(),
            num_total
        );

        tallies
            .into_iter()
            .map(|t| t.finish(num_total, &self.rules))
            .collect()
    }
}

/// Standings under the default scoring rules.
pub fn compute_standings<'a, I>(tournaments: I) -> Vec<PlayerStanding>
where
    I: IntoIterator<Item = &'a Tournament>,
{
    StandingsBuilder::default().build(tournaments)
}
