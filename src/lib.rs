//! # Standings Engine
//!
//! Standings, rankings, leadership periods and season titles for a
//! home poker league.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (tournaments, standings, periods, titles)
//! - **calculate**: Standings aggregation, rankings and derived statistics
//! - **storage**: Read-only tournament repositories (in-memory, JSONL)
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;

/// Parse a season list such as "2012,2013" or "2010-2014".
pub fn parse_seasons(s: &str) -> Option<Vec<i32>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let mut seasons = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        match part.split_once('-') {
            Some((from, to)) => {
                let from: i32 = from.trim().parse().ok()?;
                let to: i32 = to.trim().parse().ok()?;
                if from > to {
                    return None;
                }
                seasons.extend(from..=to);
            }
            None => seasons.push(part.parse().ok()?),
        }
    }

    seasons.sort_unstable();
    seasons.dedup();
    Some(seasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seasons_single() {
        assert_eq!(parse_seasons("2014"), Some(vec![2014]));
    }

    #[test]
    fn test_parse_seasons_list() {
        assert_eq!(parse_seasons("2014, 2012"), Some(vec![2012, 2014]));
    }

    #[test]
    fn test_parse_seasons_range() {
        assert_eq!(parse_seasons("2010-2012"), Some(vec![2010, 2011, 2012]));
    }

    #[test]
    fn test_parse_seasons_mixed_dedup() {
        assert_eq!(
            parse_seasons("2011-2012,2012,2015"),
            Some(vec![2011, 2012, 2015])
        );
    }

    #[test]
    fn test_parse_seasons_invalid() {
        assert_eq!(parse_seasons("abc"), None);
        assert_eq!(parse_seasons("2014-2012"), None);
    }

    #[test]
    fn test_parse_seasons_empty() {
        assert_eq!(parse_seasons(""), None);
    }
}
