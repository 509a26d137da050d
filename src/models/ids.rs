//! Typed identifiers for league entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// A league player.
    PlayerId
);
uuid_id!(
    /// A single tournament (one league night).
    TournamentId
);
uuid_id!(
    /// Where a tournament is hosted.
    LocationId
);
uuid_id!(
    /// Who caters a tournament.
    CateringId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_ordering_follows_uuid() {
        let a = PlayerId::new(Uuid::from_u128(1));
        let b = PlayerId::new(Uuid::from_u128(2));
        assert!(a < b);
    }

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let id = PlayerId::new(Uuid::from_u128(0xabc));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000abc\"");

        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_player_id_from_str() {
        let id: PlayerId = "00000000-0000-0000-0000-000000000001".parse().unwrap();
        assert_eq!(id, PlayerId::new(Uuid::from_u128(1)));
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(TournamentId::random(), TournamentId::random());
    }

    #[test]
    fn test_debug_includes_type_name() {
        let id = PlayerId::new(Uuid::from_u128(7));
        assert!(format!("{:?}", id).starts_with("PlayerId("));
    }
}
