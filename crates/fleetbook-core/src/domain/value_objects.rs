//! Domain value objects: surrogate ids and entity kinds.
//!
//! # Design
//!
//! Ids are assigned by the store and are plain `u64` underneath, but each
//! entity gets its own newtype so a `TaxiId` can never be passed where a
//! `CustomerId` is expected. They are `Copy`, ordered, and serialize as bare
//! integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

surrogate_id!(
    /// Store-assigned identity of a [`Customer`](crate::domain::Customer).
    CustomerId
);

surrogate_id!(
    /// Store-assigned identity of a [`Taxi`](crate::domain::Taxi).
    TaxiId
);

surrogate_id!(
    /// Store-assigned identity of a [`Booking`](crate::domain::Booking).
    BookingId
);

// ── EntityKind ───────────────────────────────────────────────────────────────

/// The kinds of record the system persists.
///
/// Used in error payloads so callers can tell *which* reference failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Customer,
    Taxi,
    Booking,
}

impl EntityKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Taxi => "taxi",
            Self::Booking => "booking",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_and_display() {
        let id: TaxiId = " 42 ".parse().unwrap();
        assert_eq!(id, TaxiId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<CustomerId>().is_err());
    }

    #[test]
    fn ids_convert_to_and_from_raw() {
        let id = BookingId::from(7);
        assert_eq!(u64::from(id), 7);
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn entity_kind_display() {
        assert_eq!(EntityKind::Customer.to_string(), "customer");
        assert_eq!(EntityKind::Taxi.to_string(), "taxi");
        assert_eq!(EntityKind::Booking.to_string(), "booking");
    }
}
