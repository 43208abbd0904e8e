pub mod booking;
pub mod customer;
pub mod taxi;

use std::fmt;
use std::hash::Hash;

pub use booking::Booking;
pub use customer::Customer;
pub use taxi::Taxi;

use crate::domain::value_objects::{CustomerId, EntityKind, TaxiId};

/// A record the store can persist under a surrogate id.
///
/// Implemented by [`Customer`], [`Taxi`] and [`Booking`]; stores are generic
/// over this trait so one adapter serves all three kinds.
pub trait Entity: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Typed surrogate id, convertible to and from the store's raw `u64`.
    type Id: Copy
        + Eq
        + Ord
        + Hash
        + fmt::Debug
        + fmt::Display
        + From<u64>
        + Into<u64>
        + Send
        + Sync
        + 'static;

    const KIND: EntityKind;

    fn id(&self) -> Option<Self::Id>;

    /// The same record carrying `id`.
    fn with_id(self, id: Self::Id) -> Self;

    /// Whether this record is selected by a named query.
    ///
    /// Queries that do not apply to the kind never match.
    fn matches(&self, query: &Query) -> bool;
}

/// Named-query lookups supported by every store.
///
/// Covers the foreign-key scans (`Customer`, `Taxi`) and the natural-key
/// lookups (`Email`, `Reg`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Bookings referencing a customer.
    Customer(CustomerId),
    /// Bookings referencing a taxi.
    Taxi(TaxiId),
    /// Customers registered with an email (case-insensitive).
    Email(String),
    /// Taxis carrying a registration (case-insensitive).
    Reg(String),
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer(id) => write!(f, "customer={id}"),
            Self::Taxi(id) => write!(f, "taxi={id}"),
            Self::Email(email) => write!(f, "email={email}"),
            Self::Reg(reg) => write!(f, "reg={reg}"),
        }
    }
}
