//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fleetbook-adapters` crate provides implementations.

use chrono::NaiveDate;

use crate::domain::{Booking, Customer, Entity, FieldViolations, Query, Taxi};
use crate::error::FleetResult;

/// Port for generic record persistence.
///
/// Implemented by:
/// - `fleetbook_adapters::store::InMemoryStore` (testing, ephemeral use)
/// - `fleetbook_adapters::store::JsonFileStore` (CLI persistence)
///
/// ## Design Notes
///
/// - The store assigns ids on `insert`; callers never choose them
/// - `find_by` and `find_all` return records in ascending id order
/// - Lock or I/O failures surface as `ApplicationError`, never as a
///   `DomainError`
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Get a record by id; `None` when absent.
    fn find_by_id(&self, id: E::Id) -> FleetResult<Option<E>>;

    /// All records of this kind.
    fn find_all(&self) -> FleetResult<Vec<E>>;

    /// Records selected by a named query (foreign key or natural key).
    fn find_by(&self, query: &Query) -> FleetResult<Vec<E>>;

    /// Persist a new record and return its assigned id.
    ///
    /// Any id already present on `entity` is ignored.
    fn insert(&self, entity: E) -> FleetResult<E::Id>;

    /// Overwrite an existing record in place.
    ///
    /// Fails with `DomainError::NotFound` if no record has `entity`'s id.
    fn update(&self, entity: E) -> FleetResult<()>;

    /// Remove a record, returning it if it was present.
    fn delete(&self, id: E::Id) -> FleetResult<Option<E>>;
}

/// Port for field-level rules (non-null, format, range).
///
/// Implemented by:
/// - `fleetbook_adapters::validation::RuleChecker` (standard rule set)
///
/// A checker only reports; it never consults the store.
#[cfg_attr(test, mockall::automock)]
pub trait FieldChecker: Send + Sync {
    fn check_customer(&self, customer: &Customer) -> FieldViolations;

    fn check_taxi(&self, taxi: &Taxi) -> FieldViolations;

    fn check_booking(&self, booking: &Booking) -> FieldViolations;
}

/// Port for the current calendar date.
///
/// Implemented by:
/// - `fleetbook_adapters::clock::SystemClock` (production)
/// - `fleetbook_adapters::clock::FixedClock` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
