//! Core domain layer for Fleetbook.
//!
//! This module contains the data model and the error vocabulary of the
//! booking admission engine. It performs no I/O; lookups that need the store
//! go through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Value semantics**: All domain objects are Clone + PartialEq, and dates
//!   compare by calendar value
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{Booking, Customer, Entity, Query, Taxi};

pub use error::{DomainError, ErrorCategory, FieldViolations};

pub use value_objects::{BookingId, CustomerId, EntityKind, TaxiId};
