//! Application layer for Fleetbook.
//!
//! This layer contains:
//! - **Admission**: the booking validator and the checks it composes
//! - **Services**: use case orchestration (BookingService, CustomerService, TaxiService)
//! - **Ports**: interface definitions (traits) for the store, field rules and clock
//! - **Errors**: application-specific error types
//!
//! Business rules that need no I/O live in `crate::domain`.

pub mod admission;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use admission::{BookingValidator, ReferenceChecker, UniquenessChecker};
pub use services::{BookingService, CustomerService, SlotLocks, TaxiService};

// Re-export port traits (for adapter implementation)
pub use ports::{Clock, EntityStore, FieldChecker};

pub use error::ApplicationError;
