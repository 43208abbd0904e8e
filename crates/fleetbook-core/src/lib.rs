//! Fleetbook Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the Fleetbook
//! taxi booking engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          fleetbook-cli (CLI)            │
//! │        (Drives the services)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (BookingService, CustomerService, ...) │
//! │   BookingValidator decides admission    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (EntityStore, FieldChecker, Clock)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   fleetbook-adapters (Infrastructure)   │
//! │  (InMemoryStore, JsonFileStore, rules)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │      (Customer, Taxi, Booking, ids)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fleetbook_core::prelude::*;
//! # fn demo(service: BookingService, bob: CustomerId, cab: TaxiId) -> FleetResult<()> {
//! let date = "2099-01-01".parse().expect("valid date");
//! let booking = service.create(Booking::draft(bob, cab, date))?;
//! assert!(booking.is_committed());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BookingService, BookingValidator, CustomerService, TaxiService,
        ports::{Clock, EntityStore, FieldChecker},
    };
    pub use crate::domain::{
        Booking, BookingId, Customer, CustomerId, DomainError, Entity, EntityKind,
        FieldViolations, Query, Taxi, TaxiId,
    };
    pub use crate::error::{ErrorCategory, FleetError, FleetResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
