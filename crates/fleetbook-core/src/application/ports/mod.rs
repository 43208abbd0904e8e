//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `fleetbook-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `EntityStore`: Generic record persistence
//!   - `FieldChecker`: Pluggable field-level rules
//!   - `Clock`: Source of "today"
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The services themselves; the CLI calls them directly)

pub mod output;

pub use output::{Clock, EntityStore, FieldChecker};

#[cfg(test)]
pub use output::{MockClock, MockFieldChecker};
