//! Infrastructure adapters for Fleetbook.
//!
//! This crate implements the ports defined in `fleetbook-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod clock;
pub mod fleet;
pub mod store;
pub mod validation;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use fleet::Fleet;
pub use store::{DirLock, InMemoryStore, JsonFileStore};
pub use validation::RuleChecker;
