//! Application services - orchestrate use cases.
//!
//! Services coordinate the admission engine and the store ports to carry out
//! the create/update/delete/query use cases for each record kind.

pub mod booking_service;
pub mod customer_service;
pub mod slot_locks;
pub mod taxi_service;

pub use booking_service::BookingService;
pub use customer_service::CustomerService;
pub use slot_locks::SlotLocks;
pub use taxi_service::TaxiService;
