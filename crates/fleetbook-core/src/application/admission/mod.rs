//! Booking admission - decides whether a proposed booking may be committed.
//!
//! Three checks, in order, first failure wins:
//! 1. Field rules (`FieldChecker` plus required fields and the future-date rule)
//! 2. Referential integrity (`ReferenceChecker`)
//! 3. Slot uniqueness (`UniquenessChecker`)
//!
//! Admission has no side effects. Persisting an admitted booking is the job
//! of `BookingService`.

pub mod reference;
pub mod uniqueness;
pub mod validator;

pub use reference::ReferenceChecker;
pub use uniqueness::{UniquenessChecker, email_taken, reg_taken};
pub use validator::BookingValidator;
