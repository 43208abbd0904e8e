//! Booking Validator - the admission decision.
//!
//! Composes the field checker, the reference checker and the uniqueness
//! checker into a single accept/reject outcome for a draft booking.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        admission::{ReferenceChecker, UniquenessChecker},
        ports::{Clock, EntityStore, FieldChecker},
    },
    domain::{Booking, BookingId, Customer, CustomerId, DomainError, FieldViolations, Taxi, TaxiId},
    error::FleetResult,
};

pub const DATE_FIELD: &str = "date";
pub const CUSTOMER_FIELD: &str = "customer";
pub const TAXI_FIELD: &str = "taxi";

pub const DATE_REQUIRED: &str = "Booking date is required";
pub const DATE_NOT_FUTURE: &str =
    "Booking dates can not be in the past. Please choose one from the future";
pub const CUSTOMER_REQUIRED: &str = "A customer is required";
pub const TAXI_REQUIRED: &str = "A taxi is required";

/// Decides whether a draft booking may be committed.
#[derive(Clone)]
pub struct BookingValidator {
    checker: Arc<dyn FieldChecker>,
    clock: Arc<dyn Clock>,
    references: ReferenceChecker,
    uniqueness: UniquenessChecker,
}

impl BookingValidator {
    pub fn new(
        bookings: Arc<dyn EntityStore<Booking>>,
        customers: Arc<dyn EntityStore<Customer>>,
        taxis: Arc<dyn EntityStore<Taxi>>,
        checker: Arc<dyn FieldChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            checker,
            clock,
            references: ReferenceChecker::new(customers, taxis),
            uniqueness: UniquenessChecker::new(bookings),
        }
    }

    /// Admit or reject `draft`.
    ///
    /// `exclude` is the id of the booking being updated (its own slot is not
    /// a conflict); pass `None` on create.
    ///
    /// # Errors
    ///
    /// - `FieldViolation` when any field rule fails (all violations together)
    /// - `ReferenceNotFound` when the customer or taxi does not exist
    /// - `DuplicateBooking` when another booking holds the (taxi, date) slot
    /// - any store failure, unchanged
    #[instrument(
        skip_all,
        fields(customer = ?draft.customer_id, taxi = ?draft.taxi_id, date = ?draft.date, exclude = ?exclude)
    )]
    pub fn validate(&self, draft: &Booking, exclude: Option<BookingId>) -> FleetResult<()> {
        // 1. Field constraints
        let (customer, taxi, date) = self.check_fields(draft)?;

        // 2. Referential integrity
        self.references.require_customer(customer)?;
        self.references.require_taxi(taxi)?;

        // 3. Slot uniqueness
        if let Some(holder) = self.uniqueness.slot_holder(taxi, date, exclude)? {
            warn!(%taxi, %date, %holder, "Slot already booked");
            return Err(DomainError::DuplicateBooking { taxi, date }.into());
        }

        debug!("Booking admitted");
        Ok(())
    }

    /// Run every field rule and return the complete (customer, taxi, date)
    /// triple when they all pass.
    fn check_fields(&self, draft: &Booking) -> FleetResult<(CustomerId, TaxiId, NaiveDate)> {
        let mut violations = self.checker.check_booking(draft);
        violations.merge(self.required_fields(draft));

        match (violations.is_empty(), draft.customer_id, draft.taxi_id, draft.date) {
            (true, Some(customer), Some(taxi), Some(date)) => Ok((customer, taxi, date)),
            _ => {
                warn!(%violations, "Booking rejected by field rules");
                Err(violations.into())
            }
        }
    }

    fn required_fields(&self, draft: &Booking) -> FieldViolations {
        let mut violations = FieldViolations::new();

        match draft.date {
            None => violations.push(DATE_FIELD, DATE_REQUIRED),
            Some(date) if date <= self.clock.today() => {
                violations.push(DATE_FIELD, DATE_NOT_FUTURE)
            }
            Some(_) => {}
        }
        if draft.customer_id.is_none() {
            violations.push(CUSTOMER_FIELD, CUSTOMER_REQUIRED);
        }
        if draft.taxi_id.is_none() {
            violations.push(TAXI_FIELD, TAXI_REQUIRED);
        }

        violations
    }
}
