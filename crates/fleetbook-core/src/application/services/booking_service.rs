//! Booking Service - commits admitted bookings.
//!
//! Every write goes through [`BookingValidator`] first and is serialized per
//! taxi, so the (taxi, date) uniqueness scan and the write that follows it
//! happen as one step with respect to other writers on the same taxi.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        admission::BookingValidator,
        ports::{Clock, EntityStore, FieldChecker},
        services::SlotLocks,
    },
    domain::{
        Booking, BookingId, Customer, CustomerId, DomainError, Entity, EntityKind, Query, Taxi, TaxiId,
    },
    error::FleetResult,
};

/// Create, update, delete and query bookings.
pub struct BookingService {
    bookings: Arc<dyn EntityStore<Booking>>,
    validator: BookingValidator,
    locks: SlotLocks<TaxiId>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn EntityStore<Booking>>,
        customers: Arc<dyn EntityStore<Customer>>,
        taxis: Arc<dyn EntityStore<Taxi>>,
        checker: Arc<dyn FieldChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let validator = BookingValidator::new(bookings.clone(), customers, taxis, checker, clock);
        Self {
            bookings,
            validator,
            locks: SlotLocks::new(),
        }
    }

    /// Admit and persist a new booking.
    ///
    /// Any id on the draft is ignored; the returned booking carries the one
    /// the store assigned.
    #[instrument(skip_all, fields(customer = ?draft.customer_id, taxi = ?draft.taxi_id, date = ?draft.date))]
    pub fn create(&self, draft: Booking) -> FleetResult<Booking> {
        let draft = Booking { id: None, ..draft };

        let commit = || -> FleetResult<Booking> {
            self.validator.validate(&draft, None)?;
            let id = self.bookings.insert(draft.clone())?;
            Ok(draft.clone().with_id(id))
        };

        // Without a taxi there is no slot to guard; admission rejects it anyway.
        let booking = match draft.taxi_id {
            Some(taxi) => self.locks.with_key(taxi, commit)?,
            None => commit()?,
        };

        info!(id = ?booking.id, "Booking created");
        Ok(booking)
    }

    /// Replace booking `id` with `draft`.
    ///
    /// The draft must carry `id` itself; ids are read-only. The booking's
    /// own current slot does not count as a conflict.
    #[instrument(skip_all, fields(id = %id, taxi = ?draft.taxi_id, date = ?draft.date))]
    pub fn update(&self, id: BookingId, draft: Booking) -> FleetResult<Booking> {
        if draft.id != Some(id) {
            warn!(found = ?draft.id, "Booking id mismatch");
            return Err(DomainError::IdentityMismatch {
                kind: EntityKind::Booking,
                expected: id.get(),
                found: draft.id.map(BookingId::get),
            }
            .into());
        }

        let current = self.require(id)?;

        // Hold both the old and the new taxi so a move between taxis cannot
        // race a create on either.
        let keys: Vec<TaxiId> = current.taxi_id.into_iter().chain(draft.taxi_id).collect();

        self.locks.with_keys(&keys, || {
            self.validator.validate(&draft, Some(id))?;
            self.bookings.update(draft.clone())
        })?;

        info!("Booking updated");
        Ok(draft)
    }

    /// Remove booking `id`, returning what was removed.
    #[instrument(skip(self))]
    pub fn delete(&self, id: BookingId) -> FleetResult<Booking> {
        let removed = self
            .bookings
            .delete(id)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Booking, id))?;

        info!("Booking deleted");
        Ok(removed)
    }

    /// Remove the booking a record refers to.
    ///
    /// A record that was never committed (no id) is returned unchanged and
    /// nothing is touched.
    pub fn delete_record(&self, booking: Booking) -> FleetResult<Booking> {
        match booking.id {
            Some(id) => self.delete(id),
            None => Ok(booking),
        }
    }

    pub fn find_by_id(&self, id: BookingId) -> FleetResult<Option<Booking>> {
        self.bookings.find_by_id(id)
    }

    /// All bookings by date, ties broken by id.
    pub fn find_all_ordered_by_date(&self) -> FleetResult<Vec<Booking>> {
        Ok(by_date(self.bookings.find_all()?))
    }

    pub fn find_by_customer(&self, customer: CustomerId) -> FleetResult<Vec<Booking>> {
        Ok(by_date(self.bookings.find_by(&Query::Customer(customer))?))
    }

    pub fn find_by_taxi(&self, taxi: TaxiId) -> FleetResult<Vec<Booking>> {
        Ok(by_date(self.bookings.find_by(&Query::Taxi(taxi))?))
    }

    fn require(&self, id: BookingId) -> FleetResult<Booking> {
        self.bookings
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Booking, id).into())
    }
}

fn by_date(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.sort_by_key(|b| (b.date, b.id));
    bookings
}
