//! Uniqueness scans that no single-table constraint covers.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    application::ports::EntityStore,
    domain::{Booking, BookingId, Customer, CustomerId, Entity, Query, Taxi, TaxiId},
    error::FleetResult,
};

/// Reports whether a (taxi, date) slot is already held by another booking.
#[derive(Clone)]
pub struct UniquenessChecker {
    bookings: Arc<dyn EntityStore<Booking>>,
}

impl UniquenessChecker {
    pub fn new(bookings: Arc<dyn EntityStore<Booking>>) -> Self {
        Self { bookings }
    }

    /// The id of a booking other than `exclude` occupying `(taxi, date)`.
    ///
    /// Dates compare by calendar value. `exclude` is the booking being
    /// updated, so that re-saving a booking on its own slot is not a clash;
    /// on create it is `None` and any holder counts.
    pub fn slot_holder(
        &self,
        taxi: TaxiId,
        date: NaiveDate,
        exclude: Option<BookingId>,
    ) -> FleetResult<Option<BookingId>> {
        let holder = self
            .bookings
            .find_by(&Query::Taxi(taxi))?
            .into_iter()
            .filter(|b| b.date == Some(date))
            .filter_map(|b| b.id)
            .find(|id| Some(*id) != exclude);

        debug!(%taxi, %date, ?exclude, ?holder, "Slot scan");
        Ok(holder)
    }

    pub fn is_slot_taken(
        &self,
        taxi: TaxiId,
        date: NaiveDate,
        exclude: Option<BookingId>,
    ) -> FleetResult<bool> {
        Ok(self.slot_holder(taxi, date, exclude)?.is_some())
    }
}

/// Whether a customer other than `exclude` is registered under `email`.
pub fn email_taken(
    customers: &dyn EntityStore<Customer>,
    email: &str,
    exclude: Option<CustomerId>,
) -> FleetResult<bool> {
    Ok(other_holder(customers, &Query::Email(email.to_owned()), exclude)?.is_some())
}

/// Whether a taxi other than `exclude` carries `reg`.
pub fn reg_taken(
    taxis: &dyn EntityStore<Taxi>,
    reg: &str,
    exclude: Option<TaxiId>,
) -> FleetResult<bool> {
    Ok(other_holder(taxis, &Query::Reg(reg.to_owned()), exclude)?.is_some())
}

/// First record matched by a natural-key `query` other than `exclude`.
pub(crate) fn other_holder<E: Entity>(
    store: &dyn EntityStore<E>,
    query: &Query,
    exclude: Option<E::Id>,
) -> FleetResult<Option<E>> {
    Ok(store
        .find_by(query)?
        .into_iter()
        .find(|e| e.id().is_some() && e.id() != exclude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{VecStore, date};

    #[test]
    fn slot_scan_ignores_other_taxis_and_dates() {
        let bookings = Arc::new(VecStore::<Booking>::default());
        let held = bookings.seed(Booking::draft(CustomerId::new(1), TaxiId::new(1), date(2031, 1, 1)));
        bookings.seed(Booking::draft(CustomerId::new(1), TaxiId::new(2), date(2031, 1, 2)));

        let checker = UniquenessChecker::new(bookings);
        assert_eq!(
            checker.slot_holder(TaxiId::new(1), date(2031, 1, 1), None).unwrap(),
            Some(held)
        );
        assert!(!checker.is_slot_taken(TaxiId::new(1), date(2031, 1, 2), None).unwrap());
        assert!(!checker.is_slot_taken(TaxiId::new(1), date(2031, 1, 1), Some(held)).unwrap());
    }

    #[test]
    fn natural_keys_compare_case_insensitively() {
        let customers = VecStore::<Customer>::default();
        let bob = customers.seed(Customer::new("Bob", "bob@x.com", "01225593234"));
        let taxis = VecStore::<Taxi>::default();
        let cab = taxis.seed(Taxi::new(4, "AB12CDE"));

        assert!(email_taken(&customers, "BOB@x.com", None).unwrap());
        assert!(!email_taken(&customers, "bob@x.com", Some(bob)).unwrap());
        assert!(reg_taken(&taxis, "ab12cde", None).unwrap());
        assert!(!reg_taken(&taxis, "AB12CDE", Some(cab)).unwrap());
    }
}
