//! Integration tests for fleetbook-core through its public API only.
//!
//! The core ships no store of its own, so these tests bring a minimal one.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use fleetbook_core::prelude::*;

struct MapStore<E> {
    rows: Mutex<BTreeMap<u64, E>>,
}

impl<E> Default for MapStore<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<E: Entity> EntityStore<E> for MapStore<E> {
    fn find_by_id(&self, id: E::Id) -> FleetResult<Option<E>> {
        let key: u64 = id.into();
        Ok(self.rows.lock().unwrap().get(&key).cloned())
    }

    fn find_all(&self) -> FleetResult<Vec<E>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    fn find_by(&self, query: &Query) -> FleetResult<Vec<E>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.matches(query))
            .cloned()
            .collect())
    }

    fn insert(&self, entity: E) -> FleetResult<E::Id> {
        let mut rows = self.rows.lock().unwrap();
        let next: u64 = rows.keys().next_back().map_or(1, |k| k + 1);
        let id = E::Id::from(next);
        rows.insert(next, entity.with_id(id));
        Ok(id)
    }

    fn update(&self, entity: E) -> FleetResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let key: u64 = match entity.id() {
            Some(id) => id.into(),
            None => return Err(DomainError::not_found(E::KIND, 0u64).into()),
        };
        match rows.get_mut(&key) {
            Some(row) => {
                *row = entity;
                Ok(())
            }
            None => Err(DomainError::not_found(E::KIND, key).into()),
        }
    }

    fn delete(&self, id: E::Id) -> FleetResult<Option<E>> {
        let key: u64 = id.into();
        Ok(self.rows.lock().unwrap().remove(&key))
    }
}

struct NoRules;

impl FieldChecker for NoRules {
    fn check_customer(&self, _: &Customer) -> FieldViolations {
        FieldViolations::new()
    }
    fn check_taxi(&self, _: &Taxi) -> FieldViolations {
        FieldViolations::new()
    }
    fn check_booking(&self, _: &Booking) -> FieldViolations {
        FieldViolations::new()
    }
}

struct Today(NaiveDate);

impl Clock for Today {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct World {
    customers: CustomerService,
    taxis: TaxiService,
    bookings: BookingService,
}

fn world() -> World {
    let customers: Arc<MapStore<Customer>> = Arc::default();
    let taxis: Arc<MapStore<Taxi>> = Arc::default();
    let bookings: Arc<MapStore<Booking>> = Arc::default();
    let checker: Arc<dyn FieldChecker> = Arc::new(NoRules);

    World {
        customers: CustomerService::new(customers.clone(), checker.clone()),
        taxis: TaxiService::new(taxis.clone(), checker.clone()),
        bookings: BookingService::new(
            bookings,
            customers,
            taxis,
            checker,
            Arc::new(Today(date(2030, 1, 1))),
        ),
    }
}

#[test]
fn services_work_over_any_store() {
    let w = world();
    let bob = w
        .customers
        .create(Customer::new("Bob", "bob@x.com", "01225593234"))
        .unwrap();
    let cab = w.taxis.create(Taxi::new(4, "AB12CDE")).unwrap();

    let booking = w
        .bookings
        .create(Booking::draft(
            bob.id.unwrap(),
            cab.id.unwrap(),
            date(2030, 1, 2),
        ))
        .unwrap();

    assert!(booking.is_committed());
    assert_eq!(w.bookings.find_by_taxi(cab.id.unwrap()).unwrap(), vec![booking]);
}

#[test]
fn errors_carry_their_category() {
    let w = world();
    let bob = w
        .customers
        .create(Customer::new("Bob", "bob@x.com", "01225593234"))
        .unwrap();

    let err = w
        .bookings
        .create(Booking::draft(bob.id.unwrap(), TaxiId::new(7), date(2030, 1, 2)))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Conflict);

    let err = w.bookings.delete(BookingId::new(7)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);

    let err = w
        .bookings
        .create(Booking::draft(bob.id.unwrap(), TaxiId::new(7), date(2029, 12, 31)))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[test]
fn version_is_exposed() {
    assert_eq!(fleetbook_core::VERSION, env!("CARGO_PKG_VERSION"));
}
