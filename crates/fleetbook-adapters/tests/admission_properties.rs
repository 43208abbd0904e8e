//! Booking admission properties, exercised end to end over the in-memory
//! stores and the standard rule checker.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use fleetbook_adapters::{FixedClock, Fleet};
use fleetbook_core::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

fn fleet() -> Fleet {
    Fleet::in_memory_with_clock(Arc::new(FixedClock(today())))
}

fn register(fleet: &Fleet, name: &str, email: &str) -> CustomerId {
    fleet
        .customers
        .create(Customer::new(name, email, "01225593234"))
        .unwrap()
        .id
        .unwrap()
}

fn cab(fleet: &Fleet, reg: &str) -> TaxiId {
    fleet.taxis.create(Taxi::new(4, reg)).unwrap().id.unwrap()
}

fn day(n: u64) -> NaiveDate {
    today().checked_add_days(Days::new(n)).unwrap()
}

#[test]
fn dangling_references_are_rejected_without_mutation() {
    let fleet = fleet();
    let bob = register(&fleet, "Bob", "bob@x.com");
    let taxi = cab(&fleet, "AB12CDE");

    for draft in [
        Booking::draft(CustomerId::new(404), taxi, day(10)),
        Booking::draft(bob, TaxiId::new(404), day(10)),
    ] {
        let err = fleet.bookings.create(draft).unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::ReferenceNotFound { .. })
        ));
    }
    assert!(fleet.bookings.find_all_ordered_by_date().unwrap().is_empty());
}

#[test]
fn one_booking_per_taxi_per_day() {
    let fleet = fleet();
    let alice = register(&fleet, "Alice", "alice@x.com");
    let bob = register(&fleet, "Bob", "bob@x.com");
    let taxi = cab(&fleet, "AB12CDE");

    fleet.bookings.create(Booking::draft(alice, taxi, day(5))).unwrap();

    let err = fleet
        .bookings
        .create(Booking::draft(bob, taxi, day(5)))
        .unwrap_err();
    assert_eq!(
        err.as_domain(),
        Some(&DomainError::DuplicateBooking {
            taxi,
            date: day(5)
        })
    );

    assert!(fleet.bookings.create(Booking::draft(bob, taxi, day(6))).is_ok());
}

#[test]
fn update_keeping_own_slot_succeeds() {
    let fleet = fleet();
    let alice = register(&fleet, "Alice", "alice@x.com");
    let bob = register(&fleet, "Bob", "bob@x.com");
    let taxi = cab(&fleet, "AB12CDE");

    let booking = fleet
        .bookings
        .create(Booking::draft(alice, taxi, day(5)))
        .unwrap();
    let id = booking.id.unwrap();

    let updated = fleet
        .bookings
        .update(
            id,
            Booking {
                customer_id: Some(bob),
                ..booking
            },
        )
        .unwrap();

    assert_eq!(updated.customer_id, Some(bob));
    assert_eq!(fleet.bookings.find_by_id(id).unwrap(), Some(updated));
}

#[test]
fn booking_dates_must_be_strictly_in_the_future() {
    let fleet = fleet();
    let bob = register(&fleet, "Bob", "bob@x.com");
    let taxi = cab(&fleet, "AB12CDE");

    for date in [today(), today().pred_opt().unwrap()] {
        let err = fleet
            .bookings
            .create(Booking::draft(bob, taxi, date))
            .unwrap_err();
        let violations = err.violations().expect("field violation");
        assert!(violations.contains("date"));
    }
}

#[test]
fn find_by_id_returns_what_create_returned() {
    let fleet = fleet();
    let bob = register(&fleet, "Bob", "bob@x.com");
    let taxi = cab(&fleet, "AB12CDE");

    let created = fleet
        .bookings
        .create(Booking::draft(bob, taxi, day(1)))
        .unwrap();
    assert_eq!(
        fleet.bookings.find_by_id(created.id.unwrap()).unwrap(),
        Some(created)
    );
}

#[test]
fn deleted_booking_is_gone() {
    let fleet = fleet();
    let bob = register(&fleet, "Bob", "bob@x.com");
    let taxi = cab(&fleet, "AB12CDE");

    let id = fleet
        .bookings
        .create(Booking::draft(bob, taxi, day(1)))
        .unwrap()
        .id
        .unwrap();

    fleet.bookings.delete(id).unwrap();
    assert_eq!(fleet.bookings.find_by_id(id).unwrap(), None);

    // The slot is free again.
    assert!(fleet.bookings.create(Booking::draft(bob, taxi, day(1))).is_ok());
}

#[test]
fn bob_books_a_taxi() {
    let fleet = Fleet::in_memory();

    let bob = register(&fleet, "Bob", "bob@x.com");
    let taxi = cab(&fleet, "AB12CDE");
    let new_year = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();

    let booking = fleet
        .bookings
        .create(Booking::draft(bob, taxi, new_year))
        .unwrap();
    assert!(booking.is_committed());

    let carol = register(&fleet, "Carol", "carol@x.com");
    let err = fleet
        .bookings
        .create(Booking::draft(carol, taxi, new_year))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Conflict);
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::DuplicateBooking { .. })
    ));

    let err = fleet
        .bookings
        .create(Booking::draft(bob, TaxiId::new(999_999), new_year))
        .unwrap_err();
    assert_eq!(
        err.as_domain(),
        Some(&DomainError::ReferenceNotFound {
            kind: EntityKind::Taxi,
            id: 999_999
        })
    );
}

#[test]
fn customers_are_never_deleted() {
    let fleet = fleet();
    let bob = register(&fleet, "Bob", "bob@x.com");

    let kept = fleet.customers.delete(bob).unwrap();
    assert_eq!(fleet.customers.find_by_id(bob).unwrap(), Some(kept));
}

#[test]
fn standard_rules_guard_registration() {
    let fleet = fleet();

    let err = fleet.taxis.create(Taxi::new(1, "AB12CDE")).unwrap_err();
    assert_eq!(
        err.violations().and_then(|v| v.get("seats")),
        Some("The minimum number of seats is 2")
    );

    let err = fleet
        .customers
        .create(Customer::new("Bob", "not-an-email", "01225593234"))
        .unwrap_err();
    assert!(err.violations().unwrap().contains("email"));
}

#[test]
fn padded_natural_keys_are_stored_as_checked() {
    let fleet = fleet();

    let taxi = fleet.taxis.create(Taxi::new(4, "  AB12CDE  ")).unwrap();
    let stored = fleet.taxis.find_by_id(taxi.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored.reg.chars().count(), Taxi::REG_LEN);

    let bob = fleet
        .customers
        .create(Customer::new("Bob", " bob@x.com ", " 01225593234 "))
        .unwrap();
    assert_eq!(bob.email, "bob@x.com");
    assert_eq!(bob.phone, "01225593234");

    // The padded duplicate still collides with the stored key.
    let err = fleet.taxis.create(Taxi::new(6, " ab12cde")).unwrap_err();
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::DuplicateRegistration { .. })
    ));
}
