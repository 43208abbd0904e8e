//! Wiring: builds the three services over one set of stores.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use fleetbook_core::{
    application::{
        BookingService, CustomerService, TaxiService,
        ports::{Clock, EntityStore, FieldChecker},
    },
    domain::{Booking, Customer, Taxi},
    error::FleetResult,
};

use crate::{
    clock::SystemClock,
    store::{DirLock, InMemoryStore, JsonFileStore},
    validation::RuleChecker,
};

pub const CUSTOMERS_FILE: &str = "customers.json";
pub const TAXIS_FILE: &str = "taxis.json";
pub const BOOKINGS_FILE: &str = "bookings.json";

/// The services of one running fleetbook instance.
pub struct Fleet {
    pub customers: CustomerService,
    pub taxis: TaxiService,
    pub bookings: BookingService,
    /// Held for the fleet's lifetime when backed by a data directory.
    _lock: Option<DirLock>,
}

impl Fleet {
    /// Wire the services over arbitrary stores, checker and clock.
    pub fn new(
        customers: Arc<dyn EntityStore<Customer>>,
        taxis: Arc<dyn EntityStore<Taxi>>,
        bookings: Arc<dyn EntityStore<Booking>>,
        checker: Arc<dyn FieldChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            customers: CustomerService::new(customers.clone(), checker.clone()),
            taxis: TaxiService::new(taxis.clone(), checker.clone()),
            bookings: BookingService::new(bookings, customers, taxis, checker, clock),
            _lock: None,
        }
    }

    /// Ephemeral stores, standard rules, system clock.
    pub fn in_memory() -> Self {
        Self::in_memory_with_clock(Arc::new(SystemClock))
    }

    pub fn in_memory_with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(InMemoryStore::<Customer>::new()),
            Arc::new(InMemoryStore::<Taxi>::new()),
            Arc::new(InMemoryStore::<Booking>::new()),
            Arc::new(RuleChecker),
            clock,
        )
    }

    /// JSON files under `data_dir`, standard rules, system clock.
    ///
    /// Takes the directory's [`DirLock`] before loading anything and keeps
    /// it until the fleet is dropped, so another process opening the same
    /// directory waits and then loads this one's writes.
    pub fn open(data_dir: impl AsRef<Path>) -> FleetResult<Self> {
        Self::open_with_clock(data_dir, Arc::new(SystemClock))
    }

    pub fn open_with_clock(data_dir: impl AsRef<Path>, clock: Arc<dyn Clock>) -> FleetResult<Self> {
        let dir = data_dir.as_ref();
        let lock = DirLock::acquire(dir)?;
        info!(data_dir = %dir.display(), "Opening fleet data");

        let mut fleet = Self::new(
            Arc::new(JsonFileStore::<Customer>::open(dir.join(CUSTOMERS_FILE))?),
            Arc::new(JsonFileStore::<Taxi>::open(dir.join(TAXIS_FILE))?),
            Arc::new(JsonFileStore::<Booking>::open(dir.join(BOOKINGS_FILE))?),
            Arc::new(RuleChecker),
            clock,
        );
        fleet._lock = Some(lock);
        Ok(fleet)
    }
}
