//! Test doubles shared by the core unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::{
    application::{
        ApplicationError,
        ports::{EntityStore, MockClock, MockFieldChecker},
    },
    domain::{DomainError, Entity, FieldViolations, Query},
    error::FleetResult,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A clock stuck on the given day.
pub fn today_is(y: i32, m: u32, d: u32) -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_today().return_const(date(y, m, d));
    clock
}

/// A checker with no rules of its own.
pub fn permissive_checker() -> MockFieldChecker {
    let mut checker = MockFieldChecker::new();
    checker
        .expect_check_customer()
        .returning(|_| FieldViolations::new());
    checker.expect_check_taxi().returning(|_| FieldViolations::new());
    checker
        .expect_check_booking()
        .returning(|_| FieldViolations::new());
    checker
}

/// Minimal store keyed by raw id.
pub struct VecStore<E> {
    rows: Mutex<(u64, BTreeMap<u64, E>)>,
}

impl<E> Default for VecStore<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new((0, BTreeMap::new())),
        }
    }
}

impl<E: Entity> VecStore<E> {
    pub fn seed(&self, entity: E) -> E::Id {
        self.insert(entity).unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().1.is_empty()
    }
}

impl<E: Entity> EntityStore<E> for VecStore<E> {
    fn find_by_id(&self, id: E::Id) -> FleetResult<Option<E>> {
        Ok(self.rows.lock().unwrap().1.get(&raw(id)).cloned())
    }

    fn find_all(&self) -> FleetResult<Vec<E>> {
        Ok(self.rows.lock().unwrap().1.values().cloned().collect())
    }

    fn find_by(&self, query: &Query) -> FleetResult<Vec<E>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .1
            .values()
            .filter(|e| e.matches(query))
            .cloned()
            .collect())
    }

    fn insert(&self, entity: E) -> FleetResult<E::Id> {
        let mut guard = self.rows.lock().unwrap();
        guard.0 += 1;
        let raw = guard.0;
        let id = E::Id::from(raw);
        guard.1.insert(raw, entity.with_id(id));
        Ok(id)
    }

    fn update(&self, entity: E) -> FleetResult<()> {
        let mut guard = self.rows.lock().unwrap();
        let id = entity.id().ok_or_else(|| ApplicationError::InvalidStoreOperation {
            reason: "update without id".into(),
        })?;
        match guard.1.get_mut(&raw(id)) {
            Some(row) => {
                *row = entity;
                Ok(())
            }
            None => Err(DomainError::not_found(E::KIND, id).into()),
        }
    }

    fn delete(&self, id: E::Id) -> FleetResult<Option<E>> {
        Ok(self.rows.lock().unwrap().1.remove(&raw(id)))
    }
}

fn raw<I: Into<u64>>(id: I) -> u64 {
    id.into()
}

/// A store whose every call fails as if the backend were down.
pub struct DownStore;

impl<E: Entity> EntityStore<E> for DownStore {
    fn find_by_id(&self, _id: E::Id) -> FleetResult<Option<E>> {
        Err(down())
    }

    fn find_all(&self) -> FleetResult<Vec<E>> {
        Err(down())
    }

    fn find_by(&self, _query: &Query) -> FleetResult<Vec<E>> {
        Err(down())
    }

    fn insert(&self, _entity: E) -> FleetResult<E::Id> {
        Err(down())
    }

    fn update(&self, _entity: E) -> FleetResult<()> {
        Err(down())
    }

    fn delete(&self, _id: E::Id) -> FleetResult<Option<E>> {
        Err(down())
    }
}

fn down() -> crate::error::FleetError {
    ApplicationError::StoreUnavailable {
        reason: "connection refused".into(),
    }
    .into()
}
