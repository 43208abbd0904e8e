//! In-memory record store.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::trace;

use fleetbook_core::{
    application::{ApplicationError, ports::EntityStore},
    domain::{DomainError, Entity, Query},
    error::FleetResult,
};

/// Rows of one record kind plus the id sequence.
///
/// Ids start at 1 and are never handed out twice, even after a delete.
#[derive(Debug, Clone)]
pub(crate) struct Table<E> {
    pub(crate) next_id: u64,
    pub(crate) rows: BTreeMap<u64, E>,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<E: Entity> Table<E> {
    pub(crate) fn insert(&mut self, entity: E) -> FleetResult<E::Id> {
        let raw = self.next_id;
        self.next_id = raw
            .checked_add(1)
            .ok_or_else(|| ApplicationError::InvalidStoreOperation {
                reason: format!("{} id sequence exhausted", E::KIND),
            })?;
        let id = E::Id::from(raw);
        self.rows.insert(raw, entity.with_id(id));
        Ok(id)
    }

    pub(crate) fn update(&mut self, entity: E) -> FleetResult<()> {
        let id = entity
            .id()
            .ok_or_else(|| ApplicationError::InvalidStoreOperation {
                reason: format!("cannot update a {} without an id", E::KIND),
            })?;

        match self.rows.get_mut(&raw(id)) {
            Some(row) => {
                *row = entity;
                Ok(())
            }
            None => Err(DomainError::not_found(E::KIND, id).into()),
        }
    }

    pub(crate) fn delete(&mut self, id: E::Id) -> Option<E> {
        self.rows.remove(&raw(id))
    }

    fn find_by_id(&self, id: E::Id) -> Option<E> {
        self.rows.get(&raw(id)).cloned()
    }

    fn find_by(&self, query: &Query) -> Vec<E> {
        self.rows
            .values()
            .filter(|e| e.matches(query))
            .cloned()
            .collect()
    }
}

pub(crate) fn raw<I: Into<u64>>(id: I) -> u64 {
    id.into()
}

/// Thread-safe in-memory store for one record kind.
///
/// Clones share the same rows.
#[derive(Debug, Clone)]
pub struct InMemoryStore<E> {
    inner: Arc<RwLock<Table<E>>>,
}

impl<E: Entity> InMemoryStore<E> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Table::default())),
        }
    }

    pub(crate) fn from_table(table: Table<E>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record. The id sequence keeps counting.
    pub fn clear(&self) -> FleetResult<()> {
        self.write()?.rows.clear();
        Ok(())
    }

    pub(crate) fn read(&self) -> FleetResult<RwLockReadGuard<'_, Table<E>>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    pub(crate) fn write(&self) -> FleetResult<RwLockWriteGuard<'_, Table<E>>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityStore<E> for InMemoryStore<E> {
    fn find_by_id(&self, id: E::Id) -> FleetResult<Option<E>> {
        Ok(self.read()?.find_by_id(id))
    }

    fn find_all(&self) -> FleetResult<Vec<E>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn find_by(&self, query: &Query) -> FleetResult<Vec<E>> {
        let found = self.read()?.find_by(query);
        trace!(kind = %E::KIND, %query, hits = found.len(), "Store query");
        Ok(found)
    }

    fn insert(&self, entity: E) -> FleetResult<E::Id> {
        self.write()?.insert(entity)
    }

    fn update(&self, entity: E) -> FleetResult<()> {
        self.write()?.update(entity)
    }

    fn delete(&self, id: E::Id) -> FleetResult<Option<E>> {
        Ok(self.write()?.delete(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleetbook_core::domain::{Booking, BookingId, Customer, CustomerId, Taxi, TaxiId};

    fn booking(taxi: u64, day: u32) -> Booking {
        Booking::draft(
            CustomerId::new(1),
            TaxiId::new(taxi),
            NaiveDate::from_ymd_opt(2099, 1, day).unwrap(),
        )
    }

    #[test]
    fn ids_start_at_one_and_are_not_reused() {
        let store = InMemoryStore::<Taxi>::new();
        let a = store.insert(Taxi::new(4, "AB12CDE")).unwrap();
        let b = store.insert(Taxi::new(4, "AB12CDF")).unwrap();
        assert_eq!((a, b), (TaxiId::new(1), TaxiId::new(2)));

        store.delete(b).unwrap();
        let c = store.insert(Taxi::new(4, "AB12CDG")).unwrap();
        assert_eq!(c, TaxiId::new(3));
    }

    #[test]
    fn exhausted_sequence_is_an_error_not_a_wrap() {
        let store = InMemoryStore::<Taxi>::from_table(Table {
            next_id: u64::MAX,
            rows: BTreeMap::new(),
        });

        let err = store.insert(Taxi::new(4, "AB12CDE")).unwrap_err();
        assert!(!err.is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn insert_overrides_caller_id() {
        let store = InMemoryStore::<Taxi>::new();
        let id = store
            .insert(Taxi::new(4, "AB12CDE").with_id(TaxiId::new(50)))
            .unwrap();
        assert_eq!(id, TaxiId::new(1));
        assert_eq!(store.find_by_id(TaxiId::new(50)).unwrap(), None);
    }

    #[test]
    fn update_of_absent_id_is_not_found() {
        let store = InMemoryStore::<Booking>::new();
        let err = store
            .update(booking(1, 1).with_id(BookingId::new(9)))
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn update_without_id_is_an_internal_error() {
        let store = InMemoryStore::<Booking>::new();
        let err = store.update(booking(1, 1)).unwrap_err();
        assert!(!err.is_validation());
    }

    #[test]
    fn find_by_filters_on_foreign_key() {
        let store = InMemoryStore::<Booking>::new();
        store.insert(booking(1, 1)).unwrap();
        store.insert(booking(2, 1)).unwrap();
        store.insert(booking(1, 2)).unwrap();

        let hits = store.find_by(&Query::Taxi(TaxiId::new(1))).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|b| b.taxi_id == Some(TaxiId::new(1))));
    }

    #[test]
    fn clones_share_rows() {
        let store = InMemoryStore::<Customer>::new();
        let other = store.clone();
        store
            .insert(Customer::new("Bob", "bob@x.com", "01225593234"))
            .unwrap();
        assert_eq!(other.len(), 1);

        other.clear().unwrap();
        assert!(store.is_empty());
    }
}
