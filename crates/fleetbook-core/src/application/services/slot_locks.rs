//! Keyed lock table used to serialize check-then-write sequences.
//!
//! Admission reads the store and then writes to it; two callers racing on the
//! same key could both pass the check. Holding the key's lock across the whole
//! sequence closes that window while leaving unrelated keys concurrent.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::{application::ApplicationError, error::FleetResult};

/// One mutex per key, created on first use and dropped once no caller
/// holds or waits on it.
pub struct SlotLocks<K> {
    table: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for SlotLocks<K> {
    fn default() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> SlotLocks<K>
where
    K: Eq + Hash + Ord + Clone + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the locks for every key in `keys`.
    ///
    /// Keys are deduplicated and taken in ascending order, so two callers
    /// asking for overlapping sets cannot deadlock.
    pub fn with_keys<T>(&self, keys: &[K], f: impl FnOnce() -> FleetResult<T>) -> FleetResult<T> {
        let mut keys = keys.to_vec();
        keys.sort();
        keys.dedup();

        let handles = {
            let mut table = self
                .table
                .lock()
                .map_err(|_| ApplicationError::StoreLockError)?;
            keys.iter()
                .map(|k| Arc::clone(table.entry(k.clone()).or_default()))
                .collect::<Vec<_>>()
        };

        let out = hold(&handles, &keys, f);
        drop(handles);
        self.prune(&keys);
        out
    }

    /// Run `f` while holding the lock for `key`.
    pub fn with_key<T>(&self, key: K, f: impl FnOnce() -> FleetResult<T>) -> FleetResult<T> {
        self.with_keys(&[key], f)
    }

    /// Forget every key in `keys` that only the table still refers to.
    fn prune(&self, keys: &[K]) {
        let Ok(mut table) = self.table.lock() else {
            return;
        };
        for key in keys {
            if table.get(key).is_some_and(|h| Arc::strong_count(h) == 1) {
                table.remove(key);
            }
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.table.lock().map(|t| t.len()).unwrap_or(0)
    }
}

fn hold<K: std::fmt::Debug, T>(
    handles: &[Arc<Mutex<()>>],
    keys: &[K],
    f: impl FnOnce() -> FleetResult<T>,
) -> FleetResult<T> {
    let mut guards = Vec::with_capacity(handles.len());
    for handle in handles {
        guards.push(handle.lock().map_err(|_| ApplicationError::StoreLockError)?);
    }
    trace!(?keys, "Slot locks held");

    f()
}
