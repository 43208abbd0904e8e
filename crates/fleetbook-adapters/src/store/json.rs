//! JSON-file record store.
//!
//! Keeps the rows in an [`InMemoryStore`] and rewrites one JSON file per
//! record kind after every successful mutation. The file is written to a
//! sibling temp file first and then renamed over the old one.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument};

use fleetbook_core::{
    application::{ApplicationError, ports::EntityStore},
    domain::{Entity, Query},
    error::FleetResult,
};

use super::memory::{InMemoryStore, Table, raw};

/// On-disk layout of one store file.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<E> {
    next_id: u64,
    records: Vec<E>,
}

/// File-backed store for one record kind.
#[derive(Debug, Clone)]
pub struct JsonFileStore<E> {
    path: PathBuf,
    memory: InMemoryStore<E>,
}

impl<E> JsonFileStore<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    /// Open the store at `path`, starting empty if the file does not exist.
    #[instrument(skip_all, fields(kind = %E::KIND, path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> FleetResult<Self> {
        let path = path.as_ref().to_path_buf();

        let table = match fs::read_to_string(&path) {
            Ok(text) => load(&path, &text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No store file yet, starting empty");
                Table::default()
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        info!(records = table.rows.len(), "Store opened");
        Ok(Self {
            path,
            memory: InMemoryStore::from_table(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Apply `change` and persist; on a failed write the rows are restored.
    fn mutate<T>(&self, change: impl FnOnce(&mut Table<E>) -> FleetResult<T>) -> FleetResult<T> {
        let mut table = self.memory.write()?;
        let before = table.clone();

        let out = change(&mut table)?;
        if let Err(e) = self.persist(&table) {
            *table = before;
            return Err(e);
        }
        Ok(out)
    }

    fn persist(&self, table: &Table<E>) -> FleetResult<()> {
        let snapshot = Snapshot {
            next_id: table.next_id,
            records: table.rows.values().collect::<Vec<_>>(),
        };
        let text = serde_json::to_string_pretty(&snapshot).map_err(|e| {
            ApplicationError::InvalidStoreOperation {
                reason: format!("cannot encode {} records: {e}", E::KIND),
            }
        })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;

        debug!(path = %self.path.display(), records = table.rows.len(), "Store persisted");
        Ok(())
    }
}

impl<E> EntityStore<E> for JsonFileStore<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    fn find_by_id(&self, id: E::Id) -> FleetResult<Option<E>> {
        self.memory.find_by_id(id)
    }

    fn find_all(&self) -> FleetResult<Vec<E>> {
        self.memory.find_all()
    }

    fn find_by(&self, query: &Query) -> FleetResult<Vec<E>> {
        self.memory.find_by(query)
    }

    fn insert(&self, entity: E) -> FleetResult<E::Id> {
        self.mutate(|t| t.insert(entity))
    }

    fn update(&self, entity: E) -> FleetResult<()> {
        self.mutate(|t| t.update(entity))
    }

    fn delete(&self, id: E::Id) -> FleetResult<Option<E>> {
        self.mutate(|t| Ok(t.delete(id)))
    }
}

fn load<E: Entity + DeserializeOwned>(path: &Path, text: &str) -> FleetResult<Table<E>> {
    let snapshot: Snapshot<E> = serde_json::from_str(text).map_err(|e| corrupt(path, e))?;

    let mut table = Table::default();
    for record in snapshot.records {
        let id = record
            .id()
            .ok_or_else(|| corrupt(path, format!("{} record without an id", E::KIND)))?;
        if table.rows.insert(raw(id), record).is_some() {
            return Err(corrupt(path, format!("duplicate {} id {id}", E::KIND)));
        }
    }

    let after_last = match table.rows.keys().next_back() {
        Some(&last) => last.checked_add(1).ok_or_else(|| {
            corrupt(path, format!("{} id {last} leaves no room for another", E::KIND))
        })?,
        None => 1,
    };
    table.next_id = snapshot.next_id.max(after_last);
    Ok(table)
}

pub(super) fn io_error(path: &Path, e: io::Error) -> fleetbook_core::error::FleetError {
    ApplicationError::StoreIo {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

fn corrupt(path: &Path, reason: impl ToString) -> fleetbook_core::error::FleetError {
    ApplicationError::StoreCorrupt {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}
