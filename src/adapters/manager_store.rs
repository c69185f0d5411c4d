use crate::core::fields::is_manager_id;
use crate::domain::model::{Employee, Manager};
use crate::domain::ports::ManagerLookup;
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Managers held in memory, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemoryManagerStore {
    managers: HashMap<String, Manager>,
}

impl InMemoryManagerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the manager with the same identifier.
    pub fn insert(&mut self, manager: Manager) {
        self.managers.insert(manager.id().to_string(), manager);
    }

    pub fn get(&self, id: &str) -> Option<&Manager> {
        self.managers.get(id)
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

impl FromIterator<Manager> for InMemoryManagerStore {
    fn from_iter<I: IntoIterator<Item = Manager>>(iter: I) -> Self {
        let mut store = Self::new();
        for manager in iter {
            store.insert(manager);
        }
        store
    }
}

impl ManagerLookup for InMemoryManagerStore {
    fn find_manager(&self, id: &str) -> Result<Option<Manager>> {
        Ok(self.managers.get(id).cloned())
    }
}

/// Row layout of a manager store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredManager {
    id: String,
    last_name: String,
    first_name: String,
    hire_date: NaiveDate,
    salary: f64,
}

impl From<StoredManager> for Manager {
    fn from(row: StoredManager) -> Self {
        Manager {
            employee: Employee {
                id: row.id,
                last_name: row.last_name,
                first_name: row.first_name,
                hire_date: row.hire_date,
                salary: row.salary,
            },
        }
    }
}

impl From<&Manager> for StoredManager {
    fn from(manager: &Manager) -> Self {
        let e = &manager.employee;
        StoredManager {
            id: e.id.clone(),
            last_name: e.last_name.clone(),
            first_name: e.first_name.clone(),
            hire_date: e.hire_date,
            salary: e.salary,
        }
    }
}

/// Managers persisted by earlier runs, read from a CSV file with header
/// `id,last_name,first_name,hire_date,salary` (ISO dates).
#[derive(Debug, Clone, Default)]
pub struct CsvManagerStore {
    inner: InMemoryManagerStore,
}

impl CsvManagerStore {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        tracing::debug!("Loading manager store from {}", path.as_ref().display());
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut inner = InMemoryManagerStore::new();
        for row in csv_reader.deserialize::<StoredManager>() {
            let row = row?;
            if !is_manager_id(&row.id) {
                tracing::warn!("Skipping store row with non-manager identifier: {}", row.id);
                continue;
            }
            inner.insert(row.into());
        }

        tracing::info!("📇 Loaded {} managers from store", inner.len());
        Ok(Self { inner })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ManagerLookup for CsvManagerStore {
    fn find_manager(&self, id: &str) -> Result<Option<Manager>> {
        self.inner.find_manager(id)
    }
}

/// Renders managers in the store file layout, so a run's output can seed the next run.
pub fn managers_to_csv<'a, I>(managers: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Manager>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for manager in managers {
        writer.serialize(StoredManager::from(manager))?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| crate::utils::error::EtlError::IoError(e.into_error()))
}
