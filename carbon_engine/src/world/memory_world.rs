/// In-memory world database.

use std::sync::Mutex;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::resource::ResourceId;
use crate::world::{World, WorldRecord};

struct Tables {
    next_persisted: u32,
    records: FxHashMap<(String, ResourceId), WorldRecord>,
}

/// World database held entirely in memory
pub struct MemoryWorld {
    tables: Mutex<Tables>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                next_persisted: 1,
                records: FxHashMap::default(),
            }),
        }
    }

    /// Number of stored records across all tables
    pub fn record_count(&self) -> usize {
        self.tables.lock().map(|t| t.records.len()).unwrap_or(0)
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for MemoryWorld {
    fn generate_ref_id(&self, internal: bool) -> ResourceId {
        if internal {
            return ResourceId::next_internal();
        }
        match self.tables.lock() {
            Ok(mut tables) => {
                let id = ResourceId(tables.next_persisted);
                tables.next_persisted += 1;
                id
            }
            Err(_) => ResourceId::next_internal(),
        }
    }

    fn read_record(&self, table: &str, id: ResourceId) -> Option<WorldRecord> {
        let tables = self.tables.lock().ok()?;
        tables.records.get(&(table.to_string(), id)).cloned()
    }

    fn write_record(&self, table: &str, id: ResourceId, record: WorldRecord) -> Result<()> {
        if id.is_internal() {
            return Err(Error::InvalidResource(format!(
                "internal id {} cannot be written to table '{}'",
                id, table
            )));
        }
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| Error::InvalidState("world tables poisoned".to_string()))?;
        if id.0 >= tables.next_persisted {
            tables.next_persisted = id.0 + 1;
        }
        tables.records.insert((table.to_string(), id), record);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_world_tests.rs"]
mod tests;
