/// World database collaborator.
///
/// Database-backed resources (materials, meshes, animation sets) are keyed
/// by 32-bit reference ids. The world stores their records and issues new
/// ids, either internal (memory only, never persisted) or persisted.

use crate::error::Result;
use crate::resource::ResourceId;

/// Editor sandbox mode
///
/// Outside `Enabled` (full sandbox editing), newly requested database
/// resources always collapse to internal ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SandboxMode {
    #[default]
    Disabled,
    Preview,
    Enabled,
}

/// One row of a world table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldRecord {
    pub name: String,
    /// Raw payload (interpretation depends on the table)
    pub data: Vec<u8>,
    /// Other database resources this record depends on
    pub references: Vec<ResourceId>,
}

/// Persistent store for database-backed resources
pub trait World: Send + Sync {
    /// Issue a fresh reference id
    fn generate_ref_id(&self, internal: bool) -> ResourceId;

    /// Fetch a record
    fn read_record(&self, table: &str, id: ResourceId) -> Option<WorldRecord>;

    /// Store (or replace) a record
    fn write_record(&self, table: &str, id: ResourceId, record: WorldRecord) -> Result<()>;
}
