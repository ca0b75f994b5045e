/// Database-backed resource loading.
///
/// Materials, meshes and animation sets are keyed by the reference id of
/// their source record in a world database rather than by name. A load
/// either adopts the resident instance, clones it to a fresh id, or builds
/// a new instance that pulls its record from the world when loaded.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::resource::{
    should_force_internal, ResourceFlags, ResourceId, ResourceKey, ResourceKind, ResourceManager,
};
use crate::system::StreamType;
use crate::world::World;
use crate::engine_error;

/// Outcome of resolving a database load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DatabaseLoad {
    /// Hand out the resident instance as is
    Existing(ResourceKey),
    /// Copy the resident instance to a fresh id
    Clone {
        key: ResourceKey,
        dest: ResourceId,
        stream_type: StreamType,
    },
    /// Build a new instance reading the source record on load
    Fresh { dest: ResourceId },
}

/// Resource name of a database-backed resource
pub fn database_resource_name(table: &str, id: ResourceId) -> String {
    format!("{}({})", table, id)
}

impl ResourceManager {
    /// Decide how to satisfy a load by source reference id
    ///
    /// `label` names the resource family in error messages ("material",
    /// "mesh", ...).
    pub(crate) fn resolve_database_load(
        &mut self,
        kind: ResourceKind,
        label: &str,
        world: Option<&Arc<dyn World>>,
        source_ref: ResourceId,
        internal: bool,
        flags: ResourceFlags,
    ) -> Result<DatabaseLoad> {
        self.pump_releases();
        if source_ref.is_none() {
            return Err(Error::InvalidResource(format!("cannot load a {} without a source reference id", label)));
        }
        let mut internal = internal || world.is_none();
        let force_new = flags.contains(ResourceFlags::FORCE_NEW);

        if let Some(key) = self.find_by_id(kind, source_ref) {
            let existing_internal = source_ref.is_internal();
            if !force_new && internal == existing_internal {
                return Ok(DatabaseLoad::Existing(key));
            }
            if should_force_internal(self.sandbox_mode(), true) {
                internal = true;
            }
            let dest = Self::generate_ref_id(world, internal);
            let stream_type = if existing_internal { StreamType::Memory } else { StreamType::File };
            return Ok(DatabaseLoad::Clone { key, dest, stream_type });
        }

        if world.is_none() {
            engine_error!(
                "carbon::ResourceManager",
                "Unable to load {} resource '{}' because no valid world database was supplied.",
                label, source_ref
            );
            return Err(Error::InvalidState(format!("no world database to load {} {} from", label, source_ref)));
        }
        if source_ref.is_internal() {
            engine_error!(
                "carbon::ResourceManager",
                "Unable to load {} resource '{}' because the requested source reference identifier indicated an internal resource that was not resident for cloning.",
                label, source_ref
            );
            return Err(Error::InvalidState(format!("internal {} {} is not resident", label, source_ref)));
        }

        if should_force_internal(self.sandbox_mode(), force_new) {
            internal = true;
        }
        let dest = if force_new || internal {
            Self::generate_ref_id(world, internal)
        } else {
            source_ref
        };
        Ok(DatabaseLoad::Fresh { dest })
    }

    /// Id for a resource created from scratch (`create_*`, `clone_*`)
    ///
    /// Fails when a persisted id is wanted but there is no world to issue
    /// it.
    pub(crate) fn new_database_id(
        &self,
        label: &str,
        world: Option<&Arc<dyn World>>,
        internal: bool,
    ) -> Result<ResourceId> {
        if !internal && world.is_none() {
            engine_error!(
                "carbon::ResourceManager",
                "Unable to create persisted {} because no valid world database was supplied.",
                label
            );
            return Err(Error::InvalidState(format!("a persisted {} requires a world database", label)));
        }
        let internal = internal || should_force_internal(self.sandbox_mode(), true);
        Ok(Self::generate_ref_id(world, internal))
    }
}
