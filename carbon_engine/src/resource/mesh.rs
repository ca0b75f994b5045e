/// Mesh resources.
///
/// A mesh record (`DataSources::Mesh`) stores the vertex and index counts
/// as two u32 words and lists the materials it uses as
/// record references. Loading a mesh creates its vertex and index buffers
/// and loads its materials, all held as child handles; unloading drops
/// them so they flow into the garbage schedule on their own delays.

use std::any::Any;
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::render_driver::{BufferFormat, MemoryPool};
use crate::resource::database::{database_resource_name, DatabaseLoad};
use crate::resource::{
    BufferHandle, BufferUsage, DebugSource, MaterialHandle, MaterialType, Resource, ResourceFlags,
    ResourceHandle, ResourceId, ResourceKind, ResourceManager,
};
use crate::system::StreamType;
use crate::world::{World, WorldRecord};
use crate::debug_source;

pub type MeshHandle = ResourceHandle<Mesh>;

/// World table holding mesh records
pub const MESH_TABLE: &str = "DataSources::Mesh";

/// Bytes per vertex of the mesh vertex layout
pub const MESH_VERTEX_STRIDE: u32 = 32;

pub struct Mesh {
    ref_id: ResourceId,
    source_ref: Option<ResourceId>,
    world: Option<Arc<dyn World>>,
    name: String,
    vertex_count: u32,
    index_count: u32,
    material_refs: Vec<ResourceId>,
    persist_on_load: bool,

    vertex_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
    materials: Vec<MaterialHandle>,
}

impl Mesh {
    /// Mesh described in memory
    pub fn new(
        ref_id: ResourceId,
        world: Option<Arc<dyn World>>,
        name: &str,
        vertex_count: u32,
        index_count: u32,
        material_refs: Vec<ResourceId>,
    ) -> Self {
        Self {
            ref_id,
            source_ref: None,
            persist_on_load: world.is_some() && !ref_id.is_internal(),
            world,
            name: name.to_string(),
            vertex_count,
            index_count,
            material_refs,
            vertex_buffer: None,
            index_buffer: None,
            materials: Vec::new(),
        }
    }

    fn from_source(ref_id: ResourceId, world: Option<Arc<dyn World>>, source_ref: ResourceId) -> Self {
        let mut mesh = Self::new(ref_id, world, "", 0, 0, Vec::new());
        mesh.source_ref = Some(source_ref);
        mesh.persist_on_load = ref_id != source_ref && !ref_id.is_internal();
        mesh
    }

    fn clone_from(ref_id: ResourceId, world: Option<Arc<dyn World>>, other: &Mesh) -> Self {
        Self::new(
            ref_id,
            world,
            &other.name,
            other.vertex_count,
            other.index_count,
            other.material_refs.clone(),
        )
    }

    pub fn ref_id(&self) -> ResourceId {
        self.ref_id
    }

    pub fn source_ref(&self) -> Option<ResourceId> {
        self.source_ref
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn material_refs(&self) -> &[ResourceId] {
        &self.material_refs
    }

    pub fn vertex_buffer(&self) -> Option<&BufferHandle> {
        self.vertex_buffer.as_ref()
    }

    pub fn index_buffer(&self) -> Option<&BufferHandle> {
        self.index_buffer.as_ref()
    }

    /// Materials held by the loaded mesh
    pub fn materials(&self) -> &[MaterialHandle] {
        &self.materials
    }

    fn record(&self) -> WorldRecord {
        let counts = [self.vertex_count, self.index_count];
        WorldRecord {
            name: self.name.clone(),
            data: bytemuck::cast_slice(&counts).to_vec(),
            references: self.material_refs.clone(),
        }
    }

    fn apply_record(&mut self, record: WorldRecord) -> Result<()> {
        if record.data.len() < 8 {
            return Err(Error::InvalidResource(format!(
                "mesh record '{}' holds {} byte(s), expected 8",
                record.name,
                record.data.len()
            )));
        }
        let counts: [u32; 2] = bytemuck::pod_read_unaligned(&record.data[..8]);
        self.vertex_count = counts[0];
        self.index_count = counts[1];
        self.name = record.name;
        self.material_refs = record.references;
        Ok(())
    }
}

impl Resource for Mesh {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Mesh
    }

    fn load(&mut self, manager: &mut ResourceManager) -> Result<()> {
        if let Some(source_ref) = self.source_ref {
            let world = self.world.as_ref().ok_or_else(|| {
                Error::InvalidState(format!("mesh {} has no world database", source_ref))
            })?;
            let record = world
                .read_record(MESH_TABLE, source_ref)
                .ok_or_else(|| Error::NotFound(database_resource_name(MESH_TABLE, source_ref)))?;
            self.apply_record(record)?;
        }

        let vertex_bytes = self.vertex_count.checked_mul(MESH_VERTEX_STRIDE).ok_or_else(|| {
            Error::InvalidResource(format!("mesh {} vertex count {} overflows its buffer size", self.ref_id, self.vertex_count))
        })?;
        let index_bytes = self.index_count.checked_mul(BufferFormat::R32_UINT.size_bytes()).ok_or_else(|| {
            Error::InvalidResource(format!("mesh {} index count {} overflows its buffer size", self.ref_id, self.index_count))
        })?;

        if self.vertex_count > 0 {
            self.vertex_buffer = Some(manager.create_vertex_buffer(
                vertex_bytes,
                BufferUsage::WRITE_ONLY,
                MemoryPool::Managed,
                debug_source!(),
            )?);
        }
        if self.index_count > 0 {
            self.index_buffer = Some(manager.create_index_buffer(
                index_bytes,
                BufferUsage::WRITE_ONLY,
                BufferFormat::R32_UINT,
                MemoryPool::Managed,
                debug_source!(),
            )?);
        }

        let mut materials = Vec::with_capacity(self.material_refs.len());
        for material_ref in &self.material_refs {
            materials.push(manager.load_material(
                self.world.clone(),
                MaterialType::Standard,
                *material_ref,
                material_ref.is_internal(),
                ResourceFlags::empty(),
                debug_source!(),
            )?);
        }
        self.materials = materials;

        if self.persist_on_load {
            if let Some(world) = &self.world {
                world.write_record(MESH_TABLE, self.ref_id, self.record())?;
            }
            self.persist_on_load = false;
        }
        Ok(())
    }

    fn unload(&mut self) {
        self.vertex_buffer = None;
        self.index_buffer = None;
        self.materials.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    /// Load the mesh stored as `source_ref`
    ///
    /// Follows the same reuse/clone/fresh rules as `load_material`.
    pub fn load_mesh(
        &mut self,
        world: Option<Arc<dyn World>>,
        source_ref: ResourceId,
        internal: bool,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<MeshHandle> {
        let plan = self.resolve_database_load(
            ResourceKind::Mesh,
            "mesh",
            world.as_ref(),
            source_ref,
            internal,
            flags,
        )?;
        match plan {
            DatabaseLoad::Existing(key) => self.process_existing(key, flags),
            DatabaseLoad::Clone { key, dest, stream_type } => {
                let mesh = self
                    .cell(key)
                    .and_then(|cell| {
                        let object = cell.object();
                        object
                            .as_any()
                            .downcast_ref::<Mesh>()
                            .map(|m| Mesh::clone_from(dest, world.clone(), m))
                    })
                    .ok_or_else(|| Error::NotFound(format!("mesh {}", source_ref)))?;
                let name = database_resource_name(MESH_TABLE, dest);
                self.process_new(dest, mesh, name, stream_type, flags, source)
            }
            DatabaseLoad::Fresh { dest } => {
                let mesh = Mesh::from_source(dest, world, source_ref);
                let name = database_resource_name(MESH_TABLE, dest);
                self.process_new(dest, mesh, name, StreamType::File, flags, source)
            }
        }
    }

    /// Register a caller-constructed mesh under its name
    pub fn add_mesh(&mut self, mesh: Mesh, flags: ResourceFlags, source: DebugSource) -> Result<MeshHandle> {
        self.pump_releases();
        let id = mesh.ref_id;
        let name = mesh.name.clone();
        self.process_new(id, mesh, name, StreamType::Memory, flags, source)
    }

    /// Find a resident mesh by resource name
    pub fn get_mesh(&mut self, name: &str) -> Option<MeshHandle> {
        self.pump_releases();
        let key = self.find_by_name(ResourceKind::Mesh, name)?;
        self.handle_for(key)
    }

    /// Resident mesh with this reference id
    pub fn get_mesh_by_id(&mut self, id: ResourceId) -> Option<MeshHandle> {
        self.pump_releases();
        let key = self.find_by_id(ResourceKind::Mesh, id)?;
        self.handle_for(key)
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
