/// Material resources.
///
/// A material is a database-backed description of a surface: display name,
/// diffuse color and roughness. Materials loaded by source reference id
/// read their record from the world on load; persisted materials created
/// or cloned at runtime write their record back when loaded.
///
/// Display names are tracked case-insensitively by the manager so editors
/// can pick unique names.

use std::any::Any;
use std::sync::Arc;
use glam::Vec4;
use crate::error::{Error, Result};
use crate::resource::database::{database_resource_name, DatabaseLoad};
use crate::resource::{
    DebugSource, Resource, ResourceFlags, ResourceHandle, ResourceId, ResourceKey, ResourceKind,
    ResourceManager,
};
use crate::system::StreamType;
use crate::world::{World, WorldRecord};

pub type MaterialHandle = ResourceHandle<Material>;

/// Name of the material created by `initialize`
pub const DEFAULT_MATERIAL_NAME: &str = "Core::Resources::DefaultMaterial";

/// Bytes of a serialized material record (diffuse rgba + roughness)
const RECORD_SIZE: usize = 5 * 4;

// ===== MATERIAL TYPE =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Standard,
    LandscapeLayer,
}

impl MaterialType {
    /// World table holding materials of this type
    pub fn table(&self) -> &'static str {
        match self {
            MaterialType::Standard => "Materials::Standard",
            MaterialType::LandscapeLayer => "Materials::LandscapeLayer",
        }
    }
}

// ===== MATERIAL =====

pub struct Material {
    ref_id: ResourceId,
    source_ref: Option<ResourceId>,
    material_type: MaterialType,
    world: Option<Arc<dyn World>>,
    display_name: String,
    diffuse: Vec4,
    roughness: f32,
    /// Write the record under `ref_id` on the next load
    persist_on_load: bool,
}

impl Material {
    /// Blank material with id `ref_id`
    pub fn new(ref_id: ResourceId, world: Option<Arc<dyn World>>, material_type: MaterialType) -> Self {
        Self {
            ref_id,
            source_ref: None,
            material_type,
            persist_on_load: world.is_some() && !ref_id.is_internal(),
            world,
            display_name: String::new(),
            diffuse: Vec4::ONE,
            roughness: 0.5,
        }
    }

    /// Material that reads record `source_ref` on load
    fn from_source(
        ref_id: ResourceId,
        world: Option<Arc<dyn World>>,
        material_type: MaterialType,
        source_ref: ResourceId,
    ) -> Self {
        let mut material = Self::new(ref_id, world, material_type);
        material.source_ref = Some(source_ref);
        material.persist_on_load = ref_id != source_ref && !ref_id.is_internal();
        material
    }

    /// Copy of `other` under id `ref_id`
    fn clone_from(ref_id: ResourceId, world: Option<Arc<dyn World>>, other: &Material) -> Self {
        let mut material = Self::new(ref_id, world, other.material_type);
        material.display_name = other.display_name.clone();
        material.diffuse = other.diffuse;
        material.roughness = other.roughness;
        material
    }

    pub fn ref_id(&self) -> ResourceId {
        self.ref_id
    }

    /// Record this material was loaded from, if any
    pub fn source_ref(&self) -> Option<ResourceId> {
        self.source_ref
    }

    pub fn material_type(&self) -> MaterialType {
        self.material_type
    }

    pub fn is_internal(&self) -> bool {
        self.ref_id.is_internal()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn diffuse(&self) -> Vec4 {
        self.diffuse
    }

    pub fn set_diffuse(&mut self, diffuse: Vec4) {
        self.diffuse = diffuse;
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    pub fn set_roughness(&mut self, roughness: f32) {
        self.roughness = roughness;
    }

    fn record(&self) -> WorldRecord {
        let values = [self.diffuse.x, self.diffuse.y, self.diffuse.z, self.diffuse.w, self.roughness];
        WorldRecord {
            name: self.display_name.clone(),
            data: bytemuck::cast_slice(&values).to_vec(),
            references: Vec::new(),
        }
    }

    fn apply_record(&mut self, record: WorldRecord) -> Result<()> {
        if record.data.len() < RECORD_SIZE {
            return Err(Error::InvalidResource(format!(
                "material record '{}' holds {} byte(s), expected {}",
                record.name,
                record.data.len(),
                RECORD_SIZE
            )));
        }
        let values: [f32; 5] = bytemuck::pod_read_unaligned(&record.data[..RECORD_SIZE]);
        self.display_name = record.name;
        self.diffuse = Vec4::new(values[0], values[1], values[2], values[3]);
        self.roughness = values[4];
        Ok(())
    }

    /// Store the current values in the world under this material's id
    pub fn serialize(&self) -> Result<()> {
        let world = self.world.as_ref().ok_or_else(|| {
            Error::InvalidState(format!("material {} has no world database", self.ref_id))
        })?;
        world.write_record(self.material_type.table(), self.ref_id, self.record())
    }
}

impl Resource for Material {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Material
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        if let Some(source_ref) = self.source_ref {
            let world = self.world.as_ref().ok_or_else(|| {
                Error::InvalidState(format!("material {} has no world database", source_ref))
            })?;
            let table = self.material_type.table();
            let record = world
                .read_record(table, source_ref)
                .ok_or_else(|| Error::NotFound(database_resource_name(table, source_ref)))?;
            self.apply_record(record)?;
        }
        if self.persist_on_load {
            self.serialize()?;
            self.persist_on_load = false;
        }
        Ok(())
    }

    fn unload(&mut self) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    pub(crate) fn register_material_name(&mut self, key: ResourceKey, name: &str) {
        if name.is_empty() {
            return;
        }
        let folded = name.to_lowercase();
        if let Some(previous) = self.material_name_of.insert(key, folded.clone()) {
            self.release_material_name(&previous);
        }
        *self.material_names.entry(folded).or_insert(0) += 1;
    }

    pub(crate) fn release_material_name(&mut self, folded: &str) {
        if let Some(count) = self.material_names.get_mut(folded) {
            *count -= 1;
            if *count == 0 {
                self.material_names.remove(folded);
            }
        }
    }

    fn track_material_name(&mut self, handle: &MaterialHandle) {
        if let Some(name) = handle.read(|m| m.display_name.clone()) {
            let key = handle.cell().key;
            if !name.is_empty() && !self.material_name_of.contains_key(&key) {
                self.register_material_name(key, &name);
            }
        }
    }

    /// Is a material with this display name (any case) resident?
    pub fn is_material_name_used(&self, name: &str) -> bool {
        self.material_names.contains_key(&name.to_lowercase())
    }

    /// Suggested name, numbered (`Name01`, `Name02`, ...) until unused
    pub fn make_unique_material_name(&self, name: &str) -> String {
        let mut counter = 1;
        let mut candidate = name.to_string();
        while self.is_material_name_used(&candidate) {
            candidate = format!("{}{:02}", name, counter);
            counter += 1;
        }
        candidate
    }

    /// Like `make_unique_material_name`, starting from `name<postfix>`
    pub fn make_unique_material_name_with_suffix(&self, name: &str, postfix: u32) -> String {
        let mut counter = postfix + 1;
        let mut candidate = format!("{}{:02}", name, postfix);
        while self.is_material_name_used(&candidate) {
            candidate = format!("{}{:02}", name, counter);
            counter += 1;
        }
        candidate
    }

    /// Rename a material, keeping the name usage table current
    pub fn set_material_name(&mut self, handle: &MaterialHandle, name: &str) {
        self.pump_releases();
        handle.write(|m| m.display_name = name.to_string());
        let key = handle.cell().key;
        if let Some(previous) = self.material_name_of.remove(&key) {
            self.release_material_name(&previous);
        }
        self.register_material_name(key, name);
    }

    /// Register a caller-constructed material under its display name
    pub fn add_material(
        &mut self,
        material: Material,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<MaterialHandle> {
        self.pump_releases();
        let name = material.display_name.clone();
        let id = material.ref_id;
        let handle = self.process_new(id, material, name, StreamType::Memory, flags, source)?;
        self.track_material_name(&handle);
        Ok(handle)
    }

    /// Create a blank material
    ///
    /// Outside full sandbox editing the material is always internal; a
    /// persisted one needs `world`.
    pub fn create_material(
        &mut self,
        internal: bool,
        world: Option<Arc<dyn World>>,
        material_type: MaterialType,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<MaterialHandle> {
        self.pump_releases();
        let id = self.new_database_id("material", world.as_ref(), internal)?;
        let material = Material::new(id, world, material_type);
        self.process_new(id, material, String::new(), StreamType::Memory, flags, source)
    }

    /// Create the manager's default material
    pub(crate) fn create_default_material(&mut self) -> Result<MaterialHandle> {
        let id = ResourceId::next_internal();
        let mut material = Material::new(id, None, MaterialType::Standard);
        material.display_name = DEFAULT_MATERIAL_NAME.to_string();
        let handle = self.process_new(
            id,
            material,
            String::new(),
            StreamType::Memory,
            ResourceFlags::ALWAYS_RESIDENT,
            crate::debug_source!(),
        )?;
        self.track_material_name(&handle);
        Ok(handle)
    }

    /// Create a new material copied from `init`
    pub fn clone_material(
        &mut self,
        world: Option<Arc<dyn World>>,
        internal: bool,
        init: &MaterialHandle,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<MaterialHandle> {
        self.pump_releases();
        let id = self.new_database_id("material", world.as_ref(), internal)?;
        let material = init
            .read(|m| Material::clone_from(id, world.clone(), m))
            .ok_or_else(|| Error::InvalidResource("clone source is not a material".to_string()))?;
        let handle = self.process_new(id, material, String::new(), StreamType::Memory, flags, source)?;
        self.track_material_name(&handle);
        Ok(handle)
    }

    /// Load the material stored as `source_ref`
    ///
    /// Reuses the resident instance when the internal/persisted
    /// classification matches and `FORCE_NEW` is not set, clones it
    /// otherwise, and reads it from `world` when it is not resident.
    pub fn load_material(
        &mut self,
        world: Option<Arc<dyn World>>,
        material_type: MaterialType,
        source_ref: ResourceId,
        internal: bool,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<MaterialHandle> {
        let plan = self.resolve_database_load(
            ResourceKind::Material,
            "material",
            world.as_ref(),
            source_ref,
            internal,
            flags,
        )?;
        let handle = match plan {
            DatabaseLoad::Existing(key) => return self.process_existing(key, flags),
            DatabaseLoad::Clone { key, dest, stream_type } => {
                let material = self
                    .cell(key)
                    .and_then(|cell| {
                        let object = cell.object();
                        object
                            .as_any()
                            .downcast_ref::<Material>()
                            .map(|m| Material::clone_from(dest, world.clone(), m))
                    })
                    .ok_or_else(|| Error::NotFound(format!("material {}", source_ref)))?;
                let name = database_resource_name(material.material_type.table(), dest);
                self.process_new(dest, material, name, stream_type, flags, source)?
            }
            DatabaseLoad::Fresh { dest } => {
                let material = Material::from_source(dest, world, material_type, source_ref);
                let name = database_resource_name(material_type.table(), dest);
                self.process_new(dest, material, name, StreamType::File, flags, source)?
            }
        };
        self.track_material_name(&handle);
        Ok(handle)
    }

    /// Resident material with this reference id
    pub fn get_material_from_id(&mut self, id: ResourceId) -> Option<MaterialHandle> {
        self.pump_releases();
        let key = self.find_by_id(ResourceKind::Material, id)?;
        self.handle_for(key)
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
