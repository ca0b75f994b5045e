/// Animation set resources.
///
/// Records live in `DataSources::AnimationSet`: the display name plus frame
/// rate and duration (seconds) stored as two f32 words.

use std::any::Any;
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::resource::database::{database_resource_name, DatabaseLoad};
use crate::resource::{
    DebugSource, Resource, ResourceFlags, ResourceHandle, ResourceId, ResourceKind,
    ResourceManager,
};
use crate::system::StreamType;
use crate::world::{World, WorldRecord};

pub type AnimationSetHandle = ResourceHandle<AnimationSet>;

/// World table holding animation set records
pub const ANIMATION_SET_TABLE: &str = "DataSources::AnimationSet";

pub struct AnimationSet {
    ref_id: ResourceId,
    source_ref: Option<ResourceId>,
    world: Option<Arc<dyn World>>,
    name: String,
    frame_rate: f32,
    duration: f32,
    persist_on_load: bool,
}

impl AnimationSet {
    pub fn new(
        ref_id: ResourceId,
        world: Option<Arc<dyn World>>,
        name: &str,
        frame_rate: f32,
        duration: f32,
    ) -> Self {
        Self {
            ref_id,
            source_ref: None,
            persist_on_load: world.is_some() && !ref_id.is_internal(),
            world,
            name: name.to_string(),
            frame_rate,
            duration,
        }
    }

    fn from_source(ref_id: ResourceId, world: Option<Arc<dyn World>>, source_ref: ResourceId) -> Self {
        let mut set = Self::new(ref_id, world, "", 0.0, 0.0);
        set.source_ref = Some(source_ref);
        set.persist_on_load = ref_id != source_ref && !ref_id.is_internal();
        set
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

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whole frames covered by the set
    pub fn frame_count(&self) -> u32 {
        (self.frame_rate * self.duration).round().max(0.0) as u32
    }
}

impl Resource for AnimationSet {
    fn kind(&self) -> ResourceKind {
        ResourceKind::AnimationSet
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        if let Some(source_ref) = self.source_ref {
            let world = self.world.as_ref().ok_or_else(|| {
                Error::InvalidState(format!("animation set {} has no world database", source_ref))
            })?;
            let record = world
                .read_record(ANIMATION_SET_TABLE, source_ref)
                .ok_or_else(|| Error::NotFound(database_resource_name(ANIMATION_SET_TABLE, source_ref)))?;
            if record.data.len() < 8 {
                return Err(Error::InvalidResource(format!(
                    "animation set record '{}' holds {} byte(s), expected 8",
                    record.name,
                    record.data.len()
                )));
            }
            let values: [f32; 2] = bytemuck::pod_read_unaligned(&record.data[..8]);
            self.name = record.name;
            self.frame_rate = values[0];
            self.duration = values[1];
        }
        if self.persist_on_load {
            if let Some(world) = &self.world {
                let values = [self.frame_rate, self.duration];
                let record = WorldRecord {
                    name: self.name.clone(),
                    data: bytemuck::cast_slice(&values).to_vec(),
                    references: Vec::new(),
                };
                world.write_record(ANIMATION_SET_TABLE, self.ref_id, record)?;
            }
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
    /// Load the animation set stored as `source_ref`
    pub fn load_animation_set(
        &mut self,
        world: Option<Arc<dyn World>>,
        source_ref: ResourceId,
        internal: bool,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<AnimationSetHandle> {
        let plan = self.resolve_database_load(
            ResourceKind::AnimationSet,
            "animation set",
            world.as_ref(),
            source_ref,
            internal,
            flags,
        )?;
        match plan {
            DatabaseLoad::Existing(key) => self.process_existing(key, flags),
            DatabaseLoad::Clone { key, dest, stream_type } => {
                let set = self
                    .cell(key)
                    .and_then(|cell| {
                        let object = cell.object();
                        object.as_any().downcast_ref::<AnimationSet>().map(|s| {
                            AnimationSet::new(dest, world.clone(), &s.name, s.frame_rate, s.duration)
                        })
                    })
                    .ok_or_else(|| Error::NotFound(format!("animation set {}", source_ref)))?;
                let name = database_resource_name(ANIMATION_SET_TABLE, dest);
                self.process_new(dest, set, name, stream_type, flags, source)
            }
            DatabaseLoad::Fresh { dest } => {
                let set = AnimationSet::from_source(dest, world, source_ref);
                let name = database_resource_name(ANIMATION_SET_TABLE, dest);
                self.process_new(dest, set, name, StreamType::File, flags, source)
            }
        }
    }

    /// Register a caller-constructed animation set under its name
    pub fn add_animation_set(
        &mut self,
        set: AnimationSet,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<AnimationSetHandle> {
        self.pump_releases();
        let id = set.ref_id;
        let name = set.name.clone();
        self.process_new(id, set, name, StreamType::Memory, flags, source)
    }

    /// Find a resident animation set by resource name
    pub fn get_animation_set(&mut self, name: &str) -> Option<AnimationSetHandle> {
        self.pump_releases();
        let key = self.find_by_name(ResourceKind::AnimationSet, name)?;
        self.handle_for(key)
    }

    /// Resident animation set with this reference id
    pub fn get_animation_set_by_id(&mut self, id: ResourceId) -> Option<AnimationSetHandle> {
        self.pump_releases();
        let key = self.find_by_id(ResourceKind::AnimationSet, id)?;
        self.handle_for(key)
    }
}

#[cfg(test)]
#[path = "animation_set_tests.rs"]
mod tests;
