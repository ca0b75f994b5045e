/// Central resource manager.
///
/// Owns every resident resource, the per-kind resource lists, the identity
/// tables used for deduplication and the garbage schedule. All factory
/// operations (`load_*`, `create_*`, `add_*`) funnel newly constructed
/// resources through `process_new`, and adopted resources through
/// `process_existing`. Kind-specific factories live next to each resource
/// type in their own modules.
///
/// Destruction is deferred: when the last external handle is dropped the
/// resource enters the garbage schedule and is destroyed by a later sweep
/// once its destroy delay has strictly elapsed.

use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};
use crossbeam_channel::{unbounded, Receiver, Sender};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::config::{InitConfig, ResourceConfig};
use crate::error::{Error, Result};
use crate::render_driver::RenderDriver;
use crate::resource::identity::{IdentityKey, IdentityTables};
use crate::resource::resource::{ReleaseEvent, ResourceCell, ResourceState};
use crate::resource::{
    AudioFlagMatching, DebugSource, GarbageSchedule, MaterialHandle, Resource, ResourceFlags,
    ResourceHandle, ResourceId, ResourceKey, ResourceKind, ScriptHandle,
};
use crate::system::{Clock, FileSystem, ListenerId, Message, MessageBus, StreamType};
use crate::world::{SandboxMode, World};
use crate::{engine_debug, engine_error, engine_trace, engine_warn};

const LOG_SOURCE: &str = "carbon::ResourceManager";

/// Period of the self-scheduled garbage sweep (seconds)
pub const GARBAGE_COLLECT_INTERVAL: f64 = 1.0;

/// Should a newly requested database resource be forced internal?
///
/// Outside full sandbox editing, every new (or forced-new) mesh, material
/// or animation set collapses to an internal id.
pub fn should_force_internal(sandbox_mode: SandboxMode, new_resource_requested: bool) -> bool {
    sandbox_mode != SandboxMode::Enabled && new_resource_requested
}

// ===== DESCRIPTOR =====

/// Construction options for a `ResourceManager`
pub struct ResourceManagerDesc {
    pub render_driver: Arc<dyn RenderDriver>,
    /// Message bus; its clock times garbage collection
    pub message_bus: MessageBus,
    pub file_system: FileSystem,
    pub config: ResourceConfig,
    pub sandbox_mode: SandboxMode,
    pub audio_flag_matching: AudioFlagMatching,
    /// Initial destroy delay of every new resource (seconds)
    pub default_destroy_delay: f64,
}

impl ResourceManagerDesc {
    /// Defaults around a driver and bus
    pub fn new(render_driver: Arc<dyn RenderDriver>, message_bus: MessageBus) -> Self {
        Self {
            render_driver,
            message_bus,
            file_system: FileSystem::default(),
            config: ResourceConfig::default(),
            sandbox_mode: SandboxMode::Disabled,
            audio_flag_matching: AudioFlagMatching::Exact,
            default_destroy_delay: 0.0,
        }
    }
}

// ===== MANAGER =====

pub struct ResourceManager {
    driver: Arc<dyn RenderDriver>,
    bus: MessageBus,
    clock: Arc<dyn Clock>,
    listener: Option<ListenerId>,
    file_system: FileSystem,
    config: ResourceConfig,
    sandbox_mode: SandboxMode,
    audio_flag_matching: AudioFlagMatching,
    default_destroy_delay: f64,
    destruction_enabled: bool,
    disposing: bool,
    disposed: bool,

    resources: SlotMap<ResourceKey, Arc<ResourceCell>>,
    lists: Vec<Vec<ResourceKey>>,
    /// Database-backed kinds share id space, so the kind is part of the key
    ref_index: FxHashMap<(ResourceKind, ResourceId), ResourceKey>,
    identity: IdentityTables,
    garbage: GarbageSchedule,
    release_tx: Sender<ReleaseEvent>,
    release_rx: Receiver<ReleaseEvent>,

    /// Case-folded material name -> number of materials using it
    pub(crate) material_names: FxHashMap<String, usize>,
    pub(crate) material_name_of: FxHashMap<ResourceKey, String>,

    pub(crate) default_material: Option<MaterialHandle>,
    pub(crate) default_shader: Option<ScriptHandle>,
}

impl ResourceManager {
    /// Create an empty manager (call `initialize` before use)
    pub fn new(desc: ResourceManagerDesc) -> Self {
        let (release_tx, release_rx) = unbounded();
        let clock = desc.message_bus.clock();
        Self {
            driver: desc.render_driver,
            bus: desc.message_bus,
            clock,
            listener: None,
            file_system: desc.file_system,
            config: desc.config,
            sandbox_mode: desc.sandbox_mode,
            audio_flag_matching: desc.audio_flag_matching,
            default_destroy_delay: desc.default_destroy_delay,
            destruction_enabled: true,
            disposing: false,
            disposed: false,
            resources: SlotMap::with_key(),
            lists: vec![Vec::new(); ResourceKind::COUNT],
            ref_index: FxHashMap::default(),
            identity: IdentityTables::default(),
            garbage: GarbageSchedule::new(),
            release_tx,
            release_rx,
            material_names: FxHashMap::default(),
            material_name_of: FxHashMap::default(),
            default_material: None,
            default_shader: None,
        }
    }

    /// Subscribe to the bus, arm garbage collection and create the
    /// default resources
    pub fn initialize(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.listener = Some(self.bus.subscribe());
        }
        self.schedule_garbage_collection();

        if !self.config.default_shader.is_empty() {
            let stream = self.file_system.open(&self.config.default_shader);
            let script = self
                .load_surface_shader_script(&stream, ResourceFlags::ALWAYS_RESIDENT, crate::debug_source!())
                .map_err(|e| {
                    Error::InitializationFailed(format!(
                        "default shader '{}' could not be loaded: {}",
                        self.config.default_shader, e
                    ))
                })?;
            self.default_shader = Some(script);
        }

        let material = self.create_default_material()?;
        self.default_material = Some(material);

        engine_debug!(LOG_SOURCE, "Resource manager initialized");
        Ok(())
    }

    /// Tear down every resource
    ///
    /// Owned resources are released, the garbage schedule is emptied and
    /// anything still referenced externally is detached (its handles keep it
    /// alive, the manager forgets it).
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposing = true;
        self.destruction_enabled = true;

        self.release_owned_resources();
        self.empty_garbage();

        // Parents release their children when destroyed, so repeat until
        // only externally held resources remain.
        loop {
            let idle: Vec<ResourceKey> = self
                .resources
                .iter()
                .filter(|(_, cell)| cell.handle_count() == 0)
                .map(|(key, _)| key)
                .collect();
            if idle.is_empty() {
                break;
            }
            for key in idle {
                self.destroy_resource(key);
            }
            self.pump_releases();
        }
        let remaining: Vec<ResourceKey> = self.resources.keys().collect();
        for key in remaining {
            self.detach_resource(key);
        }

        self.garbage.clear();
        self.identity.clear();
        self.ref_index.clear();
        self.material_names.clear();
        self.material_name_of.clear();
        for list in &mut self.lists {
            list.clear();
        }

        if let Some(listener) = self.listener.take() {
            self.bus.unsubscribe(listener);
        }
        self.disposed = true;
        engine_debug!(LOG_SOURCE, "Resource manager disposed");
    }

    // ===== ACCESSORS =====

    pub fn render_driver(&self) -> &Arc<dyn RenderDriver> {
        &self.driver
    }

    pub fn message_bus(&self) -> &MessageBus {
        &self.bus
    }

    /// Mailbox of this manager (None before `initialize` / after `dispose`)
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn file_system(&self) -> &FileSystem {
        &self.file_system
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn init_config(&self) -> InitConfig {
        self.config.init_config()
    }

    /// Replace the configuration from a TOML file
    pub fn load_config(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.config = ResourceConfig::load(path)?;
        Ok(())
    }

    pub fn save_config(&self, path: impl AsRef<Path>) -> Result<()> {
        self.config.save(path)
    }

    pub fn sandbox_mode(&self) -> SandboxMode {
        self.sandbox_mode
    }

    pub fn set_sandbox_mode(&mut self, mode: SandboxMode) {
        self.sandbox_mode = mode;
    }

    pub fn audio_flag_matching(&self) -> AudioFlagMatching {
        self.audio_flag_matching
    }

    pub fn default_destroy_delay(&self) -> f64 {
        self.default_destroy_delay
    }

    /// Destroy delay given to resources registered from now on
    pub fn set_default_destroy_delay(&mut self, delay: f64) {
        self.default_destroy_delay = delay;
    }

    /// Allow or forbid destruction of unreferenced resources
    ///
    /// While disabled, released resources accumulate in the garbage
    /// schedule and no sweep destroys anything.
    pub fn enable_destruction(&mut self, enabled: bool) {
        self.destruction_enabled = enabled;
    }

    pub fn is_destruction_enabled(&self) -> bool {
        self.destruction_enabled
    }

    pub fn default_material(&self) -> Option<&MaterialHandle> {
        self.default_material.as_ref()
    }

    pub fn default_shader(&self) -> Option<&ScriptHandle> {
        self.default_shader.as_ref()
    }

    // ===== INTROSPECTION =====

    /// Number of resident resources of a kind
    pub fn resource_count(&mut self, kind: ResourceKind) -> usize {
        self.pump_releases();
        self.lists[kind.index()].len()
    }

    /// Names of resident resources of a kind, in list order
    pub fn resource_names(&mut self, kind: ResourceKind) -> Vec<String> {
        self.pump_releases();
        self.lists[kind.index()]
            .iter()
            .filter_map(|key| self.resources.get(*key))
            .map(|cell| cell.state().name.clone())
            .collect()
    }

    /// Entries in the identity table of a kind
    pub fn identity_table_len(&self, kind: ResourceKind) -> usize {
        self.identity.len(kind)
    }

    /// Number of resources pending destruction
    pub fn garbage_count(&mut self) -> usize {
        self.pump_releases();
        self.garbage.len()
    }

    /// Is this resource waiting in the garbage schedule?
    pub fn is_pending_destruction(&mut self, id: ResourceId) -> bool {
        self.pump_releases();
        self.ref_index
            .iter()
            .any(|((_, ref_id), key)| *ref_id == id && self.garbage.contains(*key))
    }

    /// Is a resource with this id resident?
    pub fn is_resident(&mut self, id: ResourceId) -> bool {
        self.pump_releases();
        self.ref_index.keys().any(|(_, ref_id)| *ref_id == id)
    }

    // ===== REGISTRATION =====

    /// Register a newly constructed resource
    ///
    /// Stamps name, flags and provenance, loads it unless deferred, then
    /// appends it to its resource list. A failed load drops the object and
    /// leaves no trace in any list or table.
    pub(crate) fn process_new<T: Resource>(
        &mut self,
        id: ResourceId,
        mut object: T,
        name: String,
        stream_type: StreamType,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ResourceHandle<T>> {
        let kind = object.kind();
        let loaded = if flags.contains(ResourceFlags::DEFERRED_LOAD) {
            false
        } else {
            if let Err(error) = object.load(self) {
                object.unload();
                drop(object);
                self.pump_releases();
                engine_error!(
                    LOG_SOURCE,
                    "Failed to load resource '{}' requested at {}: {}",
                    name, source, error
                );
                return Err(Error::LoadFailed { name, reason: error.to_string() });
            }
            true
        };

        let state = ResourceState {
            name,
            flags,
            stream_type,
            source: source.to_string(),
            loaded,
            destroy_delay: self.default_destroy_delay,
            last_referenced: self.clock.now(),
        };
        let object: Box<dyn Resource> = Box::new(object);
        let releases = self.release_tx.clone();
        let clock = self.clock.clone();
        let key = self.resources.insert_with_key(|key| {
            Arc::new(ResourceCell {
                id,
                kind,
                key,
                state: Mutex::new(state),
                object: Mutex::new(object),
                handles: AtomicUsize::new(0),
                releases,
                clock,
            })
        });
        self.lists[kind.index()].push(key);
        self.ref_index.insert((kind, id), key);

        engine_trace!(LOG_SOURCE, "Registered {:?} {} ({})", kind, id, source);
        self.handle_for(key)
            .ok_or_else(|| Error::InvalidState(format!("resource {} vanished during registration", id)))
    }

    /// Adopt a resident resource
    ///
    /// Loads it first unless `DEFERRED_LOAD` was requested or it is already
    /// loaded. Never touches its name or flags.
    pub(crate) fn process_existing<T: Resource>(
        &mut self,
        key: ResourceKey,
        flags: ResourceFlags,
    ) -> Result<ResourceHandle<T>> {
        let handle: ResourceHandle<T> = self
            .handle_for(key)
            .ok_or_else(|| Error::NotFound("resource is no longer resident".to_string()))?;
        if !flags.contains(ResourceFlags::DEFERRED_LOAD) && !handle.is_loaded() {
            self.load_cell(&handle.cell().clone())?;
        }
        Ok(handle)
    }

    /// Load a resource registered with `DEFERRED_LOAD`
    pub fn ensure_loaded<T: Resource>(&mut self, handle: &ResourceHandle<T>) -> Result<()> {
        self.pump_releases();
        if handle.is_loaded() {
            return Ok(());
        }
        self.load_cell(&handle.cell().clone())
    }

    pub(crate) fn load_cell(&mut self, cell: &Arc<ResourceCell>) -> Result<()> {
        let result = {
            let mut object = cell.object();
            object.load(self)
        };
        match result {
            Ok(()) => {
                cell.state().loaded = true;
                Ok(())
            }
            Err(error) => {
                let name = cell.state().name.clone();
                engine_error!(LOG_SOURCE, "Failed to load resource '{}': {}", name, error);
                Err(Error::LoadFailed { name, reason: error.to_string() })
            }
        }
    }

    /// Unload a resident resource, keeping it registered
    pub(crate) fn unload_cell(&mut self, cell: &Arc<ResourceCell>) {
        cell.object().unload();
        cell.state().loaded = false;
    }

    /// New external handle to a resident resource (un-pends it)
    pub(crate) fn handle_for<T: Resource>(&mut self, key: ResourceKey) -> Option<ResourceHandle<T>> {
        let cell = self.resources.get(key)?.clone();
        if !cell.object().as_any().is::<T>() {
            return None;
        }
        let handle = ResourceHandle::acquire(cell);
        if handle.reference_count() == 1 {
            self.garbage.remove(key);
        }
        Some(handle)
    }

    pub(crate) fn file_identity(&mut self, identity: IdentityKey, key: ResourceKey) {
        self.identity.insert(identity, key);
    }

    pub(crate) fn find_identity(&self, identity: &IdentityKey) -> Option<ResourceKey> {
        self.identity.find(identity)
    }

    pub(crate) fn cell(&self, key: ResourceKey) -> Option<&Arc<ResourceCell>> {
        self.resources.get(key)
    }

    pub(crate) fn keys_of(&self, kind: ResourceKind) -> Vec<ResourceKey> {
        self.lists[kind.index()].clone()
    }

    /// First resident resource of a kind with this exact name
    pub(crate) fn find_by_name(&self, kind: ResourceKind, name: &str) -> Option<ResourceKey> {
        self.lists[kind.index()].iter().copied().find(|key| {
            self.resources
                .get(*key)
                .is_some_and(|cell| cell.state().name == name)
        })
    }

    /// Resident resource of a kind with this reference id
    pub(crate) fn find_by_id(&self, kind: ResourceKind, id: ResourceId) -> Option<ResourceKey> {
        self.ref_index.get(&(kind, id)).copied()
    }

    /// Fresh id, from the world when one is available
    pub(crate) fn generate_ref_id(world: Option<&Arc<dyn World>>, internal: bool) -> ResourceId {
        match world {
            Some(world) => world.generate_ref_id(internal),
            None => ResourceId::next_internal(),
        }
    }

    // ===== RELEASE / DESTRUCTION =====

    /// Apply every pending handle release
    pub(crate) fn pump_releases(&mut self) {
        while let Ok(event) = self.release_rx.try_recv() {
            self.handle_release(event);
        }
    }

    fn handle_release(&mut self, event: ReleaseEvent) {
        let Some(cell) = self.resources.get(event.key) else {
            return;
        };
        if cell.handle_count() > 0 {
            return;
        }
        let (flags, delay) = {
            let mut state = cell.state();
            state.last_referenced = event.released_at;
            (state.flags, state.destroy_delay)
        };
        if flags.contains(ResourceFlags::ALWAYS_RESIDENT) {
            return;
        }
        if !self.destruction_enabled || delay > 0.0 {
            self.garbage.insert(event.key, event.released_at + delay);
        } else {
            self.destroy_resource(event.key);
        }
    }

    /// Remove a resource from every structure without unloading it
    fn forget_resource(&mut self, key: ResourceKey) -> Option<Arc<ResourceCell>> {
        let cell = self.resources.remove(key)?;
        let list = &mut self.lists[cell.kind.index()];
        if let Some(position) = list.iter().position(|k| *k == key) {
            list.remove(position);
        }
        self.garbage.remove(key);
        self.identity.remove(key);
        let ref_key = (cell.kind, cell.id);
        if self.ref_index.get(&ref_key) == Some(&key) {
            self.ref_index.remove(&ref_key);
        }
        if let Some(name) = self.material_name_of.remove(&key) {
            self.release_material_name(&name);
        }
        Some(cell)
    }

    /// Unload and drop a resource
    pub(crate) fn destroy_resource(&mut self, key: ResourceKey) {
        let Some(cell) = self.forget_resource(key) else {
            return;
        };
        cell.object().unload();
        engine_trace!(LOG_SOURCE, "Destroyed {:?} '{}'", cell.kind, cell.state().name);
        drop(cell);
    }

    /// Destroy a resource nobody references; forget one that is still held
    fn detach_resource(&mut self, key: ResourceKey) {
        let held = self
            .resources
            .get(key)
            .is_some_and(|cell| cell.handle_count() > 0);
        if held {
            self.forget_resource(key);
        } else {
            self.destroy_resource(key);
        }
    }

    fn sweep_garbage(&mut self, empty: bool) {
        self.pump_releases();
        if !self.destruction_enabled {
            return;
        }
        let now = self.clock.now();
        loop {
            let next = if empty {
                self.garbage.pop_any()
            } else {
                self.garbage.pop_due(now)
            };
            let Some(key) = next else {
                break;
            };
            let Some(cell) = self.resources.get(key) else {
                continue;
            };
            if cell.handle_count() > 0 {
                continue;
            }
            if !empty {
                let state = cell.state();
                if state.destroy_delay > 0.0 {
                    engine_debug!(
                        LOG_SOURCE,
                        "Unloading trashed resource '{}' because its destruction delay of {} second(s) expired.",
                        state.name, state.destroy_delay
                    );
                }
            }
            self.destroy_resource(key);
            self.pump_releases();
        }
    }

    /// Destroy pending resources whose delay has elapsed
    pub fn collect_garbage(&mut self) {
        self.sweep_garbage(false);
    }

    /// Destroy every pending resource regardless of delay
    pub fn empty_garbage(&mut self) {
        self.sweep_garbage(true);
    }

    /// Release (`owned_only = false`) or un-pin (`owned_only = true`) every
    /// resource of a kind
    ///
    /// Un-pinning clears `ALWAYS_RESIDENT` and destroys the resources that
    /// were only kept alive by it. Releasing detaches the whole list.
    pub fn release_resource_list(&mut self, kind: ResourceKind, owned_only: bool) {
        self.pump_releases();
        for key in self.keys_of(kind) {
            if !owned_only {
                self.detach_resource(key);
                continue;
            }
            let Some(cell) = self.resources.get(key) else {
                continue;
            };
            let was_pinned = {
                let mut state = cell.state();
                let pinned = state.flags.contains(ResourceFlags::ALWAYS_RESIDENT);
                state.flags.remove(ResourceFlags::ALWAYS_RESIDENT);
                pinned
            };
            if was_pinned && cell.handle_count() == 0 {
                self.destroy_resource(key);
            }
        }
        self.pump_releases();
    }

    /// Drop the manager's own resources and un-pin everything
    pub fn release_owned_resources(&mut self) {
        self.default_material = None;
        self.default_shader = None;
        for kind in ResourceKind::ALL {
            self.release_resource_list(kind, true);
        }
    }

    // ===== MESSAGES =====

    fn schedule_garbage_collection(&self) {
        if let Some(listener) = self.listener {
            self.bus.send_to(
                Some(listener),
                listener,
                Message::CollectGarbage,
                GARBAGE_COLLECT_INTERVAL,
            );
        }
    }

    pub(crate) fn send_to_self(&self, message: Message, delay: f64) -> bool {
        match self.listener {
            Some(listener) => self.bus.send_to(Some(listener), listener, message, delay),
            None => false,
        }
    }

    pub(crate) fn broadcast(&self, message: Message) -> usize {
        self.bus.broadcast(self.listener, message)
    }

    /// Handle every due message in this manager's mailbox
    pub fn process_messages(&mut self) -> usize {
        let Some(listener) = self.listener else {
            return 0;
        };
        let mut handled = 0;
        for envelope in self.bus.collect(listener) {
            if self.process_message(&envelope.message) {
                handled += 1;
            }
        }
        handled
    }

    /// Handle one message; returns whether it was recognized
    pub fn process_message(&mut self, message: &Message) -> bool {
        self.pump_releases();
        match message {
            Message::DeviceLost => {
                self.notify_device_lost();
                true
            }
            Message::DeviceRestored => {
                self.notify_device_restored();
                true
            }
            Message::CollectGarbage => {
                self.collect_garbage();
                if !self.disposing {
                    self.schedule_garbage_collection();
                }
                true
            }
            Message::ReloadShaders => {
                if let Err(error) = self.reload_shaders(0.0) {
                    engine_error!(LOG_SOURCE, "Shader reload failed: {}", error);
                }
                true
            }
            Message::ReloadScripts => {
                if let Err(error) = self.reload_scripts(0.0) {
                    engine_error!(LOG_SOURCE, "Script reload failed: {}", error);
                }
                true
            }
            Message::ShadersReloaded | Message::ScriptsReloaded => false,
        }
    }

    /// Tell every resident resource its device backing is gone
    pub fn notify_device_lost(&mut self) {
        for kind in ResourceKind::ALL {
            for key in self.keys_of(kind) {
                if let Some(cell) = self.resources.get(key) {
                    cell.object().device_lost();
                }
            }
        }
    }

    /// Tell every resident resource to rebuild its device backing
    pub fn notify_device_restored(&mut self) {
        for kind in ResourceKind::ALL {
            for key in self.keys_of(kind) {
                let Some(cell) = self.resources.get(key) else {
                    continue;
                };
                let result = cell.object().device_restored();
                if let Err(error) = result {
                    engine_warn!(
                        LOG_SOURCE,
                        "Unable to restore resource '{}' after device reset: {}",
                        cell.state().name, error
                    );
                }
            }
        }
    }

    // ===== DEBUG =====

    /// Describe outstanding resources of one kind
    ///
    /// Resources whose only reference is the manager's own and that are
    /// waiting in the garbage schedule are not reported.
    pub fn list_active_resources(&mut self, kind: ResourceKind) -> Vec<String> {
        self.pump_releases();
        let mut lines = Vec::new();
        for key in &self.lists[kind.index()] {
            let Some(cell) = self.resources.get(*key) else {
                continue;
            };
            let handles = cell.handle_count();
            if handles == 0 && self.garbage.contains(*key) {
                continue;
            }
            let lost = if cell.object().is_lost() { " (Lost)" } else { "" };
            let state = cell.state();
            lines.push(format!(
                "Item {} - Resource '{}'{} remains referenced in {} location(s) beginning with '{}'.",
                lines.len() + 1,
                state.name,
                lost,
                handles + 1,
                state.source
            ));
        }
        lines
    }

    /// Log every outstanding resource, grouped by kind
    ///
    /// Returns true when something is still outstanding.
    pub fn debug_resources(&mut self) -> bool {
        let mut outstanding = false;
        for kind in ResourceKind::REPORT_ORDER {
            let lines = self.list_active_resources(kind);
            if lines.is_empty() {
                continue;
            }
            engine_debug!(LOG_SOURCE, "Outstanding {}", kind.label());
            for line in lines {
                engine_debug!(LOG_SOURCE, "{}", line);
            }
            outstanding = true;
        }
        if !outstanding {
            engine_debug!(LOG_SOURCE, "No outstanding resources detected.");
        }
        outstanding
    }
}

impl Drop for ResourceManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
