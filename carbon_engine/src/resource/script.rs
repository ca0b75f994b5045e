/// Script resources.
///
/// Scripts are keyed by `<stream name>::<instance id>` (instance id
/// defaults to `.default`). Plain scripts and surface-shader scripts share
/// one resource list but never match each other. Surface-shader scripts get
/// a preprocessor define naming the active graphics API.

use std::any::Any;
use std::sync::Arc;
use crate::error::Result;
use crate::resource::resource::ResourceCell;
use crate::resource::{
    DebugSource, Resource, ResourceFlags, ResourceHandle, ResourceId, ResourceKind,
    ResourceManager,
};
use crate::system::{InputStream, Message};
use crate::engine_debug;

pub type ScriptHandle = ResourceHandle<Script>;

/// Instance id used when none is supplied
pub const DEFAULT_SCRIPT_INSTANCE: &str = ".default";

pub struct Script {
    stream: InputStream,
    this_type: String,
    instance_id: String,
    surface_shader: bool,
    define: Option<&'static str>,
    source: String,
    load_count: u32,
}

impl Script {
    fn new(
        stream: InputStream,
        this_type: &str,
        instance_id: &str,
        surface_shader: bool,
        define: Option<&'static str>,
    ) -> Self {
        Self {
            stream,
            this_type: this_type.to_string(),
            instance_id: instance_id.to_string(),
            surface_shader,
            define,
            source: String::new(),
            load_count: 0,
        }
    }

    pub fn stream_name(&self) -> &str {
        self.stream.name()
    }

    pub fn stream(&self) -> &InputStream {
        &self.stream
    }

    /// Type the script binds `this` to (empty for none)
    pub fn this_type(&self) -> &str {
        &self.this_type
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn is_surface_shader(&self) -> bool {
        self.surface_shader
    }

    /// Preprocessed source text (empty until loaded)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// How many times the script has been (re)loaded
    pub fn load_count(&self) -> u32 {
        self.load_count
    }
}

impl Resource for Script {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Script
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        let text = self.stream.read_to_string()?;
        self.source = match self.define {
            Some(define) => format!("#define {}\n{}", define, text),
            None => text,
        };
        self.load_count += 1;
        Ok(())
    }

    fn unload(&mut self) {
        self.source = String::new();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Unique key of a script instance
pub fn script_uid(stream_name: &str, instance_id: &str) -> String {
    let instance = if instance_id.is_empty() { DEFAULT_SCRIPT_INSTANCE } else { instance_id };
    format!("{}::{}", stream_name, instance)
}

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    fn find_script(&self, uid: &str, surface_shader: bool) -> Option<crate::resource::ResourceKey> {
        self.keys_of(ResourceKind::Script).into_iter().find(|key| {
            self.cell(*key).is_some_and(|cell| {
                cell.state().name == uid
                    && cell
                        .object()
                        .as_any()
                        .downcast_ref::<Script>()
                        .is_some_and(|s| s.is_surface_shader() == surface_shader)
            })
        })
    }

    fn script_cells(&self, surface_shader: bool) -> Vec<Arc<ResourceCell>> {
        self.keys_of(ResourceKind::Script)
            .into_iter()
            .filter_map(|key| self.cell(key).cloned())
            .filter(|cell| {
                cell.object()
                    .as_any()
                    .downcast_ref::<Script>()
                    .is_some_and(|s| s.is_surface_shader() == surface_shader)
            })
            .collect()
    }

    /// Load a script instance, reusing a resident one with the same key
    pub fn load_script(
        &mut self,
        stream: &InputStream,
        this_type: &str,
        instance_id: &str,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ScriptHandle> {
        self.pump_releases();
        let uid = script_uid(stream.name(), instance_id);
        if !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_script(&uid, false) {
                return self.process_existing(key, flags);
            }
        }
        let script = Script::new(stream.clone(), this_type, instance_id, false, None);
        let stream_type = stream.stream_type();
        self.process_new(ResourceId::next_internal(), script, uid, stream_type, flags, source)
    }

    /// Load the script that generates a surface shader
    pub fn load_surface_shader_script(
        &mut self,
        stream: &InputStream,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ScriptHandle> {
        self.pump_releases();
        let uid = script_uid(stream.name(), DEFAULT_SCRIPT_INSTANCE);
        if !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_script(&uid, true) {
                return self.process_existing(key, flags);
            }
        }
        let define = self.render_driver().api().shader_macro();
        let script = Script::new(stream.clone(), "", DEFAULT_SCRIPT_INSTANCE, true, define);
        let stream_type = stream.stream_type();
        self.process_new(ResourceId::next_internal(), script, uid, stream_type, flags, source)
    }

    /// Reload every plain script, now or after `delay` seconds
    ///
    /// Surface-shader scripts are reloaded by `reload_shaders`. Broadcasts
    /// `ScriptsReloaded` once done; the first reload failure is returned
    /// after every script has been attempted.
    pub fn reload_scripts(&mut self, delay: f64) -> Result<()> {
        if delay > 0.0 {
            self.send_to_self(Message::ReloadScripts, delay);
            return Ok(());
        }
        self.pump_releases();

        let scripts = self.script_cells(false);
        for cell in &scripts {
            self.unload_cell(cell);
        }
        let mut result = Ok(());
        for cell in &scripts {
            if let Err(error) = self.load_cell(cell) {
                if result.is_ok() {
                    result = Err(error);
                }
            }
        }

        engine_debug!("carbon::ResourceManager", "Reloaded {} script(s)", scripts.len());
        self.broadcast(Message::ScriptsReloaded);
        result
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
