/// Surface shaders.
///
/// A surface shader is driven by a surface-shader script loaded as a child
/// resource. Surface shaders are never shared: every request creates a new
/// one.

use std::any::Any;
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::resource::resource::ResourceCell;
use crate::resource::{
    DebugSource, Resource, ResourceFlags, ResourceHandle, ResourceId, ResourceKind,
    ResourceManager, Script, ScriptHandle,
};
use crate::system::{InputStream, Message, StreamType};
use crate::{debug_source, engine_debug, engine_warn};

pub type SurfaceShaderHandle = ResourceHandle<SurfaceShader>;

pub struct SurfaceShader {
    stream: InputStream,
    script: Option<ScriptHandle>,
}

impl SurfaceShader {
    pub fn new(stream: InputStream) -> Self {
        Self { stream, script: None }
    }

    pub fn stream_name(&self) -> &str {
        self.stream.name()
    }

    /// Script generating this shader (None until loaded)
    pub fn script(&self) -> Option<&ScriptHandle> {
        self.script.as_ref()
    }
}

impl Resource for SurfaceShader {
    fn kind(&self) -> ResourceKind {
        ResourceKind::SurfaceShader
    }

    fn load(&mut self, manager: &mut ResourceManager) -> Result<()> {
        let script = manager.load_surface_shader_script(&self.stream, ResourceFlags::empty(), debug_source!())?;
        self.script = Some(script);
        Ok(())
    }

    fn unload(&mut self) {
        self.script = None;
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
    fn cells_of(&self, kind: ResourceKind) -> Vec<Arc<ResourceCell>> {
        self.keys_of(kind)
            .into_iter()
            .filter_map(|key| self.cell(key).cloned())
            .collect()
    }

    /// Create a new surface shader from a script stream
    pub fn create_surface_shader(
        &mut self,
        stream: &InputStream,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<SurfaceShaderHandle> {
        self.pump_releases();
        let flags = flags - ResourceFlags::FORCE_NEW;
        let stream_type = stream.stream_type();
        if stream_type == StreamType::None {
            engine_warn!(
                "carbon::ResourceManager",
                "Unable to create surface shader from stream '{}' because the file or resource was not found.",
                stream.name()
            );
            return Err(Error::NotFound(stream.name().to_string()));
        }
        let shader = SurfaceShader::new(stream.clone());
        self.process_new(
            ResourceId::next_internal(),
            shader,
            stream.name().to_string(),
            stream_type,
            flags,
            source,
        )
    }

    /// Create a surface shader from the configured default shader script
    pub fn create_default_surface_shader(
        &mut self,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<SurfaceShaderHandle> {
        let stream = match &self.default_shader {
            Some(script) => script.read(|s: &Script| s.stream().clone()),
            None => None,
        };
        let stream = match stream {
            Some(stream) => stream,
            None if !self.config().default_shader.is_empty() => {
                self.file_system().open(&self.config().default_shader)
            }
            None => {
                return Err(Error::InvalidState("no default surface shader is configured".to_string()));
            }
        };
        self.create_surface_shader(&stream, flags, source)
    }

    /// Reload surface shaders and drop cached shader permutations, now or
    /// after `delay` seconds
    ///
    /// Resident vertex/pixel shaders are released (held ones stay alive
    /// for their owners but are no longer shared), surface shaders and
    /// their scripts are unloaded, then every surface shader is loaded
    /// again. Broadcasts `ShadersReloaded` once done.
    pub fn reload_shaders(&mut self, delay: f64) -> Result<()> {
        if delay > 0.0 {
            self.send_to_self(Message::ReloadShaders, delay);
            return Ok(());
        }
        self.pump_releases();

        self.release_resource_list(ResourceKind::VertexShader, false);
        self.release_resource_list(ResourceKind::PixelShader, false);

        let shaders = self.cells_of(ResourceKind::SurfaceShader);
        for cell in &shaders {
            self.unload_cell(cell);
        }
        self.pump_releases();
        for cell in self.script_cells_for_reload() {
            self.unload_cell(&cell);
        }

        let mut result = Ok(());
        for cell in &shaders {
            if let Err(error) = self.load_cell(cell) {
                if result.is_ok() {
                    result = Err(error);
                }
            }
        }

        engine_debug!("carbon::ResourceManager", "Reloaded {} surface shader(s)", shaders.len());
        self.broadcast(Message::ShadersReloaded);
        result
    }

    fn script_cells_for_reload(&self) -> Vec<Arc<ResourceCell>> {
        self.cells_of(ResourceKind::Script)
            .into_iter()
            .filter(|cell| {
                cell.object()
                    .as_any()
                    .downcast_ref::<Script>()
                    .is_some_and(|s| s.is_surface_shader())
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "surface_shader_tests.rs"]
mod tests;
