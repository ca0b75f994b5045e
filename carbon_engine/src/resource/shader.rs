/// Hardware vertex and pixel shaders.
///
/// Shader permutations are keyed by `ShaderIdentifier`. `load_*_shader`
/// looks only at the compiled shader cache
/// (`sys://Cache/Shaders/<hash>.<ext>`); a miss is reported as failure so
/// the caller can compile with `create_*_shader`, which writes the fresh
/// bytecode back to the cache. The cache is bypassed entirely for a stage
/// while shader debugging is enabled for it.

use std::any::Any;
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::render_driver::{
    DeviceObjectDesc, DeviceObjectKind, MemoryPool, RenderDriver, ShaderStage,
};
use crate::resource::identity::IdentityKey;
use crate::resource::{
    DebugSource, DeviceBacking, Resource, ResourceFlags, ResourceHandle, ResourceId,
    ResourceKind, ResourceManager, ShaderIdentifier,
};
use crate::system::{InputStream, StreamType};
use crate::{engine_trace, engine_warn};

pub type ShaderHandle = ResourceHandle<Shader>;

/// Logical directory of the compiled shader cache
pub const SHADER_CACHE_DIRECTORY: &str = "sys://Cache/Shaders";

enum ShaderSource {
    /// Bytecode read from the compiled cache
    Cache(InputStream),
    /// Source compiled by the driver
    Code {
        code: String,
        entry_point: String,
        macros: Vec<String>,
    },
}

pub struct Shader {
    stage: ShaderStage,
    identifier: ShaderIdentifier,
    source: ShaderSource,
    bytecode: Vec<u8>,
    backing: DeviceBacking,
}

impl Shader {
    fn new(
        driver: Arc<dyn RenderDriver>,
        stage: ShaderStage,
        identifier: ShaderIdentifier,
        source: ShaderSource,
    ) -> Self {
        let kind = match stage {
            ShaderStage::Vertex => DeviceObjectKind::VertexShader,
            ShaderStage::Pixel => DeviceObjectKind::PixelShader,
        };
        let desc = DeviceObjectDesc {
            kind,
            label: identifier.shader_identifier.clone(),
            size: 0,
            pool: MemoryPool::Managed,
        };
        Self {
            stage,
            identifier,
            source,
            bytecode: Vec::new(),
            backing: DeviceBacking::new(driver, desc),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn identifier(&self) -> &ShaderIdentifier {
        &self.identifier
    }

    /// Compiled bytecode (empty until loaded)
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Was this shader read from the compiled cache?
    pub fn from_cache(&self) -> bool {
        matches!(self.source, ShaderSource::Cache(_))
    }
}

impl Resource for Shader {
    fn kind(&self) -> ResourceKind {
        match self.stage {
            ShaderStage::Vertex => ResourceKind::VertexShader,
            ShaderStage::Pixel => ResourceKind::PixelShader,
        }
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        self.bytecode = match &self.source {
            ShaderSource::Cache(stream) => {
                let bytes = stream.read_all()?;
                if bytes.is_empty() {
                    return Err(Error::InvalidResource(format!(
                        "compiled shader '{}' is empty",
                        stream.name()
                    )));
                }
                bytes
            }
            ShaderSource::Code { code, entry_point, macros } => {
                let macros: Vec<&str> = macros.iter().map(String::as_str).collect();
                self.backing
                    .driver()
                    .compile_shader(self.stage, code, entry_point, &macros)?
            }
        };
        self.backing.set_size(self.bytecode.len() as u64);
        self.backing.create()
    }

    fn unload(&mut self) {
        self.bytecode = Vec::new();
        self.backing.release();
    }

    fn is_lost(&self) -> bool {
        self.backing.is_lost()
    }

    fn device_lost(&mut self) {
        self.backing.device_lost();
    }

    fn device_restored(&mut self) -> Result<()> {
        self.backing.device_restored()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn identity_for(stage: ShaderStage, identifier: &ShaderIdentifier) -> IdentityKey {
    match stage {
        ShaderStage::Vertex => IdentityKey::VertexShader(identifier.clone()),
        ShaderStage::Pixel => IdentityKey::PixelShader(identifier.clone()),
    }
}

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    /// Logical cache path for a permutation, if this driver has a cache
    pub fn shader_cache_path(&self, stage: ShaderStage, identifier: &ShaderIdentifier) -> Option<String> {
        let extension = self.render_driver().api().shader_cache_extension(stage)?;
        Some(format!("{}/{}.{}", SHADER_CACHE_DIRECTORY, identifier.hash_name(), extension))
    }

    fn shader_cache_enabled(&self, stage: ShaderStage) -> bool {
        !self.render_driver().is_shader_debug_enabled(stage)
    }

    fn load_shader(
        &mut self,
        stage: ShaderStage,
        identifier: &ShaderIdentifier,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ShaderHandle> {
        self.pump_releases();
        let identity = identity_for(stage, identifier);
        if !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_identity(&identity) {
                return self.process_existing(key, flags);
            }
        }

        if !self.shader_cache_enabled(stage) {
            return Err(Error::NotFound(format!(
                "compiled shader cache is disabled while debugging {:?} shaders",
                stage
            )));
        }
        let path = self.shader_cache_path(stage, identifier).ok_or_else(|| {
            Error::NotFound("the active render driver has no compiled shader cache".to_string())
        })?;
        let stream = self.file_system().open(&path);
        let stream_type = stream.stream_type();
        if stream_type == StreamType::None {
            engine_trace!("carbon::ResourceManager", "Shader cache miss for '{}'", path);
            return Err(Error::NotFound(path));
        }

        let shader = Shader::new(
            self.render_driver().clone(),
            stage,
            identifier.clone(),
            ShaderSource::Cache(stream),
        );
        let handle = self.process_new(
            ResourceId::next_internal(),
            shader,
            identifier.shader_identifier.clone(),
            stream_type,
            flags,
            source,
        )?;
        self.file_identity(identity, handle.cell().key);
        Ok(handle)
    }

    #[allow(clippy::too_many_arguments)]
    fn create_shader(
        &mut self,
        stage: ShaderStage,
        identifier: &ShaderIdentifier,
        code: &str,
        entry_point: &str,
        macros: &[&str],
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ShaderHandle> {
        self.pump_releases();
        let identity = identity_for(stage, identifier);
        if !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_identity(&identity) {
                return self.process_existing(key, flags);
            }
        }

        let shader = Shader::new(
            self.render_driver().clone(),
            stage,
            identifier.clone(),
            ShaderSource::Code {
                code: code.to_string(),
                entry_point: entry_point.to_string(),
                macros: macros.iter().map(|m| m.to_string()).collect(),
            },
        );
        let handle = self.process_new(
            ResourceId::next_internal(),
            shader,
            identifier.shader_identifier.clone(),
            StreamType::Memory,
            flags,
            source,
        )?;
        self.file_identity(identity, handle.cell().key);

        if self.shader_cache_enabled(stage) {
            if let Some(path) = self.shader_cache_path(stage, identifier) {
                let bytecode = handle.read(|s| s.bytecode.clone()).unwrap_or_default();
                if !bytecode.is_empty() {
                    if let Err(error) = self.file_system().write(&path, &bytecode) {
                        engine_warn!(
                            "carbon::ResourceManager",
                            "Unable to write compiled shader cache file '{}': {}",
                            path, error
                        );
                    }
                }
            }
        }
        Ok(handle)
    }

    /// Load a vertex shader permutation from the compiled cache
    pub fn load_vertex_shader(
        &mut self,
        identifier: &ShaderIdentifier,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ShaderHandle> {
        self.load_shader(ShaderStage::Vertex, identifier, flags, source)
    }

    /// Load a pixel shader permutation from the compiled cache
    pub fn load_pixel_shader(
        &mut self,
        identifier: &ShaderIdentifier,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ShaderHandle> {
        self.load_shader(ShaderStage::Pixel, identifier, flags, source)
    }

    /// Compile a vertex shader permutation
    #[allow(clippy::too_many_arguments)]
    pub fn create_vertex_shader(
        &mut self,
        identifier: &ShaderIdentifier,
        code: &str,
        entry_point: &str,
        macros: &[&str],
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ShaderHandle> {
        self.create_shader(ShaderStage::Vertex, identifier, code, entry_point, macros, flags, source)
    }

    /// Compile a pixel shader permutation
    #[allow(clippy::too_many_arguments)]
    pub fn create_pixel_shader(
        &mut self,
        identifier: &ShaderIdentifier,
        code: &str,
        entry_point: &str,
        macros: &[&str],
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<ShaderHandle> {
        self.create_shader(ShaderStage::Pixel, identifier, code, entry_point, macros, flags, source)
    }

    /// Find a resident vertex shader permutation
    pub fn get_vertex_shader(&mut self, identifier: &ShaderIdentifier) -> Option<ShaderHandle> {
        self.pump_releases();
        let key = self.find_identity(&IdentityKey::VertexShader(identifier.clone()))?;
        self.handle_for(key)
    }

    /// Find a resident pixel shader permutation
    pub fn get_pixel_shader(&mut self, identifier: &ShaderIdentifier) -> Option<ShaderHandle> {
        self.pump_releases();
        let key = self.find_identity(&IdentityKey::PixelShader(identifier.clone()))?;
        self.handle_for(key)
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
