/// Texture resources.
///
/// Textures are either streamed from a file (deduplicated by stream name)
/// or created procedurally from an `ImageInfo`. The loader applies the
/// `[Resources]` mip level and compression settings.
///
/// In sandbox mode a texture whose file is missing is kept resident as a
/// placeholder so authored references to it survive.

use std::any::Any;
use std::sync::Arc;
use crate::config::InitConfig;
use crate::error::{Error, Result};
use crate::render_driver::{DeviceObjectDesc, DeviceObjectKind, MemoryPool, RenderDriver};
use crate::resource::{
    DebugSource, DeviceBacking, Resource, ResourceFlags, ResourceHandle, ResourceId,
    ResourceKind, ResourceManager,
};
use crate::system::{InputStream, StreamType};
use crate::world::SandboxMode;
use crate::{engine_error, engine_warn};

pub type TextureHandle = ResourceHandle<Texture>;

// ===== DATA TYPES =====

/// Dimensions and placement of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Mip levels stored in the source (1 = none)
    pub mip_levels: u32,
    pub pool: MemoryPool,
}

impl Default for ImageInfo {
    fn default() -> Self {
        Self { width: 0, height: 0, mip_levels: 1, pool: MemoryPool::Managed }
    }
}

impl ImageInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    /// Byte size of the top level (4 bytes per texel)
    pub fn byte_size(&self) -> u64 {
        self.width as u64 * self.height as u64 * 4
    }

    /// Length of a full mip chain for these dimensions
    pub fn full_chain_levels(&self) -> u32 {
        let largest = self.width.max(self.height).max(1);
        32 - largest.leading_zeros()
    }
}

/// Mip levels to build for a texture
///
/// `requested` follows `TextureMipLevels`: 0 builds the full chain, -1
/// keeps the levels stored in the source, anything else is clamped to the
/// full chain.
pub fn resolve_mip_levels(requested: i32, info: &ImageInfo) -> u32 {
    let full = info.full_chain_levels();
    match requested {
        0 => full,
        r if r < 0 => info.mip_levels.max(1),
        r => (r as u32).min(full),
    }
}

// ===== TEXTURE =====

pub struct Texture {
    stream: Option<InputStream>,
    info: ImageInfo,
    init: InitConfig,
    allow_placeholder: bool,
    placeholder: bool,
    mip_levels: u32,
    data: Vec<u8>,
    backing: DeviceBacking,
}

impl Texture {
    fn new(
        driver: Arc<dyn RenderDriver>,
        label: &str,
        stream: Option<InputStream>,
        info: ImageInfo,
        init: InitConfig,
    ) -> Self {
        let desc = DeviceObjectDesc {
            kind: DeviceObjectKind::Texture,
            label: label.to_string(),
            size: info.byte_size(),
            pool: info.pool,
        };
        Self {
            stream,
            info,
            init,
            allow_placeholder: false,
            placeholder: false,
            mip_levels: 0,
            data: Vec::new(),
            backing: DeviceBacking::new(driver, desc),
        }
    }

    /// Texture read from a stream on load
    pub fn from_stream(
        driver: Arc<dyn RenderDriver>,
        stream: InputStream,
        init: InitConfig,
        allow_placeholder: bool,
    ) -> Self {
        let label = stream.name().to_string();
        let mut texture = Self::new(driver, &label, Some(stream), ImageInfo::default(), init);
        texture.allow_placeholder = allow_placeholder;
        texture
    }

    /// Blank texture of the given dimensions
    pub fn from_image(driver: Arc<dyn RenderDriver>, label: &str, info: ImageInfo, init: InitConfig) -> Self {
        Self::new(driver, label, None, info, init)
    }

    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    pub fn stream_name(&self) -> Option<&str> {
        self.stream.as_ref().map(|s| s.name())
    }

    /// Resident without data because its file was missing (sandbox only)
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Mip levels built by the last load
    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    pub fn is_compressed(&self) -> bool {
        self.init.compress_textures
    }

    /// Size of the loaded texel data
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub fn device_object(&self) -> Option<crate::render_driver::DeviceObject> {
        self.backing.object()
    }
}

impl Resource for Texture {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Texture
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        if let Some(stream) = &self.stream {
            if stream.stream_type() == StreamType::None {
                if self.allow_placeholder {
                    self.placeholder = true;
                    return Ok(());
                }
                return Err(Error::NotFound(format!("texture stream '{}'", stream.name())));
            }
            self.data = stream.read_all()?;
            self.backing.set_size(self.data.len() as u64);
        } else {
            self.data = vec![0; self.info.byte_size() as usize];
        }
        self.placeholder = false;
        self.mip_levels = resolve_mip_levels(self.init.texture_mip_levels, &self.info);
        self.backing.create()
    }

    fn unload(&mut self) {
        self.data = Vec::new();
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

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    /// Load a texture from a stream, reusing a resident one of the same name
    pub fn load_texture(
        &mut self,
        stream: &InputStream,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<TextureHandle> {
        self.pump_releases();
        let name = stream.name().to_string();
        if !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_by_name(ResourceKind::Texture, &name) {
                return self.process_existing(key, flags);
            }
        }

        let stream_type = stream.stream_type();
        let allow_placeholder = self.sandbox_mode() != SandboxMode::Disabled;
        if stream_type == StreamType::None {
            if !allow_placeholder {
                engine_error!(
                    "carbon::ResourceManager",
                    "Unable to load texture '{}' because the file or resource was not found.",
                    name
                );
                return Err(Error::NotFound(name));
            }
            engine_warn!(
                "carbon::ResourceManager",
                "Texture '{}' was not found. A placeholder will remain resident while sandbox mode is active.",
                name
            );
        }

        let texture = Texture::from_stream(
            self.render_driver().clone(),
            stream.clone(),
            self.init_config(),
            allow_placeholder,
        );
        self.process_new(ResourceId::next_internal(), texture, name, stream_type, flags, source)
    }

    /// Create a blank texture, reusing a resident one of the same name
    pub fn create_texture(
        &mut self,
        name: &str,
        info: ImageInfo,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<TextureHandle> {
        self.pump_releases();
        if !name.is_empty() && !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_by_name(ResourceKind::Texture, name) {
                return self.process_existing(key, flags);
            }
        }
        let texture = Texture::from_image(self.render_driver().clone(), name, info, self.init_config());
        self.process_new(
            ResourceId::next_internal(),
            texture,
            name.to_string(),
            StreamType::Memory,
            flags,
            source,
        )
    }

    /// Register a caller-constructed texture
    pub fn add_texture(
        &mut self,
        texture: Texture,
        name: &str,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<TextureHandle> {
        self.pump_releases();
        let stream_type = texture
            .stream
            .as_ref()
            .map(|s| s.stream_type())
            .unwrap_or(StreamType::Memory);
        self.process_new(ResourceId::next_internal(), texture, name.to_string(), stream_type, flags, source)
    }

    /// Find a resident texture by name
    pub fn get_texture(&mut self, name: &str) -> Option<TextureHandle> {
        self.pump_releases();
        let key = self.find_by_name(ResourceKind::Texture, name)?;
        self.handle_for(key)
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
