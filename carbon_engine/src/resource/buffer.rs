/// Vertex, index and constant buffers.
///
/// Every buffer keeps a CPU shadow of its contents. Buffers in the default
/// pool lose their device object on device loss and rebuild it from the
/// shadow on restore.
///
/// Vertex and index buffers are never shared: each request creates a new
/// one, named after its length, usage and pool.

use std::any::Any;
use std::sync::Arc;
use bitflags::bitflags;
use crate::error::{Error, Result};
use crate::render_driver::{
    BufferFormat, DeviceObjectDesc, DeviceObjectKind, MemoryPool, RenderDriver,
};
use crate::resource::{
    DebugSource, DeviceBacking, Resource, ResourceFlags, ResourceHandle, ResourceId,
    ResourceKind, ResourceManager,
};
use crate::system::StreamType;
use crate::engine_bail;

pub type BufferHandle = ResourceHandle<Buffer>;

bitflags! {
    /// Buffer usage hints
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BufferUsage: u32 {
        const WRITE_ONLY = 0x1;
        const DYNAMIC = 0x2;
        const POINTS = 0x4;
    }
}

/// Constant buffer description
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantBufferDesc {
    pub name: String,
    /// Size in bytes
    pub length: u32,
    pub pool: MemoryPool,
}

// ===== BUFFER =====

pub struct Buffer {
    kind: ResourceKind,
    length: u32,
    usage: BufferUsage,
    format: Option<BufferFormat>,
    shadow: Vec<u8>,
    backing: DeviceBacking,
}

impl Buffer {
    fn new(
        driver: Arc<dyn RenderDriver>,
        kind: ResourceKind,
        label: String,
        length: u32,
        usage: BufferUsage,
        pool: MemoryPool,
        format: Option<BufferFormat>,
    ) -> Self {
        let device_kind = match kind {
            ResourceKind::IndexBuffer => DeviceObjectKind::IndexBuffer,
            ResourceKind::ConstantBuffer => DeviceObjectKind::ConstantBuffer,
            _ => DeviceObjectKind::VertexBuffer,
        };
        let desc = DeviceObjectDesc { kind: device_kind, label, size: length as u64, pool };
        Self {
            kind,
            length,
            usage,
            format,
            shadow: Vec::new(),
            backing: DeviceBacking::new(driver, desc),
        }
    }

    /// Size in bytes
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    pub fn pool(&self) -> MemoryPool {
        self.backing.desc().pool
    }

    /// Index element format (index buffers only)
    pub fn format(&self) -> Option<BufferFormat> {
        self.format
    }

    /// CPU copy of the contents
    pub fn contents(&self) -> &[u8] {
        &self.shadow
    }

    pub fn device_object(&self) -> Option<crate::render_driver::DeviceObject> {
        self.backing.object()
    }

    /// Write bytes at an offset
    pub fn update(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        let end = offset as usize + data.len();
        if end > self.shadow.len() {
            engine_bail!(
                "carbon::Buffer",
                "Write of {} byte(s) at offset {} exceeds buffer length {}",
                data.len(), offset, self.length
            );
        }
        self.shadow[offset as usize..end].copy_from_slice(data);
        Ok(())
    }
}

impl Resource for Buffer {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        if self.length == 0 {
            return Err(Error::InvalidResource("buffer length is zero".to_string()));
        }
        if let Some(format) = self.format {
            if !self.backing.driver().supports_buffer_format(format) {
                return Err(Error::InvalidResource(format!(
                    "index format {:?} is not supported by the render driver",
                    format
                )));
            }
        }
        self.shadow = vec![0; self.length as usize];
        self.backing.create()
    }

    fn unload(&mut self) {
        self.shadow = Vec::new();
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

fn buffer_name(prefix: &str, length: u32, usage: BufferUsage, pool: MemoryPool) -> String {
    format!("{}(L:{}|U:{}|P:{})", prefix, length, usage.bits(), pool as u32)
}

// ===== MANAGER OPERATIONS =====

impl ResourceManager {
    /// Create a new vertex buffer
    pub fn create_vertex_buffer(
        &mut self,
        length: u32,
        usage: BufferUsage,
        pool: MemoryPool,
        source: DebugSource,
    ) -> Result<BufferHandle> {
        self.pump_releases();
        let name = buffer_name("VertexBuffer", length, usage, pool);
        let buffer = Buffer::new(
            self.render_driver().clone(),
            ResourceKind::VertexBuffer,
            name.clone(),
            length,
            usage,
            pool,
            None,
        );
        self.process_new(
            ResourceId::next_internal(),
            buffer,
            name,
            StreamType::Memory,
            ResourceFlags::empty(),
            source,
        )
    }

    /// Create a new index buffer
    pub fn create_index_buffer(
        &mut self,
        length: u32,
        usage: BufferUsage,
        format: BufferFormat,
        pool: MemoryPool,
        source: DebugSource,
    ) -> Result<BufferHandle> {
        self.pump_releases();
        let name = buffer_name("IndexBuffer", length, usage, pool);
        let buffer = Buffer::new(
            self.render_driver().clone(),
            ResourceKind::IndexBuffer,
            name.clone(),
            length,
            usage,
            pool,
            Some(format),
        );
        self.process_new(
            ResourceId::next_internal(),
            buffer,
            name,
            StreamType::Memory,
            ResourceFlags::empty(),
            source,
        )
    }

    /// Create a new constant buffer named by its description
    pub fn create_constant_buffer(
        &mut self,
        desc: &ConstantBufferDesc,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<BufferHandle> {
        self.pump_releases();
        let buffer = Buffer::new(
            self.render_driver().clone(),
            ResourceKind::ConstantBuffer,
            desc.name.clone(),
            desc.length,
            BufferUsage::DYNAMIC,
            desc.pool,
            None,
        );
        self.process_new(
            ResourceId::next_internal(),
            buffer,
            desc.name.clone(),
            StreamType::Memory,
            flags,
            source,
        )
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
