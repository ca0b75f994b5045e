/// Null render driver.
///
/// Issues device object ids without touching any graphics API. Used for
/// headless tools, dedicated servers and end-to-end tests. Keeps simple
/// allocation statistics.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use crate::error::Result;
use crate::render_driver::{
    RenderDriver, RenderApi, ShaderStage, BufferFormat,
    DeviceObject, DeviceObjectDesc,
};

pub struct NullRenderDriver {
    next_object: AtomicU64,
    created: AtomicUsize,
    destroyed: AtomicUsize,
    compiled: AtomicUsize,
}

impl NullRenderDriver {
    pub fn new() -> Self {
        Self {
            next_object: AtomicU64::new(1),
            created: AtomicUsize::new(0),
            destroyed: AtomicUsize::new(0),
            compiled: AtomicUsize::new(0),
        }
    }

    /// Objects created so far
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Objects destroyed so far
    pub fn destroyed_count(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Objects currently alive
    pub fn live_count(&self) -> usize {
        self.created_count().saturating_sub(self.destroyed_count())
    }

    /// Shader compilations requested so far
    pub fn compile_count(&self) -> usize {
        self.compiled.load(Ordering::SeqCst)
    }
}

impl Default for NullRenderDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderDriver for NullRenderDriver {
    fn api(&self) -> RenderApi {
        RenderApi::Null
    }

    fn is_shader_debug_enabled(&self, _stage: ShaderStage) -> bool {
        false
    }

    fn supports_buffer_format(&self, _format: BufferFormat) -> bool {
        true
    }

    fn create_object(&self, _desc: &DeviceObjectDesc) -> Result<DeviceObject> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(DeviceObject(self.next_object.fetch_add(1, Ordering::SeqCst)))
    }

    fn destroy_object(&self, _object: DeviceObject) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }

    fn compile_shader(
        &self,
        _stage: ShaderStage,
        source: &str,
        _entry_point: &str,
        _macros: &[&str],
    ) -> Result<Vec<u8>> {
        self.compiled.fetch_add(1, Ordering::SeqCst);
        Ok(source.as_bytes().to_vec())
    }
}

#[cfg(test)]
#[path = "null_render_driver_tests.rs"]
mod tests;
