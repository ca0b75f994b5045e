/// Mock render driver for unit tests (no GPU required)
///
/// Records every device object it hands out, lets tests pick the active
/// API and shader debug flags, and can be told to fail allocations or
/// compilation.

#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use rustc_hash::FxHashMap;
#[cfg(test)]
use crate::error::{Error, Result};
#[cfg(test)]
use crate::render_driver::{
    RenderDriver, RenderApi, ShaderStage, BufferFormat,
    DeviceObject, DeviceObjectDesc,
};

#[cfg(test)]
#[derive(Default)]
struct MockState {
    next_object: u64,
    live: FxHashMap<DeviceObject, DeviceObjectDesc>,
    created: usize,
    destroyed: usize,
    compiled: Vec<(ShaderStage, String, Vec<String>)>,
    fail_create: bool,
    fail_compile: bool,
    vertex_debug: bool,
    pixel_debug: bool,
    unsupported_formats: Vec<BufferFormat>,
}

// ============================================================================
// Mock RenderDriver
// ============================================================================

#[cfg(test)]
pub struct MockRenderDriver {
    api: RenderApi,
    state: Mutex<MockState>,
}

#[cfg(test)]
impl MockRenderDriver {
    pub fn new() -> Self {
        Self::with_api(RenderApi::DirectX11)
    }

    pub fn with_api(api: RenderApi) -> Self {
        Self { api, state: Mutex::new(MockState::default()) }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.state().fail_create = fail;
    }

    pub fn set_fail_compile(&self, fail: bool) {
        self.state().fail_compile = fail;
    }

    pub fn set_shader_debug(&self, stage: ShaderStage, enabled: bool) {
        match stage {
            ShaderStage::Vertex => self.state().vertex_debug = enabled,
            ShaderStage::Pixel => self.state().pixel_debug = enabled,
        }
    }

    pub fn set_format_unsupported(&self, format: BufferFormat) {
        self.state().unsupported_formats.push(format);
    }

    pub fn created_count(&self) -> usize {
        self.state().created
    }

    pub fn destroyed_count(&self) -> usize {
        self.state().destroyed
    }

    pub fn live_count(&self) -> usize {
        self.state().live.len()
    }

    /// Labels of live objects, sorted
    pub fn live_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.state().live.values().map(|d| d.label.clone()).collect();
        labels.sort();
        labels
    }

    pub fn compile_count(&self) -> usize {
        self.state().compiled.len()
    }

    /// Macros passed to the most recent compilation
    pub fn last_compile_macros(&self) -> Vec<String> {
        self.state().compiled.last().map(|c| c.2.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl RenderDriver for MockRenderDriver {
    fn api(&self) -> RenderApi {
        self.api
    }

    fn is_shader_debug_enabled(&self, stage: ShaderStage) -> bool {
        let state = self.state();
        match stage {
            ShaderStage::Vertex => state.vertex_debug,
            ShaderStage::Pixel => state.pixel_debug,
        }
    }

    fn supports_buffer_format(&self, format: BufferFormat) -> bool {
        !self.state().unsupported_formats.contains(&format)
    }

    fn create_object(&self, desc: &DeviceObjectDesc) -> Result<DeviceObject> {
        let mut state = self.state();
        if state.fail_create {
            return Err(Error::OutOfMemory);
        }
        state.next_object += 1;
        let object = DeviceObject(state.next_object);
        state.live.insert(object, desc.clone());
        state.created += 1;
        Ok(object)
    }

    fn destroy_object(&self, object: DeviceObject) {
        let mut state = self.state();
        if state.live.remove(&object).is_some() {
            state.destroyed += 1;
        }
    }

    fn compile_shader(
        &self,
        stage: ShaderStage,
        source: &str,
        _entry_point: &str,
        macros: &[&str],
    ) -> Result<Vec<u8>> {
        let mut state = self.state();
        if state.fail_compile {
            return Err(Error::BackendError("mock compile failure".to_string()));
        }
        state.compiled.push((
            stage,
            source.to_string(),
            macros.iter().map(|m| m.to_string()).collect(),
        ));
        Ok(source.as_bytes().to_vec())
    }
}
