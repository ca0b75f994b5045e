/// Render targets and depth-stencil targets.
///
/// Both live in the default pool and are lost with the device. Render
/// targets are deduplicated through the name identity table, depth-stencil
/// targets by a scan of their resource list.

use std::any::Any;
use std::sync::Arc;
use crate::error::Result;
use crate::render_driver::{DeviceObjectDesc, DeviceObjectKind, MemoryPool, RenderDriver};
use crate::resource::identity::IdentityKey;
use crate::resource::{
    DebugSource, DeviceBacking, ImageInfo, Resource, ResourceFlags, ResourceHandle, ResourceId,
    ResourceKind, ResourceManager,
};
use crate::system::StreamType;

pub type RenderTargetHandle = ResourceHandle<RenderTarget>;

pub struct RenderTarget {
    kind: ResourceKind,
    info: ImageInfo,
    backing: DeviceBacking,
}

impl RenderTarget {
    fn new(driver: Arc<dyn RenderDriver>, kind: ResourceKind, label: &str, info: ImageInfo) -> Self {
        let device_kind = match kind {
            ResourceKind::DepthStencilTarget => DeviceObjectKind::DepthStencilTarget,
            _ => DeviceObjectKind::RenderTarget,
        };
        let desc = DeviceObjectDesc {
            kind: device_kind,
            label: label.to_string(),
            size: info.byte_size(),
            pool: MemoryPool::Default,
        };
        Self { kind, info, backing: DeviceBacking::new(driver, desc) }
    }

    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    pub fn device_object(&self) -> Option<crate::render_driver::DeviceObject> {
        self.backing.object()
    }
}

impl Resource for RenderTarget {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn load(&mut self, _manager: &mut ResourceManager) -> Result<()> {
        self.backing.create()
    }

    fn unload(&mut self) {
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
    /// Create a render target, reusing a resident one of the same name
    pub fn create_render_target(
        &mut self,
        name: &str,
        info: ImageInfo,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<RenderTargetHandle> {
        self.pump_releases();
        let identity = IdentityKey::RenderTarget(name.to_string());
        if !name.is_empty() && !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_identity(&identity) {
                return self.process_existing(key, flags);
            }
        }
        let target = RenderTarget::new(self.render_driver().clone(), ResourceKind::RenderTarget, name, info);
        let handle = self.process_new(
            ResourceId::next_internal(),
            target,
            name.to_string(),
            StreamType::None,
            flags,
            source,
        )?;
        if !name.is_empty() {
            self.file_identity(identity, handle.cell().key);
        }
        Ok(handle)
    }

    /// Create a depth-stencil target, reusing a resident one of the same name
    pub fn create_depth_stencil_target(
        &mut self,
        name: &str,
        info: ImageInfo,
        flags: ResourceFlags,
        source: DebugSource,
    ) -> Result<RenderTargetHandle> {
        self.pump_releases();
        if !name.is_empty() && !flags.contains(ResourceFlags::FORCE_NEW) {
            if let Some(key) = self.find_by_name(ResourceKind::DepthStencilTarget, name) {
                return self.process_existing(key, flags);
            }
        }
        let target = RenderTarget::new(
            self.render_driver().clone(),
            ResourceKind::DepthStencilTarget,
            name,
            info,
        );
        self.process_new(
            ResourceId::next_internal(),
            target,
            name.to_string(),
            StreamType::None,
            flags,
            source,
        )
    }

    /// Find a resident render target by name
    pub fn get_render_target(&mut self, name: &str) -> Option<RenderTargetHandle> {
        self.pump_releases();
        let key = self.find_identity(&IdentityKey::RenderTarget(name.to_string()))?;
        self.handle_for(key)
    }

    /// Find a resident depth-stencil target by name
    pub fn get_depth_stencil_target(&mut self, name: &str) -> Option<RenderTargetHandle> {
        self.pump_releases();
        let key = self.find_by_name(ResourceKind::DepthStencilTarget, name)?;
        self.handle_for(key)
    }
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
