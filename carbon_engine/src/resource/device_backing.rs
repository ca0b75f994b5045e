/// Device object owned by a resource.
///
/// Keeps the logical description next to the driver allocation so the
/// object can be dropped on device loss and rebuilt on restore.

use std::sync::Arc;
use crate::error::Result;
use crate::render_driver::{DeviceObject, DeviceObjectDesc, RenderDriver};

pub struct DeviceBacking {
    driver: Arc<dyn RenderDriver>,
    desc: DeviceObjectDesc,
    object: Option<DeviceObject>,
    lost: bool,
}

impl DeviceBacking {
    /// Describe an object; nothing is allocated until `create`
    pub fn new(driver: Arc<dyn RenderDriver>, desc: DeviceObjectDesc) -> Self {
        Self { driver, desc, object: None, lost: false }
    }

    pub fn driver(&self) -> &Arc<dyn RenderDriver> {
        &self.driver
    }

    pub fn desc(&self) -> &DeviceObjectDesc {
        &self.desc
    }

    pub fn object(&self) -> Option<DeviceObject> {
        self.object
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Change the allocation size used by the next `create`
    pub fn set_size(&mut self, size: u64) {
        self.desc.size = size;
    }

    /// Allocate the device object if not already present
    pub fn create(&mut self) -> Result<()> {
        if self.object.is_none() {
            self.object = Some(self.driver.create_object(&self.desc)?);
        }
        self.lost = false;
        Ok(())
    }

    /// Free the device object
    pub fn release(&mut self) {
        if let Some(object) = self.object.take() {
            self.driver.destroy_object(object);
        }
    }

    /// Drop the object if its pool does not survive device loss
    pub fn device_lost(&mut self) {
        if self.object.is_some() && !self.desc.pool.survives_device_loss() {
            self.release();
            self.lost = true;
        }
    }

    /// Rebuild an object dropped by `device_lost`
    pub fn device_restored(&mut self) -> Result<()> {
        if self.lost {
            self.create()?;
        }
        Ok(())
    }
}

impl Drop for DeviceBacking {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "device_backing_tests.rs"]
mod tests;
