/// Shared fixture for resource manager unit tests

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use crate::render_driver::mock_render_driver::MockRenderDriver;
use crate::resource::{ResourceManager, ResourceManagerDesc};
use crate::system::{Clock, FileSystem, ManualClock, MessageBus};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Fresh scratch directory under the system temp dir
pub(crate) fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "carbon_rm_{}_{}_{}",
        tag,
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Initialized manager over a mock driver, a manual clock and a scratch
/// file system (`sys://` maps to the same directory)
pub(crate) struct Fixture {
    pub driver: Arc<MockRenderDriver>,
    pub clock: Arc<ManualClock>,
    pub dir: PathBuf,
    pub manager: ResourceManager,
}

impl Fixture {
    pub fn new(tag: &str) -> Self {
        Self::with(tag, MockRenderDriver::new(), |_| {})
    }

    pub fn with(
        tag: &str,
        driver: MockRenderDriver,
        configure: impl FnOnce(&mut ResourceManagerDesc),
    ) -> Self {
        let driver = Arc::new(driver);
        let clock = Arc::new(ManualClock::new(0.0));
        let dir = scratch_dir(tag);
        let clock_dyn: Arc<dyn Clock> = clock.clone();
        let mut desc = ResourceManagerDesc::new(driver.clone(), MessageBus::new(clock_dyn));
        desc.file_system = FileSystem::new(&dir).with_protocol("sys", &dir);
        configure(&mut desc);
        let mut manager = ResourceManager::new(desc);
        manager.initialize().unwrap();
        Self { driver, clock, dir, manager }
    }

    /// Write a file under the scratch root
    pub fn write_file(&self, logical: &str, data: &[u8]) {
        self.manager.file_system().write(logical, data).unwrap();
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.manager.dispose();
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
