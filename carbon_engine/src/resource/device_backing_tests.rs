/// Tests for DeviceBacking

use super::*;
use crate::render_driver::mock_render_driver::MockRenderDriver;
use crate::render_driver::{DeviceObjectKind, MemoryPool};

fn backing(driver: &Arc<MockRenderDriver>, pool: MemoryPool) -> DeviceBacking {
    DeviceBacking::new(
        driver.clone(),
        DeviceObjectDesc {
            kind: DeviceObjectKind::RenderTarget,
            label: "target".to_string(),
            size: 1024,
            pool,
        },
    )
}

#[test]
fn test_create_is_idempotent_and_drop_releases() {
    let driver = Arc::new(MockRenderDriver::new());
    {
        let mut b = backing(&driver, MemoryPool::Default);
        assert!(b.object().is_none());
        b.create().unwrap();
        b.create().unwrap();
        assert_eq!(driver.created_count(), 1);
    }
    assert_eq!(driver.live_count(), 0);
}

#[test]
fn test_default_pool_is_lost_and_restored() {
    let driver = Arc::new(MockRenderDriver::new());
    let mut b = backing(&driver, MemoryPool::Default);
    b.create().unwrap();

    b.device_lost();
    assert!(b.is_lost());
    assert_eq!(driver.live_count(), 0);

    b.device_restored().unwrap();
    assert!(!b.is_lost());
    assert_eq!(driver.live_count(), 1);
    assert_eq!(driver.created_count(), 2);
}

#[test]
fn test_managed_pool_survives_device_loss() {
    let driver = Arc::new(MockRenderDriver::new());
    let mut b = backing(&driver, MemoryPool::Managed);
    b.create().unwrap();

    b.device_lost();
    assert!(!b.is_lost());
    assert_eq!(driver.live_count(), 1);
}

#[test]
fn test_restore_failure_keeps_lost() {
    let driver = Arc::new(MockRenderDriver::new());
    let mut b = backing(&driver, MemoryPool::Default);
    b.create().unwrap();
    b.device_lost();

    driver.set_fail_create(true);
    assert!(b.device_restored().is_err());
    assert!(b.is_lost());
}
