/// Tests for Texture and the texture factories

use super::*;
use crate::render_driver::MemoryPool;
use crate::render_driver::mock_render_driver::MockRenderDriver;
use crate::resource::test_support::Fixture;

// ============================================================================
// Tests: Mip levels
// ============================================================================

#[test]
fn test_full_chain_levels() {
    assert_eq!(ImageInfo::new(256, 128).full_chain_levels(), 9);
    assert_eq!(ImageInfo::new(1, 1).full_chain_levels(), 1);
    assert_eq!(ImageInfo::new(0, 0).full_chain_levels(), 1);
    assert_eq!(ImageInfo::new(300, 20).full_chain_levels(), 9);
}

#[test]
fn test_resolve_mip_levels() {
    let info = ImageInfo { width: 64, height: 64, mip_levels: 3, pool: MemoryPool::Managed };
    assert_eq!(resolve_mip_levels(0, &info), 7);
    assert_eq!(resolve_mip_levels(-1, &info), 3);
    assert_eq!(resolve_mip_levels(2, &info), 2);
    assert_eq!(resolve_mip_levels(20, &info), 7);
}

#[test]
fn test_config_mip_levels_applied_on_load() {
    let mut fx = Fixture::with("tex_mips", MockRenderDriver::new(), |desc| {
        desc.config.texture_mip_levels = 4;
        desc.config.compress_textures = false;
    });
    let handle = fx
        .manager
        .create_texture("Noise", ImageInfo::new(128, 128), ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    assert_eq!(handle.read(|t| t.mip_levels()), Some(4));
    assert_eq!(handle.read(|t| t.is_compressed()), Some(false));
    assert_eq!(handle.read(|t| t.data_size()), Some(128 * 128 * 4));
}

// ============================================================================
// Tests: Loading from streams
// ============================================================================

#[test]
fn test_load_texture_deduplicates_by_name() {
    let mut fx = Fixture::new("tex_dedup");
    fx.write_file("Textures/sky.dds", &[7; 64]);
    let stream = fx.manager.file_system().open("Textures/sky.dds");

    let a = fx.manager.load_texture(&stream, ResourceFlags::empty(), crate::debug_source!()).unwrap();
    let b = fx.manager.load_texture(&stream, ResourceFlags::empty(), crate::debug_source!()).unwrap();

    assert!(a.ptr_eq(&b));
    assert_eq!(a.reference_count(), 2);
    assert_eq!(fx.manager.resource_count(ResourceKind::Texture), 1);
    assert_eq!(a.read(|t| t.data_size()), Some(64));
    assert_eq!(a.name(), "Textures/sky.dds");
}

#[test]
fn test_force_new_bypasses_dedup() {
    let mut fx = Fixture::new("tex_force");
    fx.write_file("a.dds", &[1; 4]);
    let stream = fx.manager.file_system().open("a.dds");

    let a = fx.manager.load_texture(&stream, ResourceFlags::empty(), crate::debug_source!()).unwrap();
    let b = fx.manager.load_texture(&stream, ResourceFlags::FORCE_NEW, crate::debug_source!()).unwrap();

    assert!(!a.ptr_eq(&b));
    assert_ne!(a.id(), b.id());
    assert_eq!(fx.manager.resource_count(ResourceKind::Texture), 2);
}

#[test]
fn test_missing_texture_fails_outside_sandbox() {
    let mut fx = Fixture::new("tex_missing");
    let stream = fx.manager.file_system().open("nope.dds");

    let result = fx.manager.load_texture(&stream, ResourceFlags::empty(), crate::debug_source!());

    assert!(matches!(result, Err(Error::NotFound(_))));
    assert_eq!(fx.manager.resource_count(ResourceKind::Texture), 0);
}

#[test]
fn test_missing_texture_placeholder_in_sandbox() {
    let mut fx = Fixture::with("tex_placeholder", MockRenderDriver::new(), |desc| {
        desc.sandbox_mode = SandboxMode::Preview;
    });
    let stream = fx.manager.file_system().open("authored/missing.dds");

    let handle = fx.manager.load_texture(&stream, ResourceFlags::empty(), crate::debug_source!()).unwrap();

    assert_eq!(handle.read(|t| t.is_placeholder()), Some(true));
    assert!(handle.is_loaded());
    assert_eq!(fx.driver.live_count(), 0);
    assert_eq!(fx.manager.resource_count(ResourceKind::Texture), 1);
}

#[test]
fn test_deferred_load_waits_for_ensure_loaded() {
    let mut fx = Fixture::new("tex_deferred");
    fx.write_file("late.dds", &[3; 16]);
    let stream = fx.manager.file_system().open("late.dds");

    let handle = fx
        .manager
        .load_texture(&stream, ResourceFlags::DEFERRED_LOAD, crate::debug_source!())
        .unwrap();
    assert!(!handle.is_loaded());
    assert_eq!(handle.read(|t| t.data_size()), Some(0));

    fx.manager.ensure_loaded(&handle).unwrap();
    assert!(handle.is_loaded());
    assert_eq!(handle.read(|t| t.data_size()), Some(16));
}

#[test]
fn test_existing_deferred_texture_loads_on_plain_request() {
    let mut fx = Fixture::new("tex_adopt");
    fx.write_file("adopt.dds", &[3; 8]);
    let stream = fx.manager.file_system().open("adopt.dds");

    let deferred = fx
        .manager
        .load_texture(&stream, ResourceFlags::DEFERRED_LOAD, crate::debug_source!())
        .unwrap();
    let loaded = fx.manager.load_texture(&stream, ResourceFlags::empty(), crate::debug_source!()).unwrap();

    assert!(deferred.ptr_eq(&loaded));
    assert!(deferred.is_loaded());
    // Adoption never rewrites the original flags
    assert_eq!(loaded.flags(), ResourceFlags::DEFERRED_LOAD);
}

// ============================================================================
// Tests: Creation and lookup
// ============================================================================

#[test]
fn test_create_failure_leaves_no_trace() {
    let mut fx = Fixture::new("tex_fail");
    fx.driver.set_fail_create(true);

    let result = fx.manager.create_texture(
        "Broken",
        ImageInfo::new(4, 4),
        ResourceFlags::empty(),
        crate::debug_source!(),
    );

    assert!(matches!(result, Err(Error::LoadFailed { .. })));
    assert_eq!(fx.manager.resource_count(ResourceKind::Texture), 0);
    assert!(fx.manager.get_texture("Broken").is_none());
}

#[test]
fn test_add_and_get_texture() {
    let mut fx = Fixture::new("tex_add");
    let texture = Texture::from_image(
        fx.manager.render_driver().clone(),
        "Procedural",
        ImageInfo::new(8, 8),
        fx.manager.init_config(),
    );

    let added = fx
        .manager
        .add_texture(texture, "Procedural", ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let found = fx.manager.get_texture("Procedural").unwrap();

    assert!(added.ptr_eq(&found));
    assert!(fx.manager.get_texture("Other").is_none());
}

#[test]
fn test_default_pool_texture_is_lost_with_device() {
    let mut fx = Fixture::new("tex_lost");
    let info = ImageInfo { pool: MemoryPool::Default, ..ImageInfo::new(16, 16) };
    let target = fx
        .manager
        .create_texture("Dynamic", info, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let managed = fx
        .manager
        .create_texture("Static", ImageInfo::new(16, 16), ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    fx.manager.notify_device_lost();
    assert!(target.is_lost());
    assert!(!managed.is_lost());

    fx.manager.notify_device_restored();
    assert!(!target.is_lost());
    assert!(target.read(|t| t.device_object().is_some()).unwrap());
}
