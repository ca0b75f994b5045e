/// Tests for Buffer and the buffer factories

use super::*;
use crate::resource::test_support::Fixture;

// ============================================================================
// Tests: Vertex / index buffers
// ============================================================================

#[test]
fn test_vertex_buffer_name_encodes_description() {
    let mut fx = Fixture::new("buf_name");
    let vb = fx
        .manager
        .create_vertex_buffer(96, BufferUsage::WRITE_ONLY | BufferUsage::DYNAMIC, MemoryPool::Default, crate::debug_source!())
        .unwrap();

    assert_eq!(vb.name(), "VertexBuffer(L:96|U:3|P:0)");
    assert_eq!(vb.kind(), ResourceKind::VertexBuffer);
    assert_eq!(vb.flags(), ResourceFlags::empty());
    assert_eq!(vb.read(|b| b.contents().len()), Some(96));
}

#[test]
fn test_vertex_buffers_are_never_shared() {
    let mut fx = Fixture::new("buf_unique");
    let a = fx
        .manager
        .create_vertex_buffer(32, BufferUsage::empty(), MemoryPool::Managed, crate::debug_source!())
        .unwrap();
    let b = fx
        .manager
        .create_vertex_buffer(32, BufferUsage::empty(), MemoryPool::Managed, crate::debug_source!())
        .unwrap();

    assert!(!a.ptr_eq(&b));
    assert_eq!(a.name(), b.name());
    assert_eq!(fx.manager.resource_count(ResourceKind::VertexBuffer), 2);
}

#[test]
fn test_index_buffer_format() {
    let mut fx = Fixture::new("buf_index");
    let ib = fx
        .manager
        .create_index_buffer(12, BufferUsage::WRITE_ONLY, BufferFormat::R16_UINT, MemoryPool::Managed, crate::debug_source!())
        .unwrap();

    assert_eq!(ib.name(), "IndexBuffer(L:12|U:1|P:1)");
    assert_eq!(ib.read(|b| b.format()), Some(Some(BufferFormat::R16_UINT)));
}

#[test]
fn test_unsupported_index_format_fails() {
    let mut fx = Fixture::new("buf_format");
    fx.driver.set_format_unsupported(BufferFormat::R32_UINT);

    let result = fx.manager.create_index_buffer(
        16,
        BufferUsage::empty(),
        BufferFormat::R32_UINT,
        MemoryPool::Managed,
        crate::debug_source!(),
    );

    assert!(matches!(result, Err(Error::LoadFailed { .. })));
    assert_eq!(fx.manager.resource_count(ResourceKind::IndexBuffer), 0);
    assert_eq!(fx.driver.live_count(), 0);
}

#[test]
fn test_zero_length_buffer_fails() {
    let mut fx = Fixture::new("buf_zero");
    let result = fx
        .manager
        .create_vertex_buffer(0, BufferUsage::empty(), MemoryPool::Managed, crate::debug_source!());

    assert!(result.is_err());
    assert_eq!(fx.manager.resource_count(ResourceKind::VertexBuffer), 0);
}

// ============================================================================
// Tests: Constant buffers and updates
// ============================================================================

#[test]
fn test_constant_buffer_named_by_desc() {
    let mut fx = Fixture::new("buf_const");
    let desc = ConstantBufferDesc { name: "_cbCamera".to_string(), length: 64, pool: MemoryPool::Managed };

    let cb = fx
        .manager
        .create_constant_buffer(&desc, ResourceFlags::ALWAYS_RESIDENT, crate::debug_source!())
        .unwrap();

    assert_eq!(cb.name(), "_cbCamera");
    assert_eq!(cb.kind(), ResourceKind::ConstantBuffer);
    assert_eq!(cb.flags(), ResourceFlags::ALWAYS_RESIDENT);
    assert_eq!(cb.read(|b| b.usage()), Some(BufferUsage::DYNAMIC));
}

#[test]
fn test_update_writes_and_bounds_checks() {
    let mut fx = Fixture::new("buf_update");
    let vb = fx
        .manager
        .create_vertex_buffer(8, BufferUsage::DYNAMIC, MemoryPool::Managed, crate::debug_source!())
        .unwrap();

    vb.write(|b| b.update(2, &[9, 9, 9])).unwrap().unwrap();
    assert_eq!(vb.read(|b| b.contents().to_vec()).unwrap(), vec![0, 0, 9, 9, 9, 0, 0, 0]);

    let overflow = vb.write(|b| b.update(6, &[1, 2, 3])).unwrap();
    assert!(matches!(overflow, Err(Error::BackendError(_))));
}

#[test]
fn test_destroyed_buffer_releases_device_object() {
    let mut fx = Fixture::new("buf_destroy");
    let vb = fx
        .manager
        .create_vertex_buffer(8, BufferUsage::empty(), MemoryPool::Managed, crate::debug_source!())
        .unwrap();
    assert_eq!(fx.driver.live_count(), 1);

    drop(vb);
    fx.manager.collect_garbage();

    assert_eq!(fx.manager.resource_count(ResourceKind::VertexBuffer), 0);
    assert_eq!(fx.driver.live_count(), 0);
}
