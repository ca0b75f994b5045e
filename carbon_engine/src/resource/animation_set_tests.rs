/// Tests for AnimationSet

use super::*;
use crate::resource::test_support::Fixture;
use crate::world::MemoryWorld;

fn walk_world() -> Arc<dyn World> {
    let world = MemoryWorld::new();
    let values: [f32; 2] = [30.0, 1.5];
    world
        .write_record(
            ANIMATION_SET_TABLE,
            ResourceId(3),
            WorldRecord { name: "Walk".to_string(), data: bytemuck::cast_slice(&values).to_vec(), references: Vec::new() },
        )
        .unwrap();
    Arc::new(world)
}

#[test]
fn test_frame_count() {
    let set = AnimationSet::new(ResourceId::next_internal(), None, "Run", 24.0, 2.0);
    assert_eq!(set.frame_count(), 48);
    assert_eq!(AnimationSet::new(ResourceId::next_internal(), None, "Idle", 0.0, 5.0).frame_count(), 0);
}

#[test]
fn test_load_animation_set_from_world() {
    let mut fx = Fixture::new("anim_load");
    let world = walk_world();

    let set = fx
        .manager
        .load_animation_set(Some(world.clone()), ResourceId(3), false, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let again = fx
        .manager
        .load_animation_set(Some(world), ResourceId(3), false, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    assert!(set.ptr_eq(&again));
    assert_eq!(set.name(), "DataSources::AnimationSet(0x3)");
    assert_eq!(set.read(|s| s.name().to_string()), Some("Walk".to_string()));
    assert_eq!(set.read(|s| s.frame_count()), Some(45));
    assert!(fx.manager.get_animation_set_by_id(ResourceId(3)).unwrap().ptr_eq(&set));
}

#[test]
fn test_internal_request_clones_animation_set() {
    let mut fx = Fixture::new("anim_clone");
    let world = walk_world();
    let persisted = fx
        .manager
        .load_animation_set(Some(world.clone()), ResourceId(3), false, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    let copy = fx
        .manager
        .load_animation_set(Some(world), ResourceId(3), true, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    assert!(!copy.ptr_eq(&persisted));
    assert!(copy.id().is_internal());
    assert_eq!(copy.read(|s| s.duration()), Some(1.5));
    assert_eq!(fx.manager.resource_count(ResourceKind::AnimationSet), 2);
}

#[test]
fn test_short_animation_record_fails() {
    let mut fx = Fixture::new("anim_short");
    let world = MemoryWorld::new();
    world
        .write_record(ANIMATION_SET_TABLE, ResourceId(4), WorldRecord { name: "Bad".to_string(), data: vec![0; 4], references: Vec::new() })
        .unwrap();
    let world: Arc<dyn World> = Arc::new(world);

    let result = fx
        .manager
        .load_animation_set(Some(world), ResourceId(4), false, ResourceFlags::empty(), crate::debug_source!());

    assert!(matches!(result, Err(Error::LoadFailed { .. })));
    assert!(fx.manager.get_animation_set_by_id(ResourceId(4)).is_none());
}

#[test]
fn test_add_animation_set_by_name() {
    let mut fx = Fixture::new("anim_add");
    let set = AnimationSet::new(ResourceId::next_internal(), None, "Jump", 60.0, 0.5);

    let handle = fx
        .manager
        .add_animation_set(set, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    assert!(fx.manager.get_animation_set("Jump").unwrap().ptr_eq(&handle));
    assert!(fx.manager.get_animation_set("Fall").is_none());
}
