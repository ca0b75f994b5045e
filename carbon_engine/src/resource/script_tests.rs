/// Tests for scripts and script reloading

use super::*;
use crate::resource::test_support::Fixture;
use crate::system::StreamType;

#[test]
fn test_script_uid() {
    assert_eq!(script_uid("Scripts/door.cs", "Door01"), "Scripts/door.cs::Door01");
    assert_eq!(script_uid("Scripts/door.cs", ""), "Scripts/door.cs::.default");
}

// ============================================================================
// Tests: Loading
// ============================================================================

#[test]
fn test_scripts_deduplicated_per_instance() {
    let mut fx = Fixture::new("script_dedup");
    fx.write_file("Scripts/door.cs", b"open();");
    let stream = fx.manager.file_system().open("Scripts/door.cs");

    let a = fx
        .manager
        .load_script(&stream, "Door", "Door01", ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let b = fx
        .manager
        .load_script(&stream, "Door", "Door01", ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let c = fx
        .manager
        .load_script(&stream, "Door", "Door02", ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&c));
    assert_eq!(a.name(), "Scripts/door.cs::Door01");
    assert_eq!(a.read(|s| s.source().to_string()), Some("open();".to_string()));
    assert_eq!(a.read(|s| s.this_type().to_string()), Some("Door".to_string()));
}

#[test]
fn test_surface_and_plain_scripts_never_match() {
    let mut fx = Fixture::new("script_surface");
    fx.write_file("Shaders/lit.sh", b"surface();");
    let stream = fx.manager.file_system().open("Shaders/lit.sh");

    let plain = fx
        .manager
        .load_script(&stream, "", "", ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let surface = fx
        .manager
        .load_surface_shader_script(&stream, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    assert!(!plain.ptr_eq(&surface));
    assert_eq!(plain.name(), surface.name());
    assert_eq!(plain.read(|s| s.is_surface_shader()), Some(false));
    assert_eq!(surface.read(|s| s.is_surface_shader()), Some(true));
    assert_eq!(fx.manager.resource_count(ResourceKind::Script), 2);
}

#[test]
fn test_surface_script_gets_api_define() {
    let mut fx = Fixture::new("script_define");
    fx.write_file("Shaders/water.sh", b"body");
    let stream = fx.manager.file_system().open("Shaders/water.sh");

    let script = fx
        .manager
        .load_surface_shader_script(&stream, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    assert_eq!(script.read(|s| s.source().to_string()), Some("#define DX11\nbody".to_string()));
}

#[test]
fn test_missing_script_fails() {
    let mut fx = Fixture::new("script_missing");
    let stream = fx.manager.file_system().open("Scripts/none.cs");
    assert_eq!(stream.stream_type(), StreamType::None);

    let result = fx
        .manager
        .load_script(&stream, "", "", ResourceFlags::empty(), crate::debug_source!());

    assert!(result.is_err());
    assert_eq!(fx.manager.resource_count(ResourceKind::Script), 0);
}

// ============================================================================
// Tests: Reloading
// ============================================================================

#[test]
fn test_reload_scripts_reloads_plain_scripts_only() {
    let mut fx = Fixture::new("script_reload");
    fx.write_file("Scripts/ai.cs", b"v1");
    fx.write_file("Shaders/sky.sh", b"sky");
    let plain_stream = fx.manager.file_system().open("Scripts/ai.cs");
    let surface_stream = fx.manager.file_system().open("Shaders/sky.sh");
    let plain = fx
        .manager
        .load_script(&plain_stream, "", "", ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let surface = fx
        .manager
        .load_surface_shader_script(&surface_stream, ResourceFlags::empty(), crate::debug_source!())
        .unwrap();
    let observer = fx.manager.message_bus().subscribe();

    fx.write_file("Scripts/ai.cs", b"v2");
    fx.manager.reload_scripts(0.0).unwrap();

    assert_eq!(plain.read(|s| s.load_count()), Some(2));
    assert_eq!(plain.read(|s| s.source().to_string()), Some("v2".to_string()));
    assert_eq!(surface.read(|s| s.load_count()), Some(1));

    let received = fx.manager.message_bus().collect(observer);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].message, Message::ScriptsReloaded);
    assert_eq!(received[0].sender, fx.manager.listener());
}

#[test]
fn test_delayed_reload_goes_through_the_bus() {
    let mut fx = Fixture::new("script_delay");
    fx.write_file("Scripts/ui.cs", b"ui");
    let stream = fx.manager.file_system().open("Scripts/ui.cs");
    let script = fx
        .manager
        .load_script(&stream, "", "", ResourceFlags::empty(), crate::debug_source!())
        .unwrap();

    fx.manager.reload_scripts(0.5).unwrap();
    assert_eq!(script.read(|s| s.load_count()), Some(1));

    // Not yet due
    assert_eq!(fx.manager.process_messages(), 0);

    fx.clock.advance(0.5);
    assert_eq!(fx.manager.process_messages(), 1);
    assert_eq!(script.read(|s| s.load_count()), Some(2));
}
