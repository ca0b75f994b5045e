//! Integration tests for Engine logging
//!
//! These tests install a capturing logger and check both the raw logging
//! API and the messages the resource manager reports.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use carbon_engine::carbon::Engine;
use carbon_engine::carbon::log::{Logger, LogEntry, LogSeverity};
use carbon_engine::carbon::render_driver::NullRenderDriver;
use carbon_engine::carbon::resource::{
    MaterialType, ResourceFlags, ResourceId, ResourceManager, ResourceManagerDesc,
};
use carbon_engine::carbon::system::{Clock, FileSystem, ManualClock, MessageBus};
use carbon_engine::debug_source;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn manager(tag: &str, clock: Arc<ManualClock>) -> (ResourceManager, std::path::PathBuf) {
    let dir = std::env::temp_dir().join(format!("carbon_log_{}_{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let bus_clock: Arc<dyn Clock> = clock;
    let mut desc = ResourceManagerDesc::new(Arc::new(NullRenderDriver::new()), MessageBus::new(bus_clock));
    desc.file_system = FileSystem::new(&dir);
    let mut manager = ResourceManager::new(desc);
    manager.initialize().unwrap();
    (manager, dir)
}

fn messages(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity)
        .map(|e| e.message.clone())
        .collect()
}

// ============================================================================
// LOGGING API TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[1].message, "Test warning message");
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());

    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
}

// ============================================================================
// RESOURCE MANAGER DIAGNOSTICS
// ============================================================================

#[test]
#[serial]
fn test_integration_missing_surface_shader_warns() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    let (mut manager, dir) = manager("missing_surface", Arc::new(ManualClock::new(0.0)));

    let stream = manager.file_system().open("Shaders/gone.sh");
    assert!(manager.create_surface_shader(&stream, ResourceFlags::empty(), debug_source!()).is_err());

    let warnings = messages(&entries, LogSeverity::Warn);
    assert!(warnings.contains(
        &"Unable to create surface shader from stream 'Shaders/gone.sh' because the file or resource was not found."
            .to_string()
    ));

    manager.dispose();
    Engine::reset_logger();
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_integration_database_errors_carry_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    let (mut manager, dir) = manager("database_error", Arc::new(ManualClock::new(0.0)));

    let result = manager.load_material(
        None,
        MaterialType::Standard,
        ResourceId(9),
        false,
        ResourceFlags::empty(),
        debug_source!(),
    );
    assert!(result.is_err());

    {
        let captured = entries.lock().unwrap();
        let error = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Error)
            .expect("an error entry");
        assert_eq!(
            error.message,
            "Unable to load material resource '0x9' because no valid world database was supplied."
        );
        assert_eq!(error.source, "carbon::ResourceManager");
        assert!(error.file.is_some());
        assert!(error.line.is_some());
    }

    manager.dispose();
    Engine::reset_logger();
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_integration_expired_delay_is_reported() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    let clock = Arc::new(ManualClock::new(0.0));
    let (mut manager, dir) = manager("expired_delay", clock.clone());
    manager.set_default_destroy_delay(1.5);

    let texture = manager
        .create_texture(
            "Pebble",
            carbon_engine::carbon::resource::ImageInfo::new(2, 2),
            ResourceFlags::empty(),
            debug_source!(),
        )
        .unwrap();
    drop(texture);
    clock.set(2.0);
    manager.collect_garbage();

    let debug = messages(&entries, LogSeverity::Debug);
    assert!(debug.contains(
        &"Unloading trashed resource 'Pebble' because its destruction delay of 1.5 second(s) expired.".to_string()
    ));

    manager.dispose();
    Engine::reset_logger();
    let _ = std::fs::remove_dir_all(&dir);
}
