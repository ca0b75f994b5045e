//! Unit tests for error.rs
//!
//! Tests all Error variants, their trait implementations and the
//! engine_bail!/engine_err! macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("device creation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("device creation failed"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of device memory");
}

#[test]
fn test_load_failed_display() {
    let err = Error::LoadFailed {
        name: "sky.dds".to_string(),
        reason: "stream not found".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "Failed to load resource 'sky.dds': stream not found"
    );
}

#[test]
fn test_remaining_variants_display() {
    assert!(format!("{}", Error::InvalidResource("x".into())).starts_with("Invalid resource"));
    assert!(format!("{}", Error::InitializationFailed("x".into())).starts_with("Initialization failed"));
    assert!(format!("{}", Error::NotFound("x".into())).starts_with("Not found"));
    assert!(format!("{}", Error::InvalidState("x".into())).starts_with("Invalid state"));
    assert!(format!("{}", Error::Io("x".into())).starts_with("I/O error"));
    assert!(format!("{}", Error::Config("x".into())).starts_with("Configuration error"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::NotFound("mesh".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::NotFound("material".to_string()));
}

#[test]
fn test_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ini");
    let err: Error = io.into();
    match err {
        Error::Io(msg) => assert!(msg.contains("missing.ini")),
        other => panic!("unexpected error {:?}", other),
    }
}

// ============================================================================
// MACRO TESTS
// ============================================================================

fn bail_when(fail: bool) -> Result<u32> {
    if fail {
        crate::engine_bail!("carbon::ErrorTests", "bailed with {}", 42);
    }
    Ok(7)
}

#[test]
fn test_engine_bail_returns_backend_error() {
    assert_eq!(bail_when(false), Ok(7));
    assert_eq!(
        bail_when(true),
        Err(Error::BackendError("bailed with 42".to_string()))
    );
}

#[test]
fn test_engine_err_evaluates_to_error() {
    let result: Result<()> = None::<()>.ok_or_else(|| crate::engine_err!("carbon::ErrorTests", "no {}", "world"));
    assert_eq!(result, Err(Error::BackendError("no world".to_string())));
}
