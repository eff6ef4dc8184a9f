//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("submit failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("submit failed"));
}

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("anisotropy must be in 1..=16".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid configuration"));
    assert!(display.contains("anisotropy"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("renderable not found".to_string());
    assert_eq!(format!("{}", err), "Invalid resource: renderable not found");
}

#[test]
fn test_invalid_state_display() {
    let err = Error::InvalidState("no camera".to_string());
    assert_eq!(format!("{}", err), "Invalid state: no camera");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidState("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::BackendError("device lost".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::BackendError("other".to_string()));
}

#[test]
fn test_engine_err_macro_builds_invalid_state() {
    let err = crate::engine_err!("prism3d::Test", "value {} rejected", 42);
    assert_eq!(err, Error::InvalidState("value 42 rejected".to_string()));
}

// ============================================================================
// RESULT TYPE
// ============================================================================

fn fails() -> Result<u32> {
    Err(Error::InvalidConfig("bad".to_string()))
}

fn propagates() -> Result<u32> {
    let value = fails()?;
    Ok(value + 1)
}

#[test]
fn test_result_propagation() {
    assert_eq!(propagates(), Err(Error::InvalidConfig("bad".to_string())));
}
