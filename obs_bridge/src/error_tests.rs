//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_reference_display() {
    let err = Error::InvalidReference(42);
    let display = format!("{}", err);
    assert!(display.contains("Invalid reference"));
    assert!(display.contains("42"));
}

#[test]
fn test_index_exhausted_display() {
    let err = Error::IndexExhausted;
    assert_eq!(format!("{}", err), "Index space exhausted");
}

#[test]
fn test_lock_poisoned_display() {
    let err = Error::LockPoisoned("ObjectManager".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Lock poisoned"));
    assert!(display.contains("ObjectManager"));
}

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("first_index 10 > last_index 5".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid configuration"));
    assert!(display.contains("first_index 10"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::IndexExhausted;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    assert!(format!("{:?}", Error::InvalidReference(7)).contains("InvalidReference"));
    assert!(format!("{:?}", Error::IndexExhausted).contains("IndexExhausted"));
    assert!(format!("{:?}", Error::LockPoisoned("x".to_string())).contains("LockPoisoned"));
    assert!(format!("{:?}", Error::InvalidConfig("x".to_string())).contains("InvalidConfig"));
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::InvalidReference(3);
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::InvalidReference(4));
    assert_ne!(Error::IndexExhausted, Error::InvalidConfig(String::new()));
}

// ============================================================================
// RESULT TYPE / MACRO TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<u32> {
        Err(Error::IndexExhausted)
    }

    fn outer() -> Result<u32> {
        let handle = inner()?;
        Ok(handle + 1)
    }

    assert_eq!(outer(), Err(Error::IndexExhausted));
}

#[test]
fn test_bridge_bail_returns_error() {
    fn lookup(handle: u32) -> Result<u32> {
        if handle > 10 {
            crate::bridge_bail!("test::error", Error::InvalidReference(handle));
        }
        Ok(handle)
    }

    assert_eq!(lookup(3), Ok(3));
    assert_eq!(lookup(11), Err(Error::InvalidReference(11)));
}

#[test]
fn test_bridge_err_evaluates_to_error() {
    let err = crate::bridge_err!("test::error", Error::LockPoisoned("state".to_string()));
    assert_eq!(err, Error::LockPoisoned("state".to_string()));
}
