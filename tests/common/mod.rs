//! Common test utilities for group tree testing.
//!
//! This module provides assertion macros, builders, and fixture loading
//! shared by the integration tests.

pub mod builders;

/// Initialise logging once per test binary.
///
/// Set `RUST_LOG=debug` to see the tree's mutation log while a test runs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Custom assertion macro for a specific `GroupError` variant
#[macro_export]
macro_rules! assert_group_error {
    ($result:expr, $variant:pat) => {
        match $result {
            Err($variant) => {
                // Error variant matched
            }
            Ok(_) => panic!("Expected {}, but the operation succeeded", stringify!($variant)),
            Err(other) => panic!("Expected {}, got {:?}", stringify!($variant), other),
        }
    };
}

/// Custom assertion macro for a specific `SchemaViolation` variant
#[macro_export]
macro_rules! assert_schema_violation {
    ($result:expr, $variant:pat) => {
        match $result {
            Err(mcp_groups::GroupError::SchemaViolation($variant)) => {
                // Violation matched
            }
            Ok(_) => panic!("Expected schema violation, but the payload was accepted"),
            Err(other) => panic!("Expected schema violation, got {:?}", other),
        }
    };
}

/// Custom assertion macro for specific error messages
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err.to_string(),
                $substring
            ),
            Ok(_) => panic!(
                "Expected error containing '{}', but the operation succeeded",
                $substring
            ),
        }
    };
}
