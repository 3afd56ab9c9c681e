//! Structured logging facility for StallMap
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use stallmap_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Output always goes to stderr so command output on stdout stays parseable.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, init_with_filter, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

/// Milliseconds since `started`, as recorded in `duration_ms`
pub fn elapsed_ms(started: std::time::Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
