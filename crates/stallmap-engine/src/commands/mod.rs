//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for every operation:
//! - `log_op_start!` at entry, keeping the returned start instant
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Operations on a single stall pass `stall = id` so every event carries
//! `stall_id`.
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod engine_command;
pub mod publish;
pub mod seed;
pub mod stall;
