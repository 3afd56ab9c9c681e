//! StallMap Engine - Orchestration layer
//!
//! Provides high-level command orchestration that coordinates between
//! core domain logic and the persistence layer, and owns lifecycle logging.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
