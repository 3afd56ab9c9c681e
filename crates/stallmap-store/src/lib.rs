//! StallMap Store - SQLite persistence for stalls and products
//!
//! Provides:
//! - SQLite schema with a migrations framework
//! - `StallRepo`, the repository owning one connection
//! - Seed Format v0 parser and transactional importer

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::StallRepo;
