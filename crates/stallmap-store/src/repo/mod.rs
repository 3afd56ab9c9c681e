//! Repository layer persisting stalls and products to SQLite

pub mod hydration;
pub mod sqlite_repo;

pub use sqlite_repo::StallRepo;
