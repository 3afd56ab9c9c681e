//! Core types shared across StallMap facilities
//!
//! This crate holds the canonical field keys and event names used by the
//! logging facility and by structured error reporting.

pub mod schema;
