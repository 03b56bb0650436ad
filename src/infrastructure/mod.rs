//! Infrastructure layer: database, cache, and external integrations.

pub mod advisory;
pub mod cache;
pub mod persistence;
