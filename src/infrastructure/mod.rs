//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! - [`persistence`] - SQLite repository implementations and pool setup

pub mod persistence;
