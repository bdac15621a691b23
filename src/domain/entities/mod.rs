//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping

pub mod link;

pub use link::Link;
