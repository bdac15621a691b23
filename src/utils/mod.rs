//! Helpers shared across layers.
//!
//! - [`codec`] - Short code encoding and decoding
//! - [`db_error`] - Database error classification
//! - [`short_url`] - Public short URL construction

pub mod codec;
pub mod db_error;
pub mod short_url;
