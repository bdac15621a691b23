//! Data Transfer Objects for API requests and responses.

pub mod index;
pub mod link;
pub mod shorten;
