//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_service;

pub use auth_service::{AuthError, AuthService, SignedRequest};
pub use link_service::LinkService;
