//! # Link Shortener
//!
//! A small URL shortening service built with Axum and SQLite. Short codes
//! are the link id written in a bijective numeral system, and the write API
//! is protected by HMAC request signatures.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The link entity and repository trait
//! - **Application Layer** ([`application`]) - Link and authentication services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export SHORTENER_SECRET="change-me"
//! cargo run
//!
//! # Sign and send a request
//! cargo run --bin admin -- sign --method POST --path /api/shorten \
//!     --body '{"url":"https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService};
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::SqliteLinkRepository;
    pub use crate::state::AppState;
    pub use crate::utils::codec::{decode, encode};
}
