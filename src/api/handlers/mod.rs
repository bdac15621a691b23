//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod index;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use fallback::{api_not_found_handler, link_not_found_handler};
pub use index::index_handler;
pub use links::get_link_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
