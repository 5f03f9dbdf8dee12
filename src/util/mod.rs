//! Utility functions shared by the ui and the binary.
//!
//! - **Text**: Unicode-aware width truncation and control-character stripping
//!   for backend-supplied text
//! - **Links**: resolving article links before handing them to the browser

mod links;
mod text;

pub use links::{resolve_link, LinkError};
pub use text::{strip_control_chars, truncate_to_width};

/// Maximum accepted search input length in the ui.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
