//! newsdesk: a terminal news browser.
//!
//! Articles come from a news backend (`/articles`, `/categories`) or a JSON
//! snapshot. The browser narrows them by category and title search and pages
//! through the result.

pub mod app;
pub mod config;
pub mod news;
pub mod source;
pub mod ui;
pub mod util;
