//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - View rendering dispatch
//! - `helpers` - Background load spawning and panic capture
//! - `menu` - Category menu widget
//! - `articles` - Article list widget with page footer
//! - `reader` - Article reader widget
//! - `status` - Status bar widget
//! - `help` - Key reference overlay

mod articles;
mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod menu;
mod reader;
mod render;
mod status;

pub use helpers::spawn_load;
pub use loop_runner::{run, Action};
