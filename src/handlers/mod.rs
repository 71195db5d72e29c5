//! Page handlers module
//!
//! This module contains the handlers for every page of the portal:
//! - Command definitions parsed from the command line
//! - Pure `render_*` functions producing the page text
//! - `handle_*` functions fetching data and printing the page

pub mod commands;

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
