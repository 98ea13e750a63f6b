//! Terminal front end.
//!
//! Parses slash commands, renders transcript lines and the settings form,
//! and runs the interactive loop.

mod commands;
pub mod render;
mod repl;

pub use commands::{ReplCommand, HELP_TEXT};
pub use repl::Repl;
