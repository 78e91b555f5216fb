//! stint CLI library.
//!
//! Terminal presentation layer for the tracker: argument parsing,
//! configuration, line-command parsing, text rendering and the event loop.

mod cli;
pub mod commands;
mod config;
pub mod render;
pub mod repl;
pub mod ticker;
pub mod widget;

pub use cli::{Cli, Commands};
pub use config::Config;
