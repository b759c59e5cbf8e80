//! CLI module for datagen
//!
//! Handles command-line argument parsing and the settings file.

pub mod args;
pub mod config;

pub use args::{parse_parameters, Args, Commands, Verbosity};
pub use config::Settings;
