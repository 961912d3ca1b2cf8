//! Layered configuration for the scoring commands.
//!
//! Values are resolved with the precedence CLI flag > `--set` > config file > defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
