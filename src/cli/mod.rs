//! CLI command handlers for fintrack
//!
//! The library keeps nothing between runs, so the binary offers a scripted
//! demonstration plus stand-alone credential checks.

pub mod check;
pub mod demo;

pub use check::{handle_check_command, CheckCommand};
pub use demo::run_demo;
