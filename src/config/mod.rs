//! Configuration module for fintrack
//!
//! - Config path resolution
//! - Settings persistence (logging filter, display preferences, auditing)

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::Settings;
