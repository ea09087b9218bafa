//! Export module for fintrack
//!
//! Writes a JSON snapshot of everything held in memory. There is no import:
//! the library keeps nothing between runs.

pub mod json;

pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
