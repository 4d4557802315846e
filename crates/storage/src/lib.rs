//! Export boundary for Waypost.
//!
//! This crate provides a trait-based export interface with a JSON file
//! reference implementation. Nothing is ever read back.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{Exporter, ExportError, Result};
pub use json_storage::{ExportConfig, JsonFileExporter};
