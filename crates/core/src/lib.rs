//! Waypost core data models.
//!
//! This crate defines the content hierarchy (block → module → card → step)
//! shared by the progress tracker, the exporter and the command-line shell.

#![warn(missing_docs)]

// Core identities
mod id;

// Content
mod structure;
mod export;
pub mod catalog;

// Errors
mod error;

// Re-exports
pub use id::*;

pub use structure::{Block, Card, Module, Structure, StructureBuilder, StructureError};
pub use catalog::{ToolKind, UnknownTool};
pub use error::{ErrorKind, Result, TrackerError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
