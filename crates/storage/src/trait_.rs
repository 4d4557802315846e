//! Exporter trait abstraction.

use async_trait::async_trait;
use std::path::PathBuf;
use waypost_core::{Structure, ToolKind};
use waypost_progress::SessionExport;

/// Error type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for structure and session snapshots.
///
/// This trait allows different export targets to be plugged in.
#[async_trait]
pub trait Exporter: Send + Sync {
    /// Write the structure of a tool. Returns where it was written.
    async fn export_structure(&mut self, tool: ToolKind, structure: &Structure) -> Result<PathBuf>;

    /// Write a full session snapshot. Returns where it was written.
    async fn export_session(&mut self, tool: ToolKind, session: &SessionExport) -> Result<PathBuf>;
}
