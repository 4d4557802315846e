//! JSON file exporter.
//!
//! Writes structure and session snapshots as JSON files into one directory.
//! Files are overwritten on re-export; there is no versioning.

use super::{Exporter, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use waypost_core::{Structure, ToolKind};
use waypost_progress::SessionExport;

/// Exporter configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory receiving export files
    pub dir: PathBuf,

    /// Pretty-print JSON
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".waypost"),
            pretty: true,
        }
    }
}

/// File-based JSON exporter.
pub struct JsonFileExporter {
    config: ExportConfig,
    written: usize,
}

impl JsonFileExporter {
    /// Create the exporter, making sure the target directory exists.
    pub async fn new(config: ExportConfig) -> Result<Self> {
        fs::create_dir_all(&config.dir).await?;
        Ok(Self { config, written: 0 })
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    fn structure_path(&self, tool: ToolKind) -> PathBuf {
        self.config.dir.join(format!("{}-structure.json", tool))
    }

    fn session_path(&self, tool: ToolKind, session: &SessionExport) -> PathBuf {
        self.config
            .dir
            .join(format!("{}-session-{}.json", tool, session.progress.session))
    }

    async fn write_json<T: Serialize + ?Sized>(&mut self, path: &Path, value: &T) -> Result<()> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        fs::write(path, json.as_bytes()).await?;
        self.written += 1;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Exporter for JsonFileExporter {
    async fn export_structure(&mut self, tool: ToolKind, structure: &Structure) -> Result<PathBuf> {
        let path = self.structure_path(tool);
        self.write_json(&path, structure).await?;
        info!("Exported {} structure to {}", tool, path.display());
        Ok(path)
    }

    async fn export_session(&mut self, tool: ToolKind, session: &SessionExport) -> Result<PathBuf> {
        let path = self.session_path(tool, session);
        self.write_json(&path, session).await?;
        info!(
            "Exported {} session {} ({:.0}% done) to {}",
            tool,
            session.progress.session,
            session.progress.overall,
            path.display()
        );
        Ok(path)
    }
}
