//! Point-in-time views of a session.

use crate::completion::BlockProgress;
use serde::Serialize;
use waypost_core::{SessionId, Structure, Time};

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    /// Session the snapshot was taken from
    pub session: SessionId,

    /// When snapshot was taken
    pub timestamp: Time,

    /// Overall percentage complete
    pub overall: f32,

    /// Progress by block name, in structure order
    pub blocks: Vec<(String, BlockProgress)>,
}

impl ProgressSnapshot {
    /// Progress of one block by name.
    pub fn block(&self, name: &str) -> Option<&BlockProgress> {
        self.blocks
            .iter()
            .find(|(block, _)| block == name)
            .map(|(_, progress)| progress)
    }
}

/// State of a single card inside a session export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    /// Block name
    pub block: String,
    /// Module name
    pub module: String,
    /// Card index within the module
    pub card: usize,
    /// Card title
    pub title: String,
    /// Completion flag
    pub done: bool,
    /// Current step index
    pub step: usize,
    /// Answers by step index
    pub answers: Vec<Option<String>>,
}

/// Everything a session holds, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport {
    /// Progress at export time
    pub progress: ProgressSnapshot,

    /// Content the session was built from
    pub structure: Structure,

    /// Per-card state, in structure order
    pub cards: Vec<CardRecord>,
}
