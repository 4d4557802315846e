//! Progress Tracking
//!
//! Navigation cursor, per-card step cursors, completion flags and
//! progress aggregation for one guided session.

#![warn(missing_docs)]

pub mod tracker;
pub mod completion;
pub mod snapshot;

pub use tracker::{ProgressTracker, Cursor};
pub use completion::{CompletionState, BlockProgress, percentage};
pub use snapshot::{ProgressSnapshot, SessionExport, CardRecord};
