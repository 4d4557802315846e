//! Tracker error types.

/// Result alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Broad classification of tracker failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced block or module does not exist
    NotFound,
    /// The operation needs a selection that has not been made
    InvalidState,
    /// A card or step index is outside its bounds
    OutOfRange,
}

/// Errors raised by navigation, mutation and query operations.
///
/// Every error is detected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Unknown block
    #[error("block not found: {0}")]
    BlockNotFound(String),

    /// Unknown module within a block
    #[error("module '{module}' not found in block '{block}'")]
    ModuleNotFound {
        /// Block that was searched
        block: String,
        /// Requested module
        module: String,
    },

    /// A block must be selected first
    #[error("no block selected")]
    NoBlockSelected,

    /// A module must be selected first
    #[error("no module selected")]
    NoModuleSelected,

    /// Card index outside the module's cards
    #[error("card index {index} out of range (module has {len} cards)")]
    CardOutOfRange {
        /// Requested index
        index: usize,
        /// Number of cards
        len: usize,
    },

    /// Step index outside the card's steps
    #[error("step index {index} out of range (card has {len} steps)")]
    StepOutOfRange {
        /// Requested index
        index: usize,
        /// Number of steps
        len: usize,
    },
}

impl TrackerError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::BlockNotFound(_) | TrackerError::ModuleNotFound { .. } => {
                ErrorKind::NotFound
            }
            TrackerError::NoBlockSelected | TrackerError::NoModuleSelected => {
                ErrorKind::InvalidState
            }
            TrackerError::CardOutOfRange { .. } | TrackerError::StepOutOfRange { .. } => {
                ErrorKind::OutOfRange
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TrackerError::BlockNotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(TrackerError::NoBlockSelected.kind(), ErrorKind::InvalidState);
        assert_eq!(
            TrackerError::CardOutOfRange { index: 5, len: 2 }.kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_error_messages() {
        let err = TrackerError::ModuleNotFound {
            block: "Finances".into(),
            module: "X".into(),
        };
        assert_eq!(err.to_string(), "module 'X' not found in block 'Finances'");
        assert_eq!(
            TrackerError::CardOutOfRange { index: 5, len: 2 }.to_string(),
            "card index 5 out of range (module has 2 cards)"
        );
    }
}
