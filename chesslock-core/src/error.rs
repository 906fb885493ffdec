//! Error types for the board overlay.

use thiserror::Error;

/// Errors that can occur in the board overlay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Row or column outside 0-7
    #[error("invalid coordinate ({row}, {col}): must be 0-7")]
    InvalidCoordinate { row: u8, col: u8 },

    /// A move was ready to commit but no field is bound to receive its text
    #[error("no target field bound")]
    NoTargetBound,

    /// Piece letter that is not one of PNBRQK
    #[error("unknown piece kind {0:?}")]
    UnknownPieceKind(char),

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    /// Configuration could not be parsed
    #[error("invalid config: {0}")]
    Config(String),
}

/// Result type alias for overlay operations
pub type Result<T> = std::result::Result<T, Error>;
