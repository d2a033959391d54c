//! Error taxonomy for the simulation engine

use thiserror::Error;

/// Recoverable failures reported by the engine.
///
/// Every variant is a deterministic function of its inputs; none is fatal
/// to the process and the engine performs no retries. Callers are expected
/// to handle these (e.g. re-prompt for valid dimensions).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `create` was called with a zero dimension. Checked before any
    /// mutation, so the previous board (if any) is left untouched.
    #[error("invalid board dimensions {width}x{height}: both sides must be positive")]
    InvalidDimensions { width: usize, height: usize },

    /// An operation that needs a board ran before any successful `create`.
    #[error("no board has been created yet")]
    Uninitialized,

    /// A cell coordinate fell outside `[0,width) x [0,height)`.
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A flat snapshot was empty or its length was not a perfect square.
    /// Decode has no partial effect.
    #[error("malformed snapshot: length {len} is not a positive perfect square")]
    MalformedSnapshot { len: usize },
}

/// Engine-local result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
