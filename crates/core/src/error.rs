//! Error types for the resolution core
//!
//! Only programming and configuration mistakes are errors. A swap that does
//! not produce a match is a normal outcome and is reported through
//! [`Rejection`](crate::session::Rejection) instead.

use thiserror::Error;

use crate::types::Pos;

/// Errors that can occur in the resolution core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Match3Error {
    /// Coordinates outside the grid were passed in
    #[error("position {pos} is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds { pos: Pos, rows: usize, cols: usize },

    /// Board dimensions or tile type count are unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The generator could not reach a match-free board
    #[error("board generation did not converge after {passes} passes")]
    GenerationFailed { passes: u32 },

    /// A cascade kept producing matches past the step cap
    #[error("cascade still matching after {steps} steps")]
    CascadeLimit { steps: u32 },

    /// No playable arrangement was found for a deadlocked board
    #[error("could not find a playable arrangement after {attempts} attempts")]
    ReshuffleFailed { attempts: u32 },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Match3Error>;
