//! Error types
//!
//! Only configuration problems are errors. Generation shortfalls (a room pair
//! that cannot be linked, a barrier with nowhere to go) are recorded in the
//! `GenerationReport` instead.

use thiserror::Error;

/// Problems with a `MazeConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Frame size must be positive")]
    ZeroFrame,

    #[error("Room count must be positive")]
    NoRooms,

    #[error("Span '{field}' is inverted: {lower} > {upper}")]
    InvertedSpan {
        field: &'static str,
        lower: u32,
        upper: u32,
    },

    #[error("Span '{field}' must start at 1 or more")]
    ZeroLowerBound { field: &'static str },

    #[error("Span '{field}' allows {size} cells, larger than the frame ({frame})")]
    UnitExceedsFrame {
        field: &'static str,
        size: u32,
        frame: u32,
    },

    #[error("Barrier chance {0}% is above 100")]
    ChanceOutOfRange(u32),

    #[error("Element codes must be non-zero and distinct (wall {wall}, closed cap {closed_cap})")]
    InvalidElementCodes { wall: u32, closed_cap: u32 },

    #[error("Minimum barrier length {0} is below 2")]
    BarrierTooShort(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
