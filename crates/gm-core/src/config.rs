//! Generation settings
//!
//! One `MazeConfig` is passed into `generate` and threaded through every
//! stage. Missing JSON fields fall back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CLOSED_CAP_CODE, DEFAULT_DISTANCING, DEFAULT_EXIT_DESTINATION, DEFAULT_FRAME_SIZE,
    DEFAULT_WALL_CODE, MIN_BARRIER_LENGTH,
};
use crate::errors::ConfigError;

/// Inclusive integer range `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub lower: u32,
    pub upper: u32,
}

impl Span {
    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    /// A span holding a single value
    pub const fn exactly(value: u32) -> Self {
        Self::new(value, value)
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.lower > self.upper {
            return Err(ConfigError::InvertedSpan {
                field,
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    fn check_positive(&self, field: &'static str) -> Result<(), ConfigError> {
        self.check(field)?;
        if self.lower == 0 {
            return Err(ConfigError::ZeroLowerBound { field });
        }
        Ok(())
    }
}

/// Element codes written onto barrier cells. Zero means "no element".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCodes {
    /// Plain wall block
    pub wall: u32,
    /// Block next to a passage
    pub closed_cap: u32,
}

impl Default for ElementCodes {
    fn default() -> Self {
        Self {
            wall: DEFAULT_WALL_CODE,
            closed_cap: DEFAULT_CLOSED_CAP_CODE,
        }
    }
}

/// Inner barrier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierConfig {
    /// Dice rolled per room
    pub trials: u32,
    /// Success percentage of each roll
    pub chance: u32,
    /// Shortest run worth walling
    pub min_length: u32,
    /// Width of the gap left in each barrier
    pub passage_width: Span,
    pub codes: ElementCodes,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            trials: 2,
            chance: 50,
            min_length: MIN_BARRIER_LENGTH,
            passage_width: Span::exactly(1),
            codes: ElementCodes::default(),
        }
    }
}

/// Full configuration surface of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Side of the square frame each room is composed in
    pub frame_size: u32,
    /// Number of rooms linked in sequence
    pub room_count: u32,
    /// Cellular units stamped per room
    pub units_per_room: Span,
    pub unit_width: Span,
    pub unit_height: Span,
    /// Overlap between a unit and the cell it anchors off
    pub compression: u32,
    /// Screen gap between consecutive room frames
    pub distancing: u32,
    /// Tag of the terminal gateway's destination
    pub exit_destination: String,
    pub barrier: BarrierConfig,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            room_count: 5,
            units_per_room: Span::new(2, 4),
            unit_width: Span::new(3, 6),
            unit_height: Span::new(2, 5),
            compression: 1,
            distancing: DEFAULT_DISTANCING,
            exit_destination: DEFAULT_EXIT_DESTINATION.to_string(),
            barrier: BarrierConfig::default(),
        }
    }
}

impl MazeConfig {
    /// Parse a JSON document, filling absent fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject degenerate settings instead of silently clamping them
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_size == 0 {
            return Err(ConfigError::ZeroFrame);
        }
        if self.room_count == 0 {
            return Err(ConfigError::NoRooms);
        }

        self.units_per_room.check_positive("units_per_room")?;
        for (field, span) in [("unit_width", self.unit_width), ("unit_height", self.unit_height)] {
            span.check_positive(field)?;
            if span.upper > self.frame_size {
                return Err(ConfigError::UnitExceedsFrame {
                    field,
                    size: span.upper,
                    frame: self.frame_size,
                });
            }
        }

        let barrier = &self.barrier;
        if barrier.chance > 100 {
            return Err(ConfigError::ChanceOutOfRange(barrier.chance));
        }
        if barrier.min_length < MIN_BARRIER_LENGTH {
            return Err(ConfigError::BarrierTooShort(barrier.min_length));
        }
        barrier.passage_width.check_positive("passage_width")?;

        let codes = barrier.codes;
        if codes.wall == 0 || codes.closed_cap == 0 || codes.wall == codes.closed_cap {
            return Err(ConfigError::InvalidElementCodes {
                wall: codes.wall,
                closed_cap: codes.closed_cap,
            });
        }

        Ok(())
    }
}
