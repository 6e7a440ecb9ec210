//! gm-core: Procedural room and gateway generation
//!
//! Composes rooms from overlapping rectangles, classifies their borders and
//! corners into wall segments, links consecutive rooms through facing
//! gateways and optionally splits rooms with barriers.
//!
//! This crate has no rendering or I/O beyond reading a JSON configuration.
//! Consumers receive the result as plain data or through the `Spawner` trait.

pub mod config;
pub mod errors;
pub mod layout;
pub mod maze;

mod consts;
mod rng;

pub use config::{BarrierConfig, ElementCodes, MazeConfig, Span};
pub use consts::*;
pub use errors::{ConfigError, GenerationError};
pub use maze::{generate, room_origin, GenerationReport, Maze, SpawnTag, Spawner};
pub use rng::MazeRng;
