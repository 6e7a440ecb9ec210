//! Default values and fixed limits

/// Default side of a room frame
pub const DEFAULT_FRAME_SIZE: u32 = 20;

/// Default screen gap between room frames, wide enough that rooms never see each other
pub const DEFAULT_DISTANCING: u32 = 10;

/// Default element code for a plain barrier block
pub const DEFAULT_WALL_CODE: u32 = 1;

/// Default element code for a barrier block next to the passage
pub const DEFAULT_CLOSED_CAP_CODE: u32 = 2;

/// Default tag carried by the terminal gateway
pub const DEFAULT_EXIT_DESTINATION: &str = "next-level";

/// A barrier needs one block and one passage at least
pub const MIN_BARRIER_LENGTH: u32 = 2;

/// Screen position the terminal gateway points at
pub const TERMINAL_TARGET: (i32, i32) = (0, 0);
