//! Room layout
//!
//! Contains geometry, cells, rooms, walls and the four generation stages:
//! composition, classification, gateway planning and barrier placement.

mod barrier;
mod cell;
mod compositor;
mod gateway;
mod geometry;
mod rect;
mod room;
mod topology;
mod wall;

pub use barrier::{
    flanks_available, passage_indices, place_along, place_barrier, place_barriers, run_length,
    Barrier, BarrierAxis,
};
pub use cell::{Cell, CellId, CellIds, PlacedElement, RoomId};
pub use compositor::{add_unit, anchored_unit, centered_unit, compose_room, UnitPlacement};
pub use gateway::{
    gate_cells, link_rooms, open_exit, plan_gateways, Destination, Gateway, GatewayPlan,
    LinkFailure,
};
pub use geometry::{Corner, Orientation, Point, Rotation, Sides};
pub use rect::Rect;
pub use room::{Room, StampOutcome};
pub use topology::{border_cells, classify_walls, corners, gateway_mouths, is_border, open_sides};
pub use wall::{WallRegistry, WallSegment, WallVariant};
