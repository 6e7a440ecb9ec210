//! Occupied room cells

use serde::{Deserialize, Serialize};

use super::geometry::{Orientation, Point, Rotation, Sides};

/// Room identifier, assigned 1..=N in pipeline order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

/// Run-unique cell identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellId(pub u32);

/// Hands out cell ids for one generation run
#[derive(Debug, Clone, Default)]
pub struct CellIds {
    next: u32,
}

impl CellIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> CellId {
        self.next += 1;
        CellId(self.next)
    }
}

/// Element written onto a cell by the barrier placer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedElement {
    /// Non-zero element code
    pub code: u32,
    pub rotation: Rotation,
}

/// A single occupied grid position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub room: RoomId,
    /// Position inside the room frame
    pub frame: Point,
    /// World position, set when the room is placed
    pub screen: Point,
    /// Sides through which a gateway leaves this cell
    pub next_to_gateway: Sides,
    pub element: Option<PlacedElement>,
}

impl Cell {
    pub fn new(id: CellId, room: RoomId, frame: Point) -> Self {
        Self {
            id,
            room,
            frame,
            screen: frame,
            next_to_gateway: Sides::empty(),
            element: None,
        }
    }

    /// Adjacent to a gateway on any side
    pub fn presents_gateway(&self) -> bool {
        !self.next_to_gateway.is_empty()
    }

    pub fn next_to_gateway_on(&self, orientation: Orientation) -> bool {
        self.next_to_gateway.has(orientation)
    }

    /// Free for barrier placement: no gateway and no element
    pub fn available(&self) -> bool {
        !self.presents_gateway() && self.element_code() == 0
    }

    /// Element code, 0 when empty
    pub fn element_code(&self) -> u32 {
        self.element.map_or(0, |e| e.code)
    }

    pub fn place_element(&mut self, code: u32, rotation: Rotation) {
        self.element = Some(PlacedElement { code, rotation });
    }
}
