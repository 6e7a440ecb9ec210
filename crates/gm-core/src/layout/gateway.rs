//! Gateways linking consecutive rooms
//!
//! Room `i` is linked to room `i + 1` through one pair of facing gateways
//! (Top with Bottom, Right with Left). Each gateway sends travellers to the
//! cell just inside its partner's mouth, never onto the partner itself. The
//! last room gets a single gateway to an external destination.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::TERMINAL_TARGET;
use crate::rng::MazeRng;

use super::cell::RoomId;
use super::geometry::{Orientation, Point};
use super::room::Room;
use super::topology::border_cells;

/// Where a gateway leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    Room(RoomId),
    /// Outside the maze, e.g. the next scene
    External(String),
}

/// One side of a room-to-room link, or the terminal exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub from_room: RoomId,
    pub destination: Destination,
    /// Frame position of the border cell the gateway opens from
    pub frame: Point,
    /// Screen position of the mouth, one step outside the border cell
    pub from_screen: Point,
    /// Screen position a traveller lands on
    pub to_screen: Point,
    pub orientation: Orientation,
}

impl Gateway {
    pub fn to_room(&self) -> Option<RoomId> {
        match self.destination {
            Destination::Room(id) => Some(id),
            Destination::External(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.destination, Destination::External(_))
    }

    /// Landing position for travellers coming through this gateway's partner
    pub fn landing(&self) -> Point {
        self.from_screen + self.orientation.modifier()
    }
}

/// A link that could not be built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFailure {
    pub from_room: RoomId,
    /// None for the terminal exit
    pub to_room: Option<RoomId>,
}

/// Gateways and failures produced by `plan_gateways`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayPlan {
    pub gateways: Vec<Gateway>,
    pub failures: Vec<LinkFailure>,
}

/// Border cells on `side` where a gateway may open
///
/// A cell qualifies when it does not already lead into any gateway, the
/// mouth position outside it touches exactly one occupied cell, and neither
/// perpendicular neighbour already leads into a gateway on `side`.
pub fn gate_cells(room: &Room, side: Orientation) -> Vec<Point> {
    border_cells(room, side)
        .into_iter()
        .filter(|p| is_gate_cell(room, *p, side))
        .collect()
}

fn is_gate_cell(room: &Room, p: Point, side: Orientation) -> bool {
    let Some(cell) = room.get(p) else {
        return false;
    };
    if cell.presents_gateway() {
        return false;
    }

    let mouth = p + side.step();
    let touching = Orientation::ALL
        .iter()
        .filter(|dir| room.neighbor(mouth, **dir).is_some())
        .count();
    if touching != 1 {
        return false;
    }

    !side.perpendicular().iter().any(|dir| {
        room.neighbor(p, *dir)
            .is_some_and(|n| n.next_to_gateway_on(side))
    })
}

/// Open a gateway from the cell at `p` through `side`
///
/// Flags the cell and returns a gateway whose target is still unset.
fn open_gateway(room: &mut Room, p: Point, side: Orientation, destination: Destination) -> Gateway {
    room.mark_gateway(p, side);
    let from_screen = room.to_screen(p + side.step());
    Gateway {
        from_room: room.id,
        destination,
        frame: p,
        from_screen,
        to_screen: from_screen,
        orientation: side,
    }
}

/// Link two rooms with a facing pair of gateways
///
/// Tries the four orientations for `first` in random order, each against
/// its opposite on `second`. Returns None if no orientation has gate cells
/// on both sides.
pub fn link_rooms(
    first: &mut Room,
    second: &mut Room,
    rng: &mut MazeRng,
) -> Option<(Gateway, Gateway)> {
    let mut orientations = Orientation::ALL;
    rng.shuffle(&mut orientations);

    for side in orientations {
        let facing = side.opposite();
        let enter = gate_cells(first, side);
        let exit = gate_cells(second, facing);
        if enter.is_empty() || exit.is_empty() {
            continue;
        }

        let (Some(&a), Some(&b)) = (rng.choose(&enter), rng.choose(&exit)) else {
            continue;
        };
        let mut gate_a = open_gateway(first, a, side, Destination::Room(second.id));
        let mut gate_b = open_gateway(second, b, facing, Destination::Room(first.id));

        // Each side lands one step inside the other side's mouth
        gate_a.to_screen = gate_b.landing();
        gate_b.to_screen = gate_a.landing();

        debug!(
            from = first.id.0,
            to = second.id.0,
            %side,
            "linked rooms"
        );
        return Some((gate_a, gate_b));
    }
    None
}

/// Open the last room's exit to an external destination
pub fn open_exit(room: &mut Room, destination: &str, rng: &mut MazeRng) -> Option<Gateway> {
    let mut orientations = Orientation::ALL;
    rng.shuffle(&mut orientations);

    for side in orientations {
        let cells = gate_cells(room, side);
        let Some(&p) = rng.choose(&cells) else {
            continue;
        };
        let mut gate = open_gateway(room, p, side, Destination::External(destination.to_string()));
        gate.to_screen = Point::from(TERMINAL_TARGET);
        debug!(room = room.id.0, %side, destination, "opened exit");
        return Some(gate);
    }
    None
}

/// Link every room to the next and open an exit from the last one
pub fn plan_gateways(rooms: &mut [Room], exit_destination: &str, rng: &mut MazeRng) -> GatewayPlan {
    let mut plan = GatewayPlan::default();

    for i in 1..rooms.len() {
        let (head, tail) = rooms.split_at_mut(i);
        let first = &mut head[i - 1];
        let second = &mut tail[0];
        match link_rooms(first, second, rng) {
            Some((a, b)) => {
                plan.gateways.push(a);
                plan.gateways.push(b);
            }
            None => {
                warn!(from = first.id.0, to = second.id.0, "no compatible gateway orientation");
                plan.failures.push(LinkFailure {
                    from_room: first.id,
                    to_room: Some(second.id),
                });
            }
        }
    }

    if let Some(last) = rooms.last_mut() {
        match open_exit(last, exit_destination, rng) {
            Some(gate) => plan.gateways.push(gate),
            None => {
                warn!(room = last.id.0, "no border cell can hold the exit");
                plan.failures.push(LinkFailure {
                    from_room: last.id,
                    to_room: None,
                });
            }
        }
    }

    plan
}
