//! Border and corner classification
//!
//! Everything here is derived from neighbour occupancy. A cell is a border on
//! a side when that side leaves the frame or faces an empty position.

use std::collections::BTreeSet;

use tracing::debug;

use super::geometry::{Corner, Orientation, Point, Sides};
use super::room::Room;

/// Sides of the cell at `p` that face the frame edge or an empty position
///
/// Ignores gateway flags. Empty for unoccupied positions.
pub fn open_sides(room: &Room, p: Point) -> Sides {
    let mut sides = Sides::empty();
    if !room.is_occupied(p) {
        return sides;
    }
    for side in Orientation::ALL {
        sides.set_side(side, room.neighbor(p, side).is_none());
    }
    sides
}

/// Check if the cell at `p` is a border on `side`
///
/// A cell leading into a gateway on `side` is not a border there: the
/// gateway mouth stays open.
pub fn is_border(room: &Room, p: Point, side: Orientation) -> bool {
    match room.get(p) {
        Some(cell) if cell.next_to_gateway_on(side) => false,
        Some(_) => open_sides(room, p).has(side),
        None => false,
    }
}

/// Border cells on `side`, column by column
pub fn border_cells(room: &Room, side: Orientation) -> Vec<Point> {
    room.cells()
        .map(|c| c.frame)
        .filter(|p| is_border(room, *p, side))
        .collect()
}

/// Corners of the cell at `p` whose two sides are both open
///
/// The four corners are tested independently.
pub fn corners(room: &Room, p: Point) -> Vec<Corner> {
    let open = open_sides(room, p);
    Corner::ALL
        .into_iter()
        .filter(|corner| {
            let (v, h) = corner.sides();
            open.has(v) && open.has(h)
        })
        .collect()
}

/// Frame positions just outside every gateway, one per flagged side
pub fn gateway_mouths(room: &Room) -> BTreeSet<Point> {
    room.cells()
        .flat_map(|c| c.next_to_gateway.orientations().map(move |side| c.frame + side.step()))
        .collect()
}

/// Rebuild the room's wall registry
///
/// Emits one segment outside every border side and one diagonal segment for
/// every open corner, then sets all neighbour flags. Occupied positions and
/// gateway mouths never receive a segment.
pub fn classify_walls(room: &mut Room) {
    let mut walls = std::mem::take(&mut room.walls);
    walls.clear();
    let mouths = gateway_mouths(room);
    let free = |at: Point| !room.is_occupied(at) && !mouths.contains(&at);

    for side in Orientation::ALL {
        for p in border_cells(room, side) {
            let at = p + side.step();
            if free(at) {
                walls.add(at, room.to_screen(at));
            }
        }
    }
    let edge_segments = walls.len();

    for p in room.occupied_points() {
        for corner in corners(room, p) {
            let at = p + corner.step();
            if free(at) {
                walls.add(at, room.to_screen(at));
            }
        }
    }

    walls.finalize(room);
    debug!(
        room = room.id.0,
        edges = edge_segments,
        corners = walls.len() - edge_segments,
        "classified walls"
    );
    room.walls = walls;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::cell::{CellIds, RoomId};
    use crate::layout::gateway::gate_cells;
    use crate::layout::rect::Rect;
    use crate::layout::wall::WallVariant;

    fn room_of(rects: &[Rect]) -> Room {
        let mut room = Room::new(RoomId(1), 10);
        let mut ids = CellIds::new();
        for r in rects {
            room.stamp(r, &mut ids);
        }
        room
    }

    #[test]
    fn test_square_borders() {
        let room = room_of(&[Rect::new(3, 3, 6, 6)]);
        assert_eq!(border_cells(&room, Orientation::Top).len(), 4);
        assert_eq!(border_cells(&room, Orientation::Left).len(), 4);
        assert!(border_cells(&room, Orientation::Top)
            .iter()
            .all(|p| p.y == 6));
    }

    #[test]
    fn test_frame_edge_is_border() {
        let room = room_of(&[Rect::frame(10)]);
        assert!(is_border(&room, Point::new(0, 4), Orientation::Left));
        assert!(!is_border(&room, Point::new(1, 4), Orientation::Left));
        assert_eq!(corners(&room, Point::new(9, 9)), vec![Corner::TopRight]);
    }

    #[test]
    fn test_gateway_side_not_border() {
        let mut room = room_of(&[Rect::new(3, 3, 6, 6)]);
        room.mark_gateway(Point::new(6, 4), Orientation::Right);
        assert!(!is_border(&room, Point::new(6, 4), Orientation::Right));
        assert!(open_sides(&room, Point::new(6, 4)).has(Orientation::Right));

        classify_walls(&mut room);
        assert!(!room.walls.contains(Point::new(7, 4)));
        assert!(room.walls.contains(Point::new(7, 5)));
    }

    #[test]
    fn test_single_cell_corners() {
        let room = room_of(&[Rect::new(4, 4, 4, 4)]);
        assert_eq!(corners(&room, Point::new(4, 4)).len(), 4);
    }

    #[test]
    fn test_square_walls() {
        let mut room = room_of(&[Rect::new(3, 3, 6, 6)]);
        classify_walls(&mut room);
        // 4 sides of 4 plus 4 corners
        assert_eq!(room.walls.len(), 20);

        let corner = room.walls.get(Point::new(7, 7)).unwrap();
        assert!(corner.cells.is_empty());
        assert_eq!(corner.variant(), WallVariant::OuterCorner(Corner::TopRight));

        let top = room.walls.get(Point::new(4, 7)).unwrap();
        assert_eq!(top.variant(), WallVariant::Horizontal);
        assert!(top.cell_on(Orientation::Bottom));

        let left = room.walls.get(Point::new(2, 5)).unwrap();
        assert_eq!(left.variant(), WallVariant::Vertical);
    }

    #[test]
    fn test_l_shape_inner_corner() {
        // Horizontal bar with a column rising from its left end
        let mut room = room_of(&[Rect::new(2, 2, 6, 3), Rect::new(2, 4, 3, 7)]);
        classify_walls(&mut room);
        let inner = room.walls.get(Point::new(4, 4)).unwrap();
        assert_eq!(inner.variant(), WallVariant::InnerCorner(Corner::BottomLeft));
    }

    #[test]
    fn test_corner_never_on_cell() {
        // Two cells touching only diagonally
        let mut room = room_of(&[Rect::new(3, 3, 3, 3), Rect::new(4, 4, 4, 4)]);
        classify_walls(&mut room);
        assert!(!room.walls.contains(Point::new(4, 4)));
        assert!(!room.walls.contains(Point::new(3, 3)));
        assert!(room.walls.contains(Point::new(2, 2)));
        assert!(room.walls.contains(Point::new(5, 5)));
    }

    #[test]
    fn test_corner_never_on_gateway_mouth() {
        // U shape opening to the right: the top arm's end cell sits
        // diagonally above the mouth of the bottom arm's end cell
        let mut room = room_of(&[
            Rect::new(2, 5, 5, 5),
            Rect::new(2, 5, 2, 7),
            Rect::new(2, 7, 4, 7),
        ]);
        assert!(gate_cells(&room, Orientation::Top).contains(&Point::new(5, 5)));
        assert_eq!(corners(&room, Point::new(4, 7)).len(), 2);

        room.mark_gateway(Point::new(5, 5), Orientation::Top);
        classify_walls(&mut room);

        assert_eq!(gateway_mouths(&room), BTreeSet::from([Point::new(5, 6)]));
        assert!(!room.walls.contains(Point::new(5, 6)));
        assert!(room.walls.contains(Point::new(5, 8)));
        assert!(room.walls.contains(Point::new(6, 5)));
    }

    #[test]
    fn test_classify_is_idempotent() {
        let mut room = room_of(&[Rect::new(1, 1, 4, 2), Rect::new(3, 2, 5, 6)]);
        classify_walls(&mut room);
        let first: Vec<_> = room.walls.iter().cloned().collect();
        classify_walls(&mut room);
        let second: Vec<_> = room.walls.iter().cloned().collect();
        assert_eq!(first, second);
    }
}
