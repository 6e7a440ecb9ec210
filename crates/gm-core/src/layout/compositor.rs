//! Room composition from overlapping rectangles
//!
//! The first cellular unit is centred on the frame. Each later unit anchors
//! off a random occupied cell and grows diagonally away from it, pulled back
//! by `compression` cells on both axes so neighbouring units merge.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, trace};

use crate::config::MazeConfig;
use crate::rng::MazeRng;

use super::cell::CellIds;
use super::geometry::Point;
use super::rect::Rect;
use super::room::{Room, StampOutcome};

/// Diagonal direction a unit grows in from its anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum UnitPlacement {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl UnitPlacement {
    pub const ALL: [UnitPlacement; 4] = [
        UnitPlacement::TopLeft,
        UnitPlacement::TopRight,
        UnitPlacement::BottomRight,
        UnitPlacement::BottomLeft,
    ];

    /// Unclamped bottom-left origin of a `width` x `height` unit anchored at `anchor`
    pub fn origin(self, anchor: Point, width: i32, height: i32, compression: i32) -> Point {
        let dx = width - compression;
        let dy = height - compression;
        match self {
            UnitPlacement::TopLeft => Point::new(anchor.x - dx, anchor.y + dy),
            UnitPlacement::TopRight => Point::new(anchor.x + dx, anchor.y + dy),
            UnitPlacement::BottomRight => Point::new(anchor.x + dx, anchor.y - dy),
            UnitPlacement::BottomLeft => Point::new(anchor.x - dx, anchor.y - dy),
        }
    }
}

/// Rectangle of the first unit, centred on the frame's midpoint
pub fn centered_unit(frame_size: i32, width: i32, height: i32) -> Rect {
    let mid = frame_size / 2;
    let origin = Point::new(mid - width / 2, mid - height / 2);
    Rect::from_origin(origin, width, height).clamped_into(frame_size)
}

/// Rectangle of a later unit, clamped so it starts inside the frame
pub fn anchored_unit(
    frame_size: i32,
    anchor: Point,
    placement: UnitPlacement,
    width: i32,
    height: i32,
    compression: i32,
) -> Rect {
    let origin = placement.origin(anchor, width, height, compression);
    Rect::from_origin(origin, width, height).clamped_into(frame_size)
}

/// Stamp one unit of the given size onto the room
///
/// An empty room gets the centred unit; otherwise the anchor and placement
/// are drawn from `rng`.
pub fn add_unit(
    room: &mut Room,
    width: i32,
    height: i32,
    compression: i32,
    ids: &mut CellIds,
    rng: &mut MazeRng,
) -> StampOutcome {
    let size = room.frame_size();
    let occupied = room.occupied_points();

    let rect = match rng.choose(&occupied) {
        None => centered_unit(size, width, height),
        Some(&anchor) => {
            let placement = UnitPlacement::ALL[rng.below(4) as usize];
            trace!(?anchor, %placement, width, height, "anchoring unit");
            anchored_unit(size, anchor, placement, width, height, compression)
        }
    };
    room.stamp(&rect, ids)
}

/// Compose the occupied shape of a room
///
/// Draws the unit count, then each unit's width and height, swapping them
/// half of the time.
pub fn compose_room(
    room: &mut Room,
    config: &MazeConfig,
    ids: &mut CellIds,
    rng: &mut MazeRng,
) -> StampOutcome {
    let units = rng.span(config.units_per_room);
    let compression = config.compression as i32;
    let mut total = StampOutcome::default();

    for _ in 0..units {
        let mut width = rng.span(config.unit_width) as i32;
        let mut height = rng.span(config.unit_height) as i32;
        if rng.one_in(2) {
            std::mem::swap(&mut width, &mut height);
        }
        let outcome = add_unit(room, width, height, compression, ids, rng);
        total.created += outcome.created;
        total.replaced += outcome.replaced;
    }

    debug!(
        room = room.id.0,
        units,
        cells = room.cell_count(),
        replaced = total.replaced,
        regions = room.regions(),
        "composed room"
    );
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Span;
    use crate::layout::cell::RoomId;

    #[test]
    fn test_centered_unit() {
        let rect = centered_unit(10, 4, 4);
        assert_eq!(rect, Rect::new(3, 3, 6, 6));

        let rect = centered_unit(9, 3, 2);
        assert_eq!(rect, Rect::new(3, 3, 5, 4));
    }

    #[test]
    fn test_placement_origins() {
        let anchor = Point::new(10, 10);
        assert_eq!(
            UnitPlacement::TopLeft.origin(anchor, 4, 3, 1),
            Point::new(7, 12)
        );
        assert_eq!(
            UnitPlacement::TopRight.origin(anchor, 4, 3, 1),
            Point::new(13, 12)
        );
        assert_eq!(
            UnitPlacement::BottomRight.origin(anchor, 4, 3, 1),
            Point::new(13, 8)
        );
        assert_eq!(
            UnitPlacement::BottomLeft.origin(anchor, 4, 3, 1),
            Point::new(7, 8)
        );
    }

    #[test]
    fn test_anchored_unit_clamps() {
        let rect = anchored_unit(10, Point::new(8, 8), UnitPlacement::TopRight, 4, 4, 0);
        assert_eq!(rect, Rect::new(6, 6, 9, 9));

        let rect = anchored_unit(10, Point::new(1, 1), UnitPlacement::BottomLeft, 3, 3, 0);
        assert_eq!(rect, Rect::new(0, 0, 2, 2));
    }

    #[test]
    fn test_first_unit_is_centered() {
        let mut room = Room::new(RoomId(1), 10);
        let mut ids = CellIds::new();
        let mut rng = MazeRng::new(5);
        let outcome = add_unit(&mut room, 4, 4, 1, &mut ids, &mut rng);
        assert_eq!(outcome.created, 16);
        assert!(room.is_occupied(Point::new(3, 3)));
        assert!(room.is_occupied(Point::new(6, 6)));
    }

    #[test]
    fn test_oversized_unit_stays_in_frame() {
        let mut room = Room::new(RoomId(1), 6);
        let mut ids = CellIds::new();
        let mut rng = MazeRng::new(5);
        add_unit(&mut room, 9, 2, 0, &mut ids, &mut rng);
        add_unit(&mut room, 2, 9, 0, &mut ids, &mut rng);
        assert!(room.cells().all(|c| room.in_frame(c.frame)));
    }

    #[test]
    fn test_compose_room_respects_frame() {
        let config = MazeConfig {
            frame_size: 12,
            units_per_room: Span::new(3, 6),
            unit_width: Span::new(2, 5),
            unit_height: Span::new(2, 5),
            ..MazeConfig::default()
        };
        for seed in 0..50 {
            let mut room = Room::new(RoomId(1), config.frame_size);
            let mut ids = CellIds::new();
            let mut rng = MazeRng::new(seed);
            let outcome = compose_room(&mut room, &config, &mut ids, &mut rng);
            assert!(!room.is_empty());
            assert_eq!(outcome.created, room.cell_count());
            assert!(room.cells().all(|c| room.in_frame(c.frame)));
        }
    }
}
