//! Wall segments around room perimeters
//!
//! A segment records which of its four neighbours are other segments and
//! which are occupied cells. Renderers pick a visual from those eight flags
//! alone, through `WallSegment::variant`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::{Corner, Orientation, Point, Sides};
use super::room::Room;

/// One perimeter or corner wall unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSegment {
    /// Frame position, may lie one step outside the frame
    pub frame: Point,
    pub screen: Point,
    /// Sides with another segment
    pub walls: Sides,
    /// Sides with an occupied cell
    pub cells: Sides,
}

/// Visual selected for a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallVariant {
    /// Convex corner, no cell touches the segment
    OuterCorner(Corner),
    /// Concave corner hugging two cells
    InnerCorner(Corner),
    Horizontal,
    Vertical,
    /// Dead end whose only neighbouring segment lies on this side
    Tip(Orientation),
    Default,
}

impl WallVariant {
    /// ASCII glyph used by terminal renderers
    pub const fn glyph(self) -> char {
        match self {
            WallVariant::OuterCorner(_) | WallVariant::InnerCorner(_) => '+',
            WallVariant::Horizontal => '-',
            WallVariant::Vertical => '|',
            WallVariant::Tip(Orientation::Top | Orientation::Bottom) => '|',
            WallVariant::Tip(Orientation::Left | Orientation::Right) => '-',
            WallVariant::Default => '#',
        }
    }
}

impl WallSegment {
    pub fn new(frame: Point, screen: Point) -> Self {
        Self {
            frame,
            screen,
            walls: Sides::empty(),
            cells: Sides::empty(),
        }
    }

    pub fn wall_on(&self, side: Orientation) -> bool {
        self.walls.has(side)
    }

    pub fn cell_on(&self, side: Orientation) -> bool {
        self.cells.has(side)
    }

    /// Pick the visual for this segment from its neighbour flags
    pub fn variant(&self) -> WallVariant {
        use Orientation::{Bottom, Left, Right, Top};

        let w = self.walls;
        let only = |a: Orientation, b: Orientation| w == a.side() | b.side();

        if self.cells.is_empty() {
            // Free-standing diagonal: only the four outer corner shapes apply
            return if only(Right, Top) {
                WallVariant::OuterCorner(Corner::BottomLeft)
            } else if only(Right, Bottom) {
                WallVariant::OuterCorner(Corner::TopLeft)
            } else if only(Left, Top) {
                WallVariant::OuterCorner(Corner::BottomRight)
            } else if only(Left, Bottom) {
                WallVariant::OuterCorner(Corner::TopRight)
            } else {
                WallVariant::Default
            };
        }

        let wall = |side: Orientation| self.wall_on(side);
        let cell = |side: Orientation| self.cell_on(side);

        if wall(Right) && wall(Top) && cell(Left) && cell(Bottom) {
            WallVariant::InnerCorner(Corner::BottomLeft)
        } else if wall(Right) && wall(Bottom) && cell(Left) && cell(Top) {
            WallVariant::InnerCorner(Corner::TopLeft)
        } else if wall(Left) && wall(Top) && cell(Right) && cell(Bottom) {
            WallVariant::InnerCorner(Corner::BottomRight)
        } else if wall(Left) && wall(Bottom) && cell(Right) && cell(Top) {
            WallVariant::InnerCorner(Corner::TopRight)
        } else if wall(Top) && wall(Bottom) && !wall(Right) && !wall(Left) {
            WallVariant::Vertical
        } else if wall(Right) && wall(Left) && !wall(Top) && !wall(Bottom) {
            WallVariant::Horizontal
        } else if w.bits().count_ones() == 1 {
            match w.orientations().next() {
                Some(side) => WallVariant::Tip(side),
                None => WallVariant::Default,
            }
        } else {
            WallVariant::Default
        }
    }
}

/// Segments of one room, at most one per frame position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallRegistry {
    #[serde(with = "segment_list")]
    segments: BTreeMap<Point, WallSegment>,
}

impl WallRegistry {
    /// Register a segment at `frame` unless one already exists there
    ///
    /// Returns true if a new segment was created.
    pub fn add(&mut self, frame: Point, screen: Point) -> bool {
        if self.segments.contains_key(&frame) {
            return false;
        }
        self.segments.insert(frame, WallSegment::new(frame, screen));
        true
    }

    pub fn get(&self, frame: Point) -> Option<&WallSegment> {
        self.segments.get(&frame)
    }

    pub fn contains(&self, frame: Point) -> bool {
        self.segments.contains_key(&frame)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Segments ordered by frame position
    pub fn iter(&self) -> impl Iterator<Item = &WallSegment> {
        self.segments.values()
    }

    /// Set every segment's neighbour flags from the registry and the room grid
    pub fn finalize(&mut self, room: &Room) {
        let positions: Vec<Point> = self.segments.keys().copied().collect();
        for p in positions {
            let mut walls = Sides::empty();
            let mut cells = Sides::empty();
            for side in Orientation::ALL {
                let n = p + side.step();
                walls.set_side(side, self.segments.contains_key(&n));
                cells.set_side(side, room.is_occupied(n));
            }
            if let Some(segment) = self.segments.get_mut(&p) {
                segment.walls = walls;
                segment.cells = cells;
            }
        }
    }
}

// JSON object keys must be strings, so the registry is written as a list.
mod segment_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Point, WallSegment};

    pub fn serialize<S>(map: &BTreeMap<Point, WallSegment>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let list: Vec<&WallSegment> = map.values().collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Point, WallSegment>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<WallSegment>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|s| (s.frame, s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(walls: Sides, cells: Sides) -> WallSegment {
        WallSegment {
            frame: Point::ORIGIN,
            screen: Point::ORIGIN,
            walls,
            cells,
        }
    }

    #[test]
    fn test_outer_corners() {
        let s = segment(Sides::RIGHT | Sides::TOP, Sides::empty());
        assert_eq!(s.variant(), WallVariant::OuterCorner(Corner::BottomLeft));
        let s = segment(Sides::LEFT | Sides::BOTTOM, Sides::empty());
        assert_eq!(s.variant(), WallVariant::OuterCorner(Corner::TopRight));
    }

    #[test]
    fn test_no_cells_never_a_run() {
        for bits in 0..16u8 {
            let s = segment(Sides::from_bits_truncate(bits), Sides::empty());
            assert!(matches!(
                s.variant(),
                WallVariant::OuterCorner(_) | WallVariant::Default
            ));
        }
    }

    #[test]
    fn test_inner_corner() {
        let s = segment(Sides::LEFT | Sides::TOP, Sides::RIGHT | Sides::BOTTOM);
        assert_eq!(s.variant(), WallVariant::InnerCorner(Corner::BottomRight));
    }

    #[test]
    fn test_runs() {
        let s = segment(Sides::LEFT | Sides::RIGHT, Sides::BOTTOM);
        assert_eq!(s.variant(), WallVariant::Horizontal);
        let s = segment(Sides::TOP | Sides::BOTTOM, Sides::LEFT | Sides::RIGHT);
        assert_eq!(s.variant(), WallVariant::Vertical);
    }

    #[test]
    fn test_tip() {
        let s = segment(Sides::BOTTOM, Sides::LEFT | Sides::RIGHT);
        assert_eq!(s.variant(), WallVariant::Tip(Orientation::Bottom));
    }

    #[test]
    fn test_registry_dedups() {
        let mut registry = WallRegistry::default();
        assert!(registry.add(Point::new(1, 1), Point::new(11, 1)));
        assert!(!registry.add(Point::new(1, 1), Point::new(99, 99)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(Point::new(1, 1)).unwrap().screen, Point::new(11, 1));
    }

    #[test]
    fn test_registry_json_roundtrip() {
        let mut registry = WallRegistry::default();
        registry.add(Point::new(-1, 0), Point::new(-1, 0));
        registry.add(Point::new(0, -1), Point::new(0, -1));
        let json = serde_json::to_string(&registry).unwrap();
        let back: WallRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert!(back.contains(Point::new(-1, 0)));
    }
}
