//! Grid coordinates and directions
//!
//! Frames use a y-up convention: `Top` is `+y`, `Right` is `+x`.

use core::ops::{Add, Mul, Neg, Sub};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Integer grid position (frame- or screen-space)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Cardinal side of a cell, also the facing of a gateway
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum Orientation {
    Top,
    Right,
    Bottom,
    Left,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Top,
        Orientation::Right,
        Orientation::Bottom,
        Orientation::Left,
    ];

    /// Unit step leaving a cell through this side
    pub const fn step(self) -> Point {
        match self {
            Orientation::Top => Point::new(0, 1),
            Orientation::Right => Point::new(1, 0),
            Orientation::Bottom => Point::new(0, -1),
            Orientation::Left => Point::new(-1, 0),
        }
    }

    /// Unit step from a gateway mouth back into its room
    pub const fn modifier(self) -> Point {
        match self {
            Orientation::Top => Point::new(0, -1),
            Orientation::Right => Point::new(-1, 0),
            Orientation::Bottom => Point::new(0, 1),
            Orientation::Left => Point::new(1, 0),
        }
    }

    pub const fn opposite(self) -> Orientation {
        match self {
            Orientation::Top => Orientation::Bottom,
            Orientation::Bottom => Orientation::Top,
            Orientation::Right => Orientation::Left,
            Orientation::Left => Orientation::Right,
        }
    }

    /// The two sides at right angles to this one
    pub const fn perpendicular(self) -> [Orientation; 2] {
        match self {
            Orientation::Top | Orientation::Bottom => [Orientation::Right, Orientation::Left],
            Orientation::Right | Orientation::Left => [Orientation::Top, Orientation::Bottom],
        }
    }

    pub const fn side(self) -> Sides {
        match self {
            Orientation::Top => Sides::TOP,
            Orientation::Right => Sides::RIGHT,
            Orientation::Bottom => Sides::BOTTOM,
            Orientation::Left => Sides::LEFT,
        }
    }
}

bitflags! {
    /// A set of cell sides
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        const TOP = 0x01;
        const RIGHT = 0x02;
        const BOTTOM = 0x04;
        const LEFT = 0x08;
    }
}

impl Sides {
    pub fn has(self, orientation: Orientation) -> bool {
        self.contains(orientation.side())
    }

    pub fn set_side(&mut self, orientation: Orientation, value: bool) {
        self.set(orientation.side(), value);
    }

    /// Orientations present in this set, in `Orientation::ALL` order
    pub fn orientations(self) -> impl Iterator<Item = Orientation> {
        Orientation::ALL.into_iter().filter(move |o| self.has(*o))
    }
}

// Serialized as the raw bit pattern
impl Serialize for Sides {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sides {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Sides::from_bits_truncate(bits))
    }
}

/// Diagonal corner of a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Corner {
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopRight,
        Corner::TopLeft,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// The vertical and horizontal side forming this corner
    pub const fn sides(self) -> (Orientation, Orientation) {
        match self {
            Corner::TopRight => (Orientation::Top, Orientation::Right),
            Corner::TopLeft => (Orientation::Top, Orientation::Left),
            Corner::BottomRight => (Orientation::Bottom, Orientation::Right),
            Corner::BottomLeft => (Orientation::Bottom, Orientation::Left),
        }
    }

    /// Diagonal step towards this corner
    pub const fn step(self) -> Point {
        let (v, h) = self.sides();
        Point::new(h.step().x, v.step().y)
    }
}

/// Rotation applied to a placed element, in quarter turns
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Half turn
    pub const fn flipped(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg180,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg0,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_modifier_undoes_step() {
        for o in Orientation::iter() {
            assert_eq!(o.step() + o.modifier(), Point::ORIGIN);
            assert_eq!(o.opposite().opposite(), o);
            assert_eq!(o.opposite().step(), -o.step());
        }
    }

    #[test]
    fn test_perpendicular() {
        for o in Orientation::ALL {
            for p in o.perpendicular() {
                assert_ne!(p, o);
                assert_ne!(p, o.opposite());
            }
        }
    }

    #[test]
    fn test_corner_steps() {
        assert_eq!(Corner::TopRight.step(), Point::new(1, 1));
        assert_eq!(Corner::TopLeft.step(), Point::new(-1, 1));
        assert_eq!(Corner::BottomRight.step(), Point::new(1, -1));
        assert_eq!(Corner::BottomLeft.step(), Point::new(-1, -1));
    }

    #[test]
    fn test_sides_roundtrip() {
        let mut sides = Sides::empty();
        sides.set_side(Orientation::Left, true);
        sides.set_side(Orientation::Top, true);
        assert_eq!(
            sides.orientations().collect::<Vec<_>>(),
            vec![Orientation::Top, Orientation::Left]
        );
        let json = serde_json::to_string(&sides).unwrap();
        let back: Sides = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sides);
    }

    #[test]
    fn test_rotation_flip() {
        for r in Rotation::iter() {
            assert_ne!(r.flipped(), r);
            assert_eq!(r.flipped().flipped(), r);
        }
        assert_eq!(Rotation::Deg90.flipped(), Rotation::Deg270);
    }
}
