//! Room frames
//!
//! A room is a square frame of optional cells plus the wall registry built
//! around them. `grid[x][y]` holds the cell whose frame position is `(x, y)`.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellIds, RoomId};
use super::geometry::{Orientation, Point};
use super::rect::Rect;
use super::wall::WallRegistry;

/// Result of stamping one rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampOutcome {
    /// Positions that were empty before the stamp
    pub created: usize,
    /// Occupied positions that received a fresh cell
    pub replaced: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    frame_size: i32,
    /// Screen position of frame cell (0, 0)
    origin: Point,
    grid: Vec<Vec<Option<Cell>>>,
    pub walls: WallRegistry,
}

impl Room {
    /// Create an empty room with a `frame_size` x `frame_size` frame
    pub fn new(id: RoomId, frame_size: u32) -> Self {
        let size = frame_size as usize;
        Self {
            id,
            frame_size: frame_size as i32,
            origin: Point::ORIGIN,
            grid: vec![vec![None; size]; size],
            walls: WallRegistry::default(),
        }
    }

    pub fn frame_size(&self) -> i32 {
        self.frame_size
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Check if a frame position lies inside the frame
    pub fn in_frame(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.frame_size && p.y < self.frame_size
    }

    pub fn get(&self, p: Point) -> Option<&Cell> {
        if !self.in_frame(p) {
            return None;
        }
        self.grid[p.x as usize][p.y as usize].as_ref()
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut Cell> {
        if !self.in_frame(p) {
            return None;
        }
        self.grid[p.x as usize][p.y as usize].as_mut()
    }

    pub fn is_occupied(&self, p: Point) -> bool {
        self.get(p).is_some()
    }

    /// Occupied neighbour of `p` through `side`
    pub fn neighbor(&self, p: Point, side: Orientation) -> Option<&Cell> {
        self.get(p + side.step())
    }

    /// All cells, column by column
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flat_map(|col| col.iter().flatten())
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.grid.iter_mut().flat_map(|col| col.iter_mut().flatten())
    }

    /// Frame positions of all cells, column by column
    pub fn occupied_points(&self) -> Vec<Point> {
        self.cells().map(|c| c.frame).collect()
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells().next().is_none()
    }

    /// Fill every in-frame position of `rect` with a fresh cell
    ///
    /// The new stamp wins: an occupied position is replaced, dropping any
    /// gateway flags or element it carried. Parts of `rect` outside the frame
    /// are ignored.
    pub fn stamp(&mut self, rect: &Rect, ids: &mut CellIds) -> StampOutcome {
        let mut outcome = StampOutcome::default();
        let Some(clipped) = rect.intersection(&Rect::frame(self.frame_size)) else {
            return outcome;
        };

        for p in clipped.points() {
            let mut cell = Cell::new(ids.next_id(), self.id, p);
            cell.screen = self.origin + p;
            let slot = &mut self.grid[p.x as usize][p.y as usize];
            if slot.is_some() {
                outcome.replaced += 1;
            } else {
                outcome.created += 1;
            }
            *slot = Some(cell);
        }
        outcome
    }

    /// Move the room to a screen origin, updating every cell's screen position
    pub fn place(&mut self, origin: Point) {
        self.origin = origin;
        for cell in self.cells_mut() {
            cell.screen = origin + cell.frame;
        }
    }

    /// Screen position of any frame position, occupied or not
    pub fn to_screen(&self, p: Point) -> Point {
        self.origin + p
    }

    /// Flag the cell at `p` as leading into a gateway through `side`
    ///
    /// Returns false if `p` is not occupied.
    pub fn mark_gateway(&mut self, p: Point, side: Orientation) -> bool {
        match self.get_mut(p) {
            Some(cell) => {
                cell.next_to_gateway.set_side(side, true);
                true
            }
            None => false,
        }
    }

    /// Number of 4-connected groups of occupied cells
    pub fn regions(&self) -> usize {
        let size = self.frame_size as usize;
        let mut seen = vec![vec![false; size]; size];
        let mut regions = 0;

        for start in self.occupied_points() {
            if seen[start.x as usize][start.y as usize] {
                continue;
            }
            regions += 1;
            seen[start.x as usize][start.y as usize] = true;
            let mut stack = vec![start];
            while let Some(p) = stack.pop() {
                for side in Orientation::ALL {
                    let n = p + side.step();
                    if self.is_occupied(n) && !seen[n.x as usize][n.y as usize] {
                        seen[n.x as usize][n.y as usize] = true;
                        stack.push(n);
                    }
                }
            }
        }
        regions
    }
}
