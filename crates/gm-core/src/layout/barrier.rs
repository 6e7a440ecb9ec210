//! Inner barriers: straight walls with a passage
//!
//! A barrier starts at a border cell and runs across the room along one
//! axis, through available cells only, with available cells on both flanking
//! rows. One contiguous stretch of the run is left open as the passage; the
//! blocks touching the passage are closed end caps.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, trace};

use crate::config::{BarrierConfig, Span};
use crate::rng::MazeRng;

use super::cell::{PlacedElement, RoomId};
use super::geometry::{Orientation, Point, Rotation};
use super::room::Room;
use super::topology::border_cells;

/// Direction a barrier runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum BarrierAxis {
    Horizontal,
    Vertical,
}

impl BarrierAxis {
    pub const ALL: [BarrierAxis; 2] = [BarrierAxis::Horizontal, BarrierAxis::Vertical];

    /// Border side the run starts from; the run heads away from it
    pub const fn start_side(self) -> Orientation {
        match self {
            BarrierAxis::Horizontal => Orientation::Left,
            BarrierAxis::Vertical => Orientation::Bottom,
        }
    }

    /// Step along the run
    pub const fn step(self) -> Point {
        self.start_side().modifier()
    }

    /// Step to the flanking row on one side
    pub const fn flank(self) -> Point {
        match self {
            BarrierAxis::Horizontal => Point::new(0, 1),
            BarrierAxis::Vertical => Point::new(1, 0),
        }
    }

    /// Rotation of a plain block; closed caps use it or its half turn
    pub const fn rotation(self) -> Rotation {
        match self {
            BarrierAxis::Horizontal => Rotation::Deg0,
            BarrierAxis::Vertical => Rotation::Deg90,
        }
    }

    /// Coordinate that must stay off the frame edge for both flanks to exist
    fn cross_coordinate(self, p: Point) -> i32 {
        match self {
            BarrierAxis::Horizontal => p.y,
            BarrierAxis::Vertical => p.x,
        }
    }
}

/// A barrier placed in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barrier {
    pub room: RoomId,
    pub axis: BarrierAxis,
    /// Frame position of the run's first cell
    pub start: Point,
    pub length: usize,
    /// Run indices left open, ascending and contiguous
    pub passage: Vec<usize>,
    /// Frame positions and elements of every block
    pub blocks: Vec<(Point, PlacedElement)>,
}

impl Barrier {
    /// Frame position of run index `i`
    pub fn position(&self, i: usize) -> Point {
        self.start + self.axis.step() * i as i32
    }
}

/// Length of the run of available cells starting at `start`
///
/// Stops at the frame edge or the first missing, gateway or occupied-by-
/// element cell.
pub fn run_length(room: &Room, start: Point, axis: BarrierAxis) -> usize {
    let mut length = 0;
    let mut p = start;
    while let Some(cell) = room.get(p) {
        if cell.presents_gateway() || !cell.available() {
            break;
        }
        length += 1;
        p = p + axis.step();
    }
    length
}

/// Check that both flanking rows are available along the whole run
pub fn flanks_available(room: &Room, start: Point, axis: BarrierAxis, length: usize) -> bool {
    (0..length as i32).all(|i| {
        let p = start + axis.step() * i;
        [p + axis.flank(), p - axis.flank()]
            .into_iter()
            .all(|f| room.get(f).is_some_and(|c| c.available()))
    })
}

/// Grow a passage around `seed` to a width drawn from `width`
///
/// The width is capped at `length - 1` so at least one block remains, and
/// the passage never leaves `[0, length)`. Returns ascending indices.
pub fn passage_indices(length: usize, seed: usize, width: Span, rng: &mut MazeRng) -> Vec<usize> {
    let mut passage = BTreeSet::new();
    if length == 0 {
        return Vec::new();
    }
    let seed = seed.min(length - 1);
    passage.insert(seed);

    let target = (rng.span(width) as usize).min(length.saturating_sub(1)).max(1);
    let (mut low, mut high) = (seed, seed);
    while passage.len() < target {
        let can_lower = low > 0;
        let can_raise = high + 1 < length;
        let lower = match (can_lower, can_raise) {
            (true, true) => rng.one_in(2),
            (true, false) => true,
            (false, true) => false,
            (false, false) => break,
        };
        if lower {
            low -= 1;
            passage.insert(low);
        } else {
            high += 1;
            passage.insert(high);
        }
    }
    passage.into_iter().collect()
}

/// Element for run index `i`, or None if it belongs to the passage
fn block_element(
    i: usize,
    passage: &[usize],
    axis: BarrierAxis,
    config: &BarrierConfig,
) -> Option<PlacedElement> {
    let (first, last) = (*passage.first()?, *passage.last()?);
    if (first..=last).contains(&i) {
        return None;
    }

    let (code, rotation) = if i + 1 == first {
        (config.codes.closed_cap, axis.rotation())
    } else if i == last + 1 {
        (config.codes.closed_cap, axis.rotation().flipped())
    } else {
        (config.codes.wall, axis.rotation())
    };
    Some(PlacedElement { code, rotation })
}

/// Try to place one barrier along `axis`
///
/// Border cells are tried in random order; the first one that yields a valid
/// run gets the barrier.
pub fn place_along(
    room: &mut Room,
    axis: BarrierAxis,
    config: &BarrierConfig,
    rng: &mut MazeRng,
) -> Option<Barrier> {
    let size = room.frame_size();
    let mut starts = border_cells(room, axis.start_side());
    rng.shuffle(&mut starts);

    for start in starts {
        let cross = axis.cross_coordinate(start);
        if cross == 0 || cross == size - 1 {
            continue;
        }

        let length = run_length(room, start, axis);
        if length < config.min_length as usize {
            continue;
        }
        if !flanks_available(room, start, axis, length) {
            trace!(?start, %axis, length, "flanks blocked");
            continue;
        }

        let seed = rng.below(length as u32) as usize;
        let passage = passage_indices(length, seed, config.passage_width, rng);

        let mut barrier = Barrier {
            room: room.id,
            axis,
            start,
            length,
            passage,
            blocks: Vec::with_capacity(length),
        };
        for i in 0..length {
            let Some(element) = block_element(i, &barrier.passage, axis, config) else {
                continue;
            };
            let p = barrier.position(i);
            if let Some(cell) = room.get_mut(p) {
                cell.place_element(element.code, element.rotation);
                barrier.blocks.push((p, element));
            }
        }

        debug!(
            room = room.id.0,
            %axis,
            ?start,
            length,
            passage = barrier.passage.len(),
            "placed barrier"
        );
        return Some(barrier);
    }
    None
}

/// One placement attempt: both axes in random order, first success wins
pub fn place_barrier(room: &mut Room, config: &BarrierConfig, rng: &mut MazeRng) -> Option<Barrier> {
    let mut axes = BarrierAxis::ALL;
    rng.shuffle(&mut axes);
    axes.into_iter()
        .find_map(|axis| place_along(room, axis, config, rng))
}

/// Roll `trials` dice at `chance` percent and attempt one barrier per success
///
/// Returns the barriers placed and the number of attempts that found no spot.
pub fn place_barriers(
    room: &mut Room,
    config: &BarrierConfig,
    rng: &mut MazeRng,
) -> (Vec<Barrier>, usize) {
    let successes = (0..config.trials)
        .filter(|_| rng.percent(config.chance))
        .count();

    let mut barriers = Vec::new();
    let mut failed = 0;
    for _ in 0..successes {
        match place_barrier(room, config, rng) {
            Some(barrier) => barriers.push(barrier),
            None => failed += 1,
        }
    }
    (barriers, failed)
}
