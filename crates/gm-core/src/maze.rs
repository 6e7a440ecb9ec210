//! Maze generation pipeline
//!
//! `generate` runs the four stages in order over one shared `MazeRng`:
//! composition, gateway planning, wall classification and barrier placement.
//! Walls are built after the gateway flags are final so no wall covers a
//! gateway mouth.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MazeConfig;
use crate::errors::GenerationError;
use crate::layout::{
    classify_walls, compose_room, place_barriers, plan_gateways, Barrier, CellIds, Gateway,
    LinkFailure, Orientation, PlacedElement, Point, Room, RoomId, WallVariant,
};
use crate::rng::MazeRng;

/// What a spawn collaborator is asked to create at a screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnTag {
    Floor,
    Element(PlacedElement),
    Wall(WallVariant),
    Gateway(Orientation),
}

/// Receiver of spawn requests, e.g. a renderer or a scene builder
pub trait Spawner {
    fn spawn(&mut self, tag: SpawnTag, at: Point);
}

impl Spawner for Vec<(SpawnTag, Point)> {
    fn spawn(&mut self, tag: SpawnTag, at: Point) {
        self.push((tag, at));
    }
}

/// Outcome counters of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    /// Links that found no compatible orientation
    pub link_failures: Vec<LinkFailure>,
    pub barriers_placed: usize,
    /// Successful dice rolls that found nowhere to put a barrier
    pub barrier_attempts_failed: usize,
    /// Cells overwritten by later stamps during composition
    pub replaced_cells: usize,
}

/// A generated set of linked rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    pub seed: u64,
    pub rooms: Vec<Room>,
    pub gateways: Vec<Gateway>,
    pub barriers: Vec<Barrier>,
}

impl Maze {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Gateways opening from the given room
    pub fn gateways_from(&self, id: RoomId) -> impl Iterator<Item = &Gateway> {
        self.gateways.iter().filter(move |g| g.from_room == id)
    }

    /// Total occupied cells across all rooms
    pub fn cell_count(&self) -> usize {
        self.rooms.iter().map(Room::cell_count).sum()
    }

    /// Hand every floor cell, element, wall and gateway mouth to `spawner`
    ///
    /// Positions are screen coordinates. Rooms are emitted in order; within a
    /// room, floors and elements come before walls.
    pub fn spawn_into<S: Spawner + ?Sized>(&self, spawner: &mut S) {
        for room in &self.rooms {
            for cell in room.cells() {
                spawner.spawn(SpawnTag::Floor, cell.screen);
                if let Some(element) = cell.element {
                    spawner.spawn(SpawnTag::Element(element), cell.screen);
                }
            }
            for segment in room.walls.iter() {
                spawner.spawn(SpawnTag::Wall(segment.variant()), segment.screen);
            }
        }
        for gateway in &self.gateways {
            spawner.spawn(SpawnTag::Gateway(gateway.orientation), gateway.from_screen);
        }
    }
}

/// Screen origin of the room at pipeline index `index`
pub fn room_origin(config: &MazeConfig, index: u32) -> Point {
    let stride = (config.frame_size + config.distancing) as i32;
    Point::new(index as i32 * stride, 0)
}

/// Generate a maze from `config`, drawing every random choice from `rng`
pub fn generate(
    config: &MazeConfig,
    rng: &mut MazeRng,
) -> Result<(Maze, GenerationReport), GenerationError> {
    config.validate()?;

    let mut report = GenerationReport {
        seed: rng.seed(),
        ..GenerationReport::default()
    };
    let mut ids = CellIds::new();

    let mut rooms = Vec::with_capacity(config.room_count as usize);
    for index in 0..config.room_count {
        let mut room = Room::new(RoomId(index + 1), config.frame_size);
        room.place(room_origin(config, index));
        let outcome = compose_room(&mut room, config, &mut ids, rng);
        report.replaced_cells += outcome.replaced;
        rooms.push(room);
    }

    let plan = plan_gateways(&mut rooms, &config.exit_destination, rng);
    report.link_failures = plan.failures;

    for room in &mut rooms {
        classify_walls(room);
    }

    let mut barriers = Vec::new();
    for room in &mut rooms {
        let (placed, failed) = place_barriers(room, &config.barrier, rng);
        if failed > 0 {
            debug!(room = room.id.0, failed, "barrier attempts without a spot");
        }
        report.barriers_placed += placed.len();
        report.barrier_attempts_failed += failed;
        barriers.extend(placed);
    }

    let maze = Maze {
        seed: rng.seed(),
        rooms,
        gateways: plan.gateways,
        barriers,
    };
    info!(
        seed = maze.seed,
        rooms = maze.rooms.len(),
        cells = maze.cell_count(),
        gateways = maze.gateways.len(),
        barriers = maze.barriers.len(),
        link_failures = report.link_failures.len(),
        "generated maze"
    );
    Ok((maze, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Span;
    use crate::errors::ConfigError;

    fn small_config() -> MazeConfig {
        MazeConfig {
            frame_size: 12,
            room_count: 3,
            units_per_room: Span::new(2, 3),
            unit_width: Span::new(3, 5),
            unit_height: Span::new(3, 5),
            ..MazeConfig::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MazeConfig {
            room_count: 0,
            ..MazeConfig::default()
        };
        let mut rng = MazeRng::new(1);
        let err = generate(&config, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InvalidConfig(ConfigError::NoRooms)
        ));
    }

    #[test]
    fn test_rooms_are_numbered_and_spaced() {
        let config = small_config();
        let mut rng = MazeRng::new(42);
        let (maze, report) = generate(&config, &mut rng).unwrap();

        assert_eq!(report.seed, 42);
        assert_eq!(maze.rooms.len(), 3);
        for (i, room) in maze.rooms.iter().enumerate() {
            assert_eq!(room.id, RoomId(i as u32 + 1));
            assert_eq!(room.origin(), Point::new(i as i32 * 22, 0));
            for cell in room.cells() {
                assert_eq!(cell.screen, room.origin() + cell.frame);
                assert_eq!(cell.room, room.id);
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let config = small_config();
        let (a, ra) = generate(&config, &mut MazeRng::new(7)).unwrap();
        let (b, rb) = generate(&config, &mut MazeRng::new(7)).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_report_counts_match_maze() {
        let config = small_config();
        let (maze, report) = generate(&config, &mut MazeRng::new(3)).unwrap();
        assert_eq!(report.barriers_placed, maze.barriers.len());

        let failed_links = report.link_failures.iter().filter(|f| f.to_room.is_some()).count();
        let failed_exits = report.link_failures.len() - failed_links;
        let links = config.room_count as usize - 1;
        assert_eq!(
            maze.gateways.len(),
            2 * (links - failed_links) + 1 - failed_exits
        );
    }

    #[test]
    fn test_spawn_into_emits_everything() {
        let config = small_config();
        let (maze, _) = generate(&config, &mut MazeRng::new(5)).unwrap();
        let mut spawned: Vec<(SpawnTag, Point)> = Vec::new();
        maze.spawn_into(&mut spawned);

        let floors = spawned.iter().filter(|(t, _)| *t == SpawnTag::Floor).count();
        let elements = spawned
            .iter()
            .filter(|(t, _)| matches!(t, SpawnTag::Element(_)))
            .count();
        let walls = spawned
            .iter()
            .filter(|(t, _)| matches!(t, SpawnTag::Wall(_)))
            .count();
        let gates = spawned
            .iter()
            .filter(|(t, _)| matches!(t, SpawnTag::Gateway(_)))
            .count();

        assert_eq!(floors, maze.cell_count());
        let blocks: usize = maze.barriers.iter().map(|b| b.blocks.len()).sum();
        assert_eq!(elements, blocks);
        let segments: usize = maze.rooms.iter().map(|r| r.walls.len()).sum();
        assert_eq!(walls, segments);
        assert_eq!(gates, maze.gateways.len());
    }

    #[test]
    fn test_gateway_mouths_stay_open() {
        let config = small_config();
        for seed in 0..20 {
            let (maze, _) = generate(&config, &mut MazeRng::new(seed)).unwrap();
            for gateway in &maze.gateways {
                let room = maze.room(gateway.from_room).unwrap();
                let cell = room.get(gateway.frame).unwrap();
                assert!(cell.next_to_gateway_on(gateway.orientation));
                let mouth = gateway.frame + gateway.orientation.step();
                assert!(!room.is_occupied(mouth));
                assert!(!room.walls.contains(mouth), "seed {seed}: wall on mouth {mouth:?}");
                assert_eq!(gateway.from_screen, cell.screen + gateway.orientation.step());
            }
        }
    }
}
