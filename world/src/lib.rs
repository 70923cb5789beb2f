#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the labyrinth walk.
//!
//! [`World`] owns the maze grid, its world-space cell records, the collectible
//! objects, the progress strip and the agent. Adapters and systems mutate it
//! exclusively through [`apply`] and read it through the [`query`] module.

mod collision;
mod objects;
mod progress;
mod spatial;

use std::f32::consts::TAU;

use labyrinth_core::{
    CellCoord, Command, Displacement, Event, MazeConfig, MazeGrid, Rgba, WorldPoint,
    WELCOME_BANNER,
};
use labyrinth_system_generation::{GenerationError, MazeGenerator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use collision::SlideOutcome;
pub use objects::{place_objects, PlacementError, WorldObject, PICKUP_RADIUS};
pub use progress::{ProgressEncoding, ProgressError, PROGRESS_MARKER};
pub use spatial::{build_walls, SpatialError, SpatialGrid, WallCell};

/// Floor colour marking the cell the agent stands in.
pub const POSITION_MARKER: Rgba = Rgba::from_rgb(255, 0, 0);

/// Floor colour restored once the agent leaves a cell.
pub const FLOOR_CLEARED: Rgba = Rgba::from_packed(0);

/// Counters bumped whenever a visual buffer changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Revisions {
    /// Revision of the floor map texels.
    pub floor: u64,
    /// Revision of the progress strip texels.
    pub progress: u64,
}

#[derive(Clone, Copy, Debug)]
struct Agent {
    position: WorldPoint,
    heading: f32,
}

/// Represents the authoritative labyrinth world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: MazeGrid,
    walls: SpatialGrid,
    objects: Vec<WorldObject>,
    progress: ProgressEncoding,
    agent: Agent,
    marked_cell: Option<CellCoord>,
    revisions: Revisions,
    tick_index: u64,
}

impl World {
    /// Generates a world from the configuration using a seeded random source.
    pub fn new(config: &MazeConfig, seed: u64) -> Result<Self, WorldError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(config, &mut rng)
    }

    /// Generates a world from the configuration using the provided random source.
    pub fn generate<R>(config: &MazeConfig, rng: &mut R) -> Result<Self, WorldError>
    where
        R: Rng + ?Sized,
    {
        let generator = MazeGenerator::with_braid(config.braid)?;
        let grid = generator.generate(config.side, config.side, rng)?;
        Self::from_grid(grid, config.plane_scale, config.objects() as usize, rng)
    }

    /// Builds a world around an existing square grid.
    ///
    /// The agent spawns at the centre of the room closest to the middle of the
    /// grid, and `object_count` objects are scattered over distinct rooms.
    pub fn from_grid<R>(
        grid: MazeGrid,
        plane_scale: f32,
        object_count: usize,
        rng: &mut R,
    ) -> Result<Self, WorldError>
    where
        R: Rng + ?Sized,
    {
        if grid.columns() != grid.rows() {
            return Err(WorldError::NonSquareGrid {
                columns: grid.columns(),
                rows: grid.rows(),
            });
        }
        let side = grid.columns();
        if object_count > side as usize {
            return Err(WorldError::ObjectCountExceedsSide {
                count: object_count,
                side,
            });
        }

        let mut walls = build_walls(&grid, plane_scale)?;
        let spawn = walls.central_room().ok_or(WorldError::NoRoomCells)?;
        let objects = place_objects(object_count, &mut walls, rng)?;
        let position = walls
            .cell(spawn)
            .map(WallCell::center)
            .ok_or(WorldError::NoRoomCells)?;

        log::info!(
            "built {side}x{side} labyrinth: {} rooms, {} objects, spawn at ({}, {})",
            walls.room_count(),
            objects.len(),
            spawn.column(),
            spawn.row()
        );

        let mut world = Self {
            banner: WELCOME_BANNER,
            grid,
            walls,
            objects,
            progress: ProgressEncoding::with_capacity(side as usize),
            agent: Agent {
                position,
                heading: 0.0,
            },
            marked_cell: None,
            revisions: Revisions::default(),
            tick_index: 0,
        };
        let _ = world.refresh_marker();
        Ok(world)
    }

    /// Collects the object near `at`, if one lies within [`PICKUP_RADIUS`].
    ///
    /// Succeeds at most once per object. Returns an error when `at` lies
    /// outside the grid.
    pub fn try_pickup(&mut self, at: WorldPoint) -> Result<bool, WorldError> {
        Ok(self.collect_at(at)?.is_some())
    }

    fn collect_at(&mut self, at: WorldPoint) -> Result<Option<Event>, WorldError> {
        let cell = self
            .walls
            .locate(at)
            .ok_or(WorldError::PositionOutOfRange { x: at.x, z: at.z })?;
        let Some(object) = objects::nearby(&self.walls, &self.objects, cell, at) else {
            return Ok(None);
        };

        let _ = self.progress.record_pickup(PROGRESS_MARKER)?;
        if let Some(index) = self.walls.index(cell) {
            self.walls.set_occupant(index, None);
        }
        self.revisions.progress += 1;

        let collected = self.collected();
        log::debug!(
            "collected object {} in cell ({}, {}), {collected}/{}",
            object.get(),
            cell.column(),
            cell.row(),
            self.objects.len()
        );
        Ok(Some(Event::ObjectCollected {
            object,
            cell,
            collected,
        }))
    }

    fn collected(&self) -> u32 {
        self.progress.filled() as u32
    }

    fn walk(&mut self, step: Displacement, probe: Displacement, out_events: &mut Vec<Event>) {
        match self.collect_at(self.agent.position) {
            Ok(Some(event)) => {
                out_events.push(event);
                if self.progress.filled() == self.objects.len() {
                    out_events.push(Event::AllObjectsCollected {
                        total: self.collected(),
                    });
                }
            }
            Ok(None) => {}
            Err(error) => log::warn!("pickup skipped: {error}"),
        }

        let from = self.agent.position;
        let outcome = self.walls.resolve_slide(from, step, probe);
        if outcome.probe_blocked {
            out_events.push(Event::MotionBlocked {
                along_x: outcome.along_x,
                along_z: outcome.along_z,
            });
        }
        if !outcome.step.is_zero() {
            let to = from.offset(outcome.step);
            if self.walls.locate(to).is_none() {
                out_events.push(Event::MotionBlocked {
                    along_x: true,
                    along_z: true,
                });
                return;
            }
            self.agent.position = to;
            out_events.push(Event::AgentMoved { from, to });
        }

        if let Some(event) = self.refresh_marker() {
            out_events.push(event);
        }
    }

    /// Moves the floor marker to the agent's cell when it changed.
    fn refresh_marker(&mut self) -> Option<Event> {
        let current = self.walls.locate(self.agent.position);
        if current == self.marked_cell {
            return None;
        }

        let previous = self.marked_cell;
        if let Some(cell) = previous {
            self.paint_floor(cell, FLOOR_CLEARED);
        }
        self.marked_cell = current;

        let cell = current?;
        self.paint_floor(cell, POSITION_MARKER);
        Some(Event::CellEntered {
            from: previous,
            to: cell,
        })
    }

    fn paint_floor(&mut self, cell: CellCoord, color: Rgba) {
        match self.grid.paint(cell, color) {
            Ok(true) => self.revisions.floor += 1,
            Ok(false) => {}
            Err(error) => log::warn!("floor marker not painted: {error}"),
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::Turn { radians } => {
            if !radians.is_finite() {
                log::warn!("ignored non-finite turn of {radians} radians");
                return;
            }
            world.agent.heading = (world.agent.heading + radians).rem_euclid(TAU);
            out_events.push(Event::AgentTurned {
                heading: world.agent.heading,
            });
        }
        Command::Walk { step, probe } => {
            let finite = [step.dx, step.dz, probe.dx, probe.dz]
                .iter()
                .all(|component| component.is_finite());
            if !finite {
                log::warn!("ignored non-finite walk of {step:?} probing {probe:?}");
                return;
            }
            world.walk(step, probe, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use labyrinth_core::{AgentSnapshot, MazeGrid};

    use super::{ProgressEncoding, Revisions, SpatialGrid, World, WorldObject};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the maze grid, whose texels double as the floor map.
    #[must_use]
    pub fn maze_grid(world: &World) -> &MazeGrid {
        &world.grid
    }

    /// Provides the world-space cell records.
    #[must_use]
    pub fn walls(world: &World) -> &SpatialGrid {
        &world.walls
    }

    /// Every object placed at construction, collected or not.
    #[must_use]
    pub fn objects(world: &World) -> &[WorldObject] {
        &world.objects
    }

    /// Objects still waiting to be collected.
    pub fn remaining_objects(world: &World) -> impl Iterator<Item = &WorldObject> + '_ {
        world.objects.iter().filter(|object| {
            world
                .walls
                .cell(object.cell())
                .and_then(|cell| cell.occupant())
                == Some(object.id())
        })
    }

    /// Captures the agent's position and heading.
    #[must_use]
    pub fn agent(world: &World) -> AgentSnapshot {
        AgentSnapshot {
            position: world.agent.position,
            heading: world.agent.heading,
            cell: world.walls.locate(world.agent.position),
        }
    }

    /// Provides the progress strip.
    #[must_use]
    pub fn progress(world: &World) -> &ProgressEncoding {
        &world.progress
    }

    /// Packed progress texels, including the unfilled tail.
    #[must_use]
    pub fn progress_buffer(world: &World) -> &[u32] {
        world.progress.texels()
    }

    /// Number of objects collected so far.
    #[must_use]
    pub fn collected(world: &World) -> u32 {
        world.collected()
    }

    /// Number of objects placed at construction.
    #[must_use]
    pub fn total_objects(world: &World) -> usize {
        world.objects.len()
    }

    /// Half of the world-space extent covered by the grid.
    #[must_use]
    pub fn plane_scale(world: &World) -> f32 {
        world.walls.plane_scale()
    }

    /// Number of cells along each side of the grid.
    #[must_use]
    pub fn side(world: &World) -> u32 {
        world.grid.columns()
    }

    /// Revision counters of the visual buffers.
    #[must_use]
    pub fn revisions(world: &World) -> Revisions {
        world.revisions
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

/// Errors raised while building or querying the world.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WorldError {
    /// Maze generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The spatial layout could not be built.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
    /// Objects could not be placed.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The progress strip rejected a pickup.
    #[error(transparent)]
    Progress(#[from] ProgressError),
    /// The grid is not square.
    #[error("maze grid must be square (received {columns}x{rows})")]
    NonSquareGrid {
        /// Number of columns.
        columns: u32,
        /// Number of rows.
        rows: u32,
    },
    /// More objects were requested than the progress strip can show.
    #[error("{count} objects exceed the grid side of {side}")]
    ObjectCountExceedsSide {
        /// Requested object count.
        count: usize,
        /// Grid side.
        side: u32,
    },
    /// The grid contains no room for the agent.
    #[error("maze grid contains no room cells")]
    NoRoomCells,
    /// A position lies outside the grid.
    #[error("position ({x}, {z}) lies outside the maze")]
    PositionOutOfRange {
        /// Requested x coordinate.
        x: f32,
        /// Requested z coordinate.
        z: f32,
    },
}

