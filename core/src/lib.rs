#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the labyrinth walk simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. The shared [`MazeGrid`] lives here as well so
//! the generator, the world and the rendering contracts agree on its texel
//! layout.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the labyrinth.";

/// Packed texel value that marks a wall cell inside a [`MazeGrid`].
pub const WALL_TEXEL: u32 = u32::MAX;

/// Floor colour assigned to freshly carved open cells.
pub const OPEN_FLOOR: Rgba = Rgba::from_packed(0);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Rotates the agent around the vertical axis.
    Turn {
        /// Signed rotation in radians; positive values turn left.
        radians: f32,
    },
    /// Requests that the agent walk, sliding along walls where needed.
    Walk {
        /// Displacement applied to the agent when the path is clear.
        step: Displacement,
        /// Look-ahead displacement tested against walls before stepping.
        probe: Displacement,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports the agent's heading after a turn.
    AgentTurned {
        /// Heading in radians, wrapped into `[0, 2π)`.
        heading: f32,
    },
    /// Confirms that the agent changed position.
    AgentMoved {
        /// Position occupied before the step.
        from: WorldPoint,
        /// Position occupied after the step.
        to: WorldPoint,
    },
    /// Reports that the look-ahead probe of a walk hit a wall.
    MotionBlocked {
        /// Whether the x component of the step was suppressed.
        along_x: bool,
        /// Whether the z component of the step was suppressed.
        along_z: bool,
    },
    /// Announces that the agent crossed into another grid cell.
    CellEntered {
        /// Cell occupied before the move, if it lay inside the grid.
        from: Option<CellCoord>,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Confirms that the agent picked up an object.
    ObjectCollected {
        /// Identifier of the collected object.
        object: ObjectId,
        /// Cell that hosted the object.
        cell: CellCoord,
        /// Number of objects collected so far, including this one.
        collected: u32,
    },
    /// Announces that no collectible objects remain in the maze.
    AllObjectsCollected {
        /// Number of objects that were placed and collected.
        total: u32,
    },
}

/// Packed RGBA colour laid out the way texture uploads expect it.
///
/// Red occupies the least significant byte, so the little-endian bytes of the
/// packed value read `[red, green, blue, alpha]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(u32);

impl Rgba {
    /// Creates a colour from byte RGBA components.
    #[must_use]
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self((alpha as u32) << 24 | (blue as u32) << 16 | (green as u32) << 8 | red as u32)
    }

    /// Creates an opaque colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba(red, green, blue, u8::MAX)
    }

    /// Wraps an already packed texel value.
    #[must_use]
    pub const fn from_packed(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the packed texel value.
    #[must_use]
    pub const fn packed(&self) -> u32 {
        self.0
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        (self.0 >> 8 & 0xff) as u8
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        (self.0 >> 16 & 0xff) as u8
    }

    /// Alpha component of the colour.
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Bytes of the colour in upload order.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

/// Location of a single grid cell expressed as column (x) and row (z).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Classification of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Blocked cell rendered as a wall block.
    Wall,
    /// Open, walkable cell.
    Room,
}

/// Tagged view of a single [`MazeGrid`] cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridCell {
    /// The cell is a wall.
    Wall,
    /// The cell is open and painted with the provided floor colour.
    Open(Rgba),
}

impl GridCell {
    /// Classifies the cell as a wall or a room.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        match self {
            Self::Wall => CellKind::Wall,
            Self::Open(_) => CellKind::Room,
        }
    }

    const fn from_texel(texel: u32) -> Self {
        if texel == WALL_TEXEL {
            Self::Wall
        } else {
            Self::Open(Rgba::from_packed(texel))
        }
    }
}

/// Unique identifier assigned to a collectible object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position on the ground plane expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate.
    pub x: f32,
    /// Depth coordinate; grid row zero lies at the positive edge.
    pub z: f32,
}

impl WorldPoint {
    /// Creates a new world-space point.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Returns the point translated by the provided displacement.
    #[must_use]
    pub fn offset(self, delta: Displacement) -> Self {
        Self::new(self.x + delta.dx, self.z + delta.dz)
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        (other.x - self.x).hypot(other.z - self.z)
    }
}

/// Displacement on the ground plane expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Change along the x axis.
    pub dx: f32,
    /// Change along the z axis.
    pub dz: f32,
}

impl Displacement {
    /// Displacement that leaves a point unchanged.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new displacement.
    #[must_use]
    pub const fn new(dx: f32, dz: f32) -> Self {
        Self { dx, dz }
    }

    /// Keeps only the x component.
    #[must_use]
    pub const fn x_only(self) -> Self {
        Self::new(self.dx, 0.0)
    }

    /// Keeps only the z component.
    #[must_use]
    pub const fn z_only(self) -> Self {
        Self::new(0.0, self.dz)
    }

    /// Reports whether both components are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dz == 0.0
    }
}

/// Immutable representation of the agent used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
    /// Position of the agent in world space.
    pub position: WorldPoint,
    /// Heading in radians; zero faces the negative z axis.
    pub heading: f32,
    /// Grid cell containing the agent, if the position lies inside the grid.
    pub cell: Option<CellCoord>,
}

/// Parameters used to build a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Number of cells along each side of the square grid.
    pub side: u32,
    /// Half the world-space extent covered by the grid.
    pub plane_scale: f32,
    /// Number of collectible objects; defaults to the grid side.
    pub object_count: Option<u32>,
    /// Probability of opening an extra passage at each dead end.
    pub braid: f32,
}

impl MazeConfig {
    /// Default grid side.
    pub const DEFAULT_SIDE: u32 = 15;

    /// Default plane scale.
    pub const DEFAULT_PLANE_SCALE: f32 = 100.0;

    /// Number of objects the world should place.
    #[must_use]
    pub fn objects(&self) -> u32 {
        self.object_count.unwrap_or(self.side)
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            side: Self::DEFAULT_SIDE,
            plane_scale: Self::DEFAULT_PLANE_SCALE,
            object_count: None,
            braid: 0.0,
        }
    }
}

/// Dense grid of packed texels describing walls and floor colours.
///
/// Each texel is either [`WALL_TEXEL`] or the floor colour of an open cell, so
/// the raw buffer doubles as the minimap texture. Cells are stored row-major,
/// index `row * columns + column`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    columns: u32,
    rows: u32,
    texels: Vec<u32>,
}

impl MazeGrid {
    /// Creates a grid where every cell is a wall.
    pub fn walled(columns: u32, rows: u32) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::Empty);
        }
        let count = usize::try_from(u64::from(columns) * u64::from(rows))
            .map_err(|_| GridError::TooLarge)?;
        Ok(Self {
            columns,
            rows,
            texels: vec![WALL_TEXEL; count],
        })
    }

    /// Parses a textual layout where `#` marks walls and `.` or a space marks
    /// open cells.
    ///
    /// Surrounding whitespace and blank lines are ignored, so layouts can be
    /// written as indented string literals.
    ///
    /// # Example
    /// ```
    /// use labyrinth_core::{CellCoord, GridCell, MazeGrid};
    ///
    /// let grid = MazeGrid::parse("...\n.#.\n...").unwrap();
    /// assert_eq!(grid.cell(CellCoord::new(1, 1)), Some(GridCell::Wall));
    /// assert_eq!(grid.room_count(), 8);
    /// ```
    pub fn parse(layout: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(GridError::Empty);
        };

        let width = first.chars().count();
        let columns = u32::try_from(width).map_err(|_| GridError::TooLarge)?;
        let rows = u32::try_from(lines.len()).map_err(|_| GridError::TooLarge)?;
        let mut grid = Self::walled(columns, rows)?;

        for (row, line) in (0_u32..).zip(lines.iter()) {
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (column, symbol) in (0_u32..).zip(line.chars()) {
                let cell = match symbol {
                    '#' => GridCell::Wall,
                    '.' | ' ' => GridCell::Open(OPEN_FLOOR),
                    other => {
                        return Err(GridError::UnexpectedSymbol {
                            symbol: other,
                            column,
                            row,
                        })
                    }
                };
                grid.set_cell(CellCoord::new(column, row), cell)?;
            }
        }

        Ok(grid)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.texels.len()
    }

    /// Converts a coordinate into a row-major index, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    /// Converts a row-major index back into a coordinate.
    #[must_use]
    pub fn coord(&self, index: usize) -> Option<CellCoord> {
        if index >= self.texels.len() {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Returns the tagged cell at the provided coordinate.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<GridCell> {
        self.index(cell)
            .map(|index| GridCell::from_texel(self.texels[index]))
    }

    /// Reports whether the cell is a wall. Cells outside the grid count as walls.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        !matches!(self.cell(cell), Some(GridCell::Open(_)))
    }

    /// Overwrites a cell with a wall or an open colour.
    pub fn set_cell(&mut self, cell: CellCoord, value: GridCell) -> Result<(), GridError> {
        let index = self.checked_index(cell)?;
        self.texels[index] = match value {
            GridCell::Wall => WALL_TEXEL,
            GridCell::Open(color) => open_texel(color)?,
        };
        Ok(())
    }

    /// Recolours an open cell, leaving walls untouched.
    ///
    /// Returns `Ok(false)` when the cell is a wall.
    pub fn paint(&mut self, cell: CellCoord, color: Rgba) -> Result<bool, GridError> {
        let index = self.checked_index(cell)?;
        let texel = open_texel(color)?;
        if self.texels[index] == WALL_TEXEL {
            return Ok(false);
        }
        self.texels[index] = texel;
        Ok(true)
    }

    /// Number of open cells.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.texels
            .iter()
            .filter(|&&texel| texel != WALL_TEXEL)
            .count()
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, GridCell)> + '_ {
        let columns = self.columns;
        (0_u32..)
            .zip(self.texels.iter())
            .map(move |(index, &texel)| {
                (
                    CellCoord::new(index % columns, index / columns),
                    GridCell::from_texel(texel),
                )
            })
    }

    /// Raw packed texels in row-major order.
    #[must_use]
    pub fn texels(&self) -> &[u32] {
        &self.texels
    }

    /// Texels expanded to RGBA8 bytes, ready for a texture upload.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.texels
            .iter()
            .flat_map(|texel| texel.to_le_bytes())
            .collect()
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, GridError> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            column: cell.column(),
            row: cell.row(),
        })
    }
}

fn open_texel(color: Rgba) -> Result<u32, GridError> {
    if color.packed() == WALL_TEXEL {
        Err(GridError::ReservedColor)
    } else {
        Ok(color.packed())
    }
}

/// Errors raised while constructing or editing a [`MazeGrid`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid would contain no cells.
    #[error("maze grid must contain at least one cell")]
    Empty,
    /// The grid would not fit into addressable memory.
    #[error("maze grid dimensions are too large")]
    TooLarge,
    /// A parsed row differs in width from the first row.
    #[error("row {row} has {actual} cells but {expected} were expected")]
    RaggedRow {
        /// Zero-based row that failed validation.
        row: u32,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// A parsed layout contained a symbol other than `#`, `.` or a space.
    #[error("unexpected symbol {symbol:?} at column {column}, row {row}")]
    UnexpectedSymbol {
        /// Offending character.
        symbol: char,
        /// Column of the character.
        column: u32,
        /// Row of the character.
        row: u32,
    },
    /// The coordinate lies outside the grid.
    #[error("cell ({column}, {row}) lies outside the grid")]
    OutOfBounds {
        /// Requested column.
        column: u32,
        /// Requested row.
        row: u32,
    },
    /// The colour collides with the wall sentinel and cannot mark an open cell.
    #[error("colour 0xffffffff is reserved for walls")]
    ReservedColor,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellKind, GridCell, GridError, MazeConfig, MazeGrid, Rgba, OPEN_FLOOR};

    #[test]
    fn rgba_packs_red_into_low_byte() {
        let color = Rgba::from_rgba(5, 90, 90, 1);
        assert_eq!(color.packed(), 0x015a_5a05);
        assert_eq!(color.to_bytes(), [5, 90, 90, 1]);
        assert_eq!(Rgba::from_rgb(255, 0, 0).packed(), 0xff00_00ff);
    }

    #[test]
    fn parse_reads_walls_and_rooms() {
        let grid = MazeGrid::parse(
            "
            #..
            .#.
            ..#
            ",
        )
        .expect("layout parses");

        assert_eq!((grid.columns(), grid.rows()), (3, 3));
        assert_eq!(grid.room_count(), 6);
        assert_eq!(grid.cell(CellCoord::new(0, 0)), Some(GridCell::Wall));
        assert_eq!(
            grid.cell(CellCoord::new(1, 0)),
            Some(GridCell::Open(OPEN_FLOOR))
        );
        assert_eq!(grid.cell(CellCoord::new(3, 0)), None);
        assert!(grid.is_wall(CellCoord::new(7, 7)));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert_eq!(
            MazeGrid::parse("...\n..\n..."),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2,
            })
        );
        assert_eq!(MazeGrid::parse("  \n"), Err(GridError::Empty));
    }

    #[test]
    fn paint_leaves_walls_untouched() {
        let mut grid = MazeGrid::parse(".#").expect("layout parses");
        let red = Rgba::from_rgb(255, 0, 0);

        assert_eq!(grid.paint(CellCoord::new(0, 0), red), Ok(true));
        assert_eq!(grid.paint(CellCoord::new(1, 0), red), Ok(false));
        assert_eq!(
            grid.paint(CellCoord::new(0, 0), Rgba::from_packed(u32::MAX)),
            Err(GridError::ReservedColor)
        );
        assert_eq!(grid.texels(), &[red.packed(), u32::MAX]);
        assert_eq!(grid.to_rgba_bytes(), vec![255, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn cells_iterate_row_major() {
        let grid = MazeGrid::parse("#.\n..").expect("layout parses");
        let kinds: Vec<_> = grid
            .cells()
            .map(|(coord, cell)| (coord, cell.kind()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (CellCoord::new(0, 0), CellKind::Wall),
                (CellCoord::new(1, 0), CellKind::Room),
                (CellCoord::new(0, 1), CellKind::Room),
                (CellCoord::new(1, 1), CellKind::Room),
            ]
        );
        assert_eq!(grid.coord(3), Some(CellCoord::new(1, 1)));
        assert_eq!(grid.coord(4), None);
    }

    #[test]
    fn maze_config_round_trips_through_bincode() {
        let config = MazeConfig {
            side: 21,
            plane_scale: 64.0,
            object_count: Some(9),
            braid: 0.25,
        };
        let bytes = bincode::serialize(&config).expect("serialize");
        let restored: MazeConfig = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, config);
        assert_eq!(restored.objects(), 9);
        assert_eq!(MazeConfig::default().objects(), MazeConfig::DEFAULT_SIDE);
    }
}
