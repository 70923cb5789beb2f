//! World-space layout of the maze cells.
//!
//! The grid covers the square `[-plane_scale, plane_scale]` on both axes.
//! Column zero sits at the negative x edge while row zero sits at the positive
//! z edge, so increasing rows walk toward negative z.

use labyrinth_core::{CellCoord, CellKind, MazeGrid, ObjectId, WorldPoint};
use thiserror::Error;

/// World-space record describing a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallCell {
    kind: CellKind,
    center: WorldPoint,
    half_width: f32,
    half_depth: f32,
    occupant: Option<ObjectId>,
}

impl WallCell {
    /// Whether the cell is a wall or a room.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Centre of the cell in world space.
    #[must_use]
    pub const fn center(&self) -> WorldPoint {
        self.center
    }

    /// Half of the cell extent along x.
    #[must_use]
    pub const fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Half of the cell extent along z.
    #[must_use]
    pub const fn half_depth(&self) -> f32 {
        self.half_depth
    }

    /// Object currently resting in the cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<ObjectId> {
        self.occupant
    }

    /// Reports whether the point lies within the cell's half-open bounds.
    #[must_use]
    pub fn contains(&self, point: WorldPoint) -> bool {
        (point.x - self.center.x).abs() < self.half_width
            && (point.z - self.center.z).abs() < self.half_depth
    }
}

/// Cell records laid out over world space, indexed `row * columns + column`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialGrid {
    columns: u32,
    rows: u32,
    plane_scale: f32,
    cells: Vec<WallCell>,
}

/// Maps every maze cell to its world-space record.
///
/// `plane_scale` must be finite and positive.
pub fn build_walls(grid: &MazeGrid, plane_scale: f32) -> Result<SpatialGrid, SpatialError> {
    if !plane_scale.is_finite() || plane_scale <= 0.0 {
        return Err(SpatialError::InvalidPlaneScale { plane_scale });
    }

    let columns = grid.columns();
    let rows = grid.rows();
    let span = 2.0 * plane_scale;
    let half_width = plane_scale / columns as f32;
    let half_depth = plane_scale / rows as f32;

    let cells = grid
        .cells()
        .map(|(coord, cell)| {
            let x = coord.column() as f32 / columns as f32 * span - plane_scale + half_width;
            let z = -(coord.row() as f32 / rows as f32 * span - plane_scale + half_depth);
            WallCell {
                kind: cell.kind(),
                center: WorldPoint::new(x, z),
                half_width,
                half_depth,
                occupant: None,
            }
        })
        .collect();

    Ok(SpatialGrid {
        columns,
        rows,
        plane_scale,
        cells,
    })
}

impl SpatialGrid {
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

    /// Half of the world-space extent covered by the grid.
    #[must_use]
    pub const fn plane_scale(&self) -> f32 {
        self.plane_scale
    }

    /// All cell records in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[WallCell] {
        &self.cells
    }

    /// Record for the provided coordinate.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&WallCell> {
        self.index(coord).map(|index| &self.cells[index])
    }

    /// Converts a coordinate into a row-major index.
    #[must_use]
    pub fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            Some(coord.row() as usize * self.columns as usize + coord.column() as usize)
        } else {
            None
        }
    }

    /// Converts a row-major index back into a coordinate.
    #[must_use]
    pub fn coord(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cells.len() {
            return None;
        }
        let columns = self.columns as usize;
        Some(CellCoord::new(
            (index % columns) as u32,
            (index / columns) as u32,
        ))
    }

    /// Finds the cell containing a world-space point.
    ///
    /// Returns `None` for points on or beyond the outer edges and for
    /// non-finite input.
    #[must_use]
    pub fn locate(&self, point: WorldPoint) -> Option<CellCoord> {
        let column = axis_index(point.x, self.plane_scale, self.columns)?;
        let row = axis_index(-point.z, self.plane_scale, self.rows)?;
        Some(CellCoord::new(column, row))
    }

    /// Number of room cells.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.kind == CellKind::Room)
            .count()
    }

    /// Number of room cells without an occupant.
    #[must_use]
    pub fn vacant_room_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.kind == CellKind::Room && cell.occupant.is_none())
            .count()
    }

    /// Room whose centre lies closest to the world origin; ties keep the lowest index.
    #[must_use]
    pub fn central_room(&self) -> Option<CellCoord> {
        let origin = WorldPoint::default();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.kind == CellKind::Room)
            .min_by(|(_, a), (_, b)| {
                a.center
                    .distance(origin)
                    .total_cmp(&b.center.distance(origin))
            })
            .and_then(|(index, _)| self.coord(index))
    }

    pub(crate) fn set_occupant(&mut self, index: usize, occupant: Option<ObjectId>) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.occupant = occupant;
        }
    }
}

fn axis_index(value: f32, plane_scale: f32, cells: u32) -> Option<u32> {
    let scaled = (value + plane_scale) / (2.0 * plane_scale) * cells as f32;
    if !scaled.is_finite() || scaled < 0.0 {
        return None;
    }
    let index = scaled.floor();
    if index >= cells as f32 {
        return None;
    }
    Some(index as u32)
}

/// Errors raised while laying out the spatial grid.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpatialError {
    /// The plane scale was zero, negative or not finite.
    #[error("plane scale must be finite and positive (received {plane_scale})")]
    InvalidPlaneScale {
        /// Rejected plane scale.
        plane_scale: f32,
    },
}
