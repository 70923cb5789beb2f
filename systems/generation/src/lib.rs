#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised maze generation using Kruskal's algorithm over a room lattice.
//!
//! Rooms sit on every cell whose column and row are both even. Cells with two
//! odd coordinates are permanent walls, and the remaining cells are passages
//! joining two neighbouring rooms. Shuffling the passages and opening each one
//! that merges two disjoint sets yields a spanning tree, so every open cell of
//! the resulting [`MazeGrid`] is reachable from every other one.
//!
//! An optional braiding pass opens extra passages at dead ends. It only ever
//! adds openings, so connectivity is preserved.

use labyrinth_core::{CellCoord, GridCell, GridError, MazeGrid, OPEN_FLOOR};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// Generates a perfect maze of the requested dimensions.
///
/// Shorthand for [`MazeGenerator::default`] followed by
/// [`MazeGenerator::generate`].
pub fn generate_maze<R>(width: u32, height: u32, rng: &mut R) -> Result<MazeGrid, GenerationError>
where
    R: Rng + ?Sized,
{
    MazeGenerator::default().generate(width, height, rng)
}

/// Maze generator configured with a braiding probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeGenerator {
    braid: f32,
}

impl MazeGenerator {
    /// Smallest accepted grid side.
    pub const MIN_SIDE: u32 = 2;

    /// Creates a generator producing perfect mazes.
    #[must_use]
    pub const fn new() -> Self {
        Self { braid: 0.0 }
    }

    /// Creates a generator that opens an extra passage at each dead end with
    /// the provided probability.
    ///
    /// Returns an error unless `braid` lies within `0.0..=1.0`.
    pub fn with_braid(braid: f32) -> Result<Self, GenerationError> {
        if !(0.0..=1.0).contains(&braid) {
            return Err(GenerationError::InvalidBraid { braid });
        }
        Ok(Self { braid })
    }

    /// Probability of braiding each dead end.
    #[must_use]
    pub const fn braid(&self) -> f32 {
        self.braid
    }

    /// Carves a maze into a freshly walled grid.
    pub fn generate<R>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<MazeGrid, GenerationError>
    where
        R: Rng + ?Sized,
    {
        if width < Self::MIN_SIDE || height < Self::MIN_SIDE {
            return Err(GenerationError::InvalidDimensions { width, height });
        }

        let mut grid = MazeGrid::walled(width, height)?;
        let lattice = Lattice::new(width, height);
        for room in 0..lattice.room_count() {
            grid.set_cell(lattice.room_cell(room), GridCell::Open(OPEN_FLOOR))?;
        }

        let mut passages = lattice.passages();
        passages.shuffle(rng);

        let mut sets = DisjointSets::new(lattice.room_count());
        let mut carved = 0_usize;
        for passage in &passages {
            if sets.union(passage.first, passage.second) {
                grid.set_cell(passage.cell, GridCell::Open(OPEN_FLOOR))?;
                carved += 1;
            }
        }

        let braided = if self.braid > 0.0 {
            braid_dead_ends(&mut grid, &lattice, self.braid, rng)?
        } else {
            0
        };

        log::debug!(
            "carved {width}x{height} maze: {} rooms, {carved} passages, {braided} braided",
            lattice.room_count()
        );
        Ok(grid)
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised while generating a maze.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerationError {
    /// Either dimension is below [`MazeGenerator::MIN_SIDE`].
    #[error("maze dimensions {width}x{height} are too small (minimum 2x2)")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The braiding probability lies outside `0.0..=1.0`.
    #[error("braid probability {braid} must lie within 0.0..=1.0")]
    InvalidBraid {
        /// Rejected probability.
        braid: f32,
    },
    /// The grid could not be allocated or edited.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Opens one closed passage at dead ends, visiting rooms in row-major order.
fn braid_dead_ends<R>(
    grid: &mut MazeGrid,
    lattice: &Lattice,
    probability: f32,
    rng: &mut R,
) -> Result<usize, GenerationError>
where
    R: Rng + ?Sized,
{
    let mut opened = 0;
    for room in 0..lattice.room_count() {
        let around = lattice.passages_around(room);
        let closed: Vec<CellCoord> = around
            .iter()
            .copied()
            .filter(|&cell| grid.is_wall(cell))
            .collect();
        if around.len() - closed.len() != 1 || closed.is_empty() {
            continue;
        }
        if !rng.gen_bool(f64::from(probability)) {
            continue;
        }
        let choice = closed[rng.gen_range(0..closed.len())];
        grid.set_cell(choice, GridCell::Open(OPEN_FLOOR))?;
        opened += 1;
    }
    Ok(opened)
}

/// Passage cell joining two lattice rooms.
#[derive(Clone, Copy, Debug)]
struct Passage {
    cell: CellCoord,
    first: usize,
    second: usize,
}

/// Room lattice laid over the even cells of the grid.
#[derive(Clone, Copy, Debug)]
struct Lattice {
    width: u32,
    height: u32,
    columns: u32,
    rows: u32,
}

impl Lattice {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            columns: width.div_ceil(2),
            rows: height.div_ceil(2),
        }
    }

    fn room_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    fn room_cell(&self, room: usize) -> CellCoord {
        let columns = self.columns as usize;
        let column = (room % columns) as u32;
        let row = (room / columns) as u32;
        CellCoord::new(column * 2, row * 2)
    }

    fn room_at(&self, column: u32, row: u32) -> usize {
        row as usize * self.columns as usize + column as usize
    }

    fn passages(&self) -> Vec<Passage> {
        let mut passages = Vec::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let current = self.room_at(column, row);
                if column + 1 < self.columns {
                    passages.push(Passage {
                        cell: CellCoord::new(column * 2 + 1, row * 2),
                        first: current,
                        second: self.room_at(column + 1, row),
                    });
                }
                if row + 1 < self.rows {
                    passages.push(Passage {
                        cell: CellCoord::new(column * 2, row * 2 + 1),
                        first: current,
                        second: self.room_at(column, row + 1),
                    });
                }
            }
        }
        passages
    }

    /// Passage cells leading from a room to its existing lattice neighbours.
    fn passages_around(&self, room: usize) -> Vec<CellCoord> {
        let cell = self.room_cell(room);
        let (column, row) = (cell.column(), cell.row());
        let mut around = Vec::with_capacity(4);
        if column >= 2 {
            around.push(CellCoord::new(column - 1, row));
        }
        if column + 2 < self.width {
            around.push(CellCoord::new(column + 1, row));
        }
        if row >= 2 {
            around.push(CellCoord::new(column, row - 1));
        }
        if row + 2 < self.height {
            around.push(CellCoord::new(column, row + 1));
        }
        around
    }
}

/// Union-find over lattice rooms with path compression and union by rank.
#[derive(Debug)]
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            rank: vec![0; count],
        }
    }

    fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = item;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets containing both items; false when already joined.
    fn union(&mut self, first: usize, second: usize) -> bool {
        let first = self.find(first);
        let second = self.find(second);
        if first == second {
            return false;
        }

        match self.rank[first].cmp(&self.rank[second]) {
            std::cmp::Ordering::Less => self.parent[first] = second,
            std::cmp::Ordering::Greater => self.parent[second] = first,
            std::cmp::Ordering::Equal => {
                self.parent[second] = first;
                self.rank[first] = self.rank[first].saturating_add(1);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_sets_merge_once() {
        let mut sets = DisjointSets::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn lattice_counts_rooms_and_passages() {
        let lattice = Lattice::new(5, 4);
        assert_eq!(lattice.room_count(), 6);
        assert_eq!(lattice.room_cell(4), CellCoord::new(2, 2));
        // 3x2 rooms: 2 horizontal passages per row, 3 vertical ones.
        assert_eq!(lattice.passages().len(), 7);
        assert_eq!(
            lattice.passages_around(0),
            vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]
        );
    }
}
