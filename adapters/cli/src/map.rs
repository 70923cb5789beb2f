//! Plain-text rendering of the maze.

use labyrinth_core::{CellCoord, CellKind};
use labyrinth_world::{query, World};

/// Draws the maze row by row: `#` walls, `.` floor, `*` objects and `@` the agent.
pub(crate) fn ascii_map(world: &World) -> String {
    let walls = query::walls(world);
    let agent = query::agent(world).cell;
    let mut map = String::with_capacity(walls.cells().len() + walls.rows() as usize);

    for row in 0..walls.rows() {
        for column in 0..walls.columns() {
            let coord = CellCoord::new(column, row);
            let symbol = match walls.cell(coord) {
                _ if agent == Some(coord) => '@',
                Some(cell) if cell.kind() == CellKind::Wall => '#',
                Some(cell) if cell.occupant().is_some() => '*',
                _ => '.',
            };
            map.push(symbol);
        }
        map.push('\n');
    }
    map
}
