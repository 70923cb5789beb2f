//! Collectible object placement and proximity pickups.

use labyrinth_core::{CellCoord, CellKind, ObjectId, WorldPoint};
use rand::Rng;
use thiserror::Error;

use crate::SpatialGrid;

/// Distance below which the agent collects an object.
pub const PICKUP_RADIUS: f32 = 2.0;

/// Collectible object resting in a room cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldObject {
    id: ObjectId,
    position: WorldPoint,
    cell: CellCoord,
}

impl WorldObject {
    /// Identifier referenced by the owning cell.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Position of the object in world space.
    #[must_use]
    pub const fn position(&self) -> WorldPoint {
        self.position
    }

    /// Cell hosting the object.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }
}

/// Scatters `count` objects over distinct vacant rooms.
///
/// Cells are drawn uniformly at random until a vacant room turns up, and each
/// object lands at a random offset of up to a quarter cell around the room
/// centre. Fails fast when fewer than `count` vacant rooms exist.
pub fn place_objects<R>(
    count: usize,
    walls: &mut SpatialGrid,
    rng: &mut R,
) -> Result<Vec<WorldObject>, PlacementError>
where
    R: Rng + ?Sized,
{
    let available = walls.vacant_room_count();
    if count > available {
        return Err(PlacementError::InsufficientRooms {
            requested: count,
            available,
        });
    }

    let mut objects = Vec::with_capacity(count);
    let mut next_id = 0_u32;
    while objects.len() < count {
        let coord = CellCoord::new(
            rng.gen_range(0..walls.columns()),
            rng.gen_range(0..walls.rows()),
        );
        let Some(index) = walls.index(coord) else {
            continue;
        };
        let cell = walls.cells()[index];
        if cell.kind() == CellKind::Wall || cell.occupant().is_some() {
            continue;
        }

        let center = cell.center();
        let position = WorldPoint::new(
            jitter(rng, center.x, cell.half_width() / 2.0),
            jitter(rng, center.z, cell.half_depth() / 2.0),
        );
        let id = ObjectId::new(next_id);
        next_id += 1;
        walls.set_occupant(index, Some(id));
        objects.push(WorldObject {
            id,
            position,
            cell: coord,
        });
    }

    Ok(objects)
}

/// Occupant of `cell` lying within [`PICKUP_RADIUS`] of `at`, if any.
pub(crate) fn nearby(
    walls: &SpatialGrid,
    objects: &[WorldObject],
    cell: CellCoord,
    at: WorldPoint,
) -> Option<ObjectId> {
    let record = walls.cell(cell)?;
    if record.kind() != CellKind::Room {
        return None;
    }
    let id = record.occupant()?;
    let object = objects.iter().find(|object| object.id == id)?;
    (object.position.distance(at) < PICKUP_RADIUS).then_some(id)
}

fn jitter<R>(rng: &mut R, center: f32, spread: f32) -> f32
where
    R: Rng + ?Sized,
{
    let (low, high) = (center - spread, center + spread);
    if low < high {
        rng.gen_range(low..high)
    } else {
        center
    }
}

/// Errors raised while placing objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// More objects were requested than vacant rooms exist.
    #[error("cannot place {requested} objects in {available} vacant rooms")]
    InsufficientRooms {
        /// Number of objects requested.
        requested: usize,
        /// Number of vacant rooms.
        available: usize,
    },
}
