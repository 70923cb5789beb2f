//! Wall collision queries and axis-separated sliding.

use labyrinth_core::{CellKind, Displacement, WorldPoint};

use crate::SpatialGrid;

/// Result of resolving a walk step against the walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideOutcome {
    /// Step that may be applied; blocked components are zeroed.
    pub step: Displacement,
    /// Whether the combined probe hit a wall.
    pub probe_blocked: bool,
    /// Whether the x component was suppressed.
    pub along_x: bool,
    /// Whether the z component was suppressed.
    pub along_z: bool,
}

impl SpatialGrid {
    /// Reports whether `position + delta` lands inside a wall.
    ///
    /// Positions outside the grid count as blocked.
    #[must_use]
    pub fn collides(&self, position: WorldPoint, delta: Displacement) -> bool {
        self.locate(position.offset(delta))
            .and_then(|coord| self.cell(coord))
            .map_or(true, |cell| cell.kind() == CellKind::Wall)
    }

    /// Tests `probe` as a whole and, when blocked, per axis, suppressing only
    /// the blocked components of `step`.
    ///
    /// When the combined probe is blocked but neither axis is blocked on its
    /// own (a diagonal corner) the step passes unchanged.
    #[must_use]
    pub fn resolve_slide(
        &self,
        position: WorldPoint,
        step: Displacement,
        probe: Displacement,
    ) -> SlideOutcome {
        if !self.collides(position, probe) {
            return SlideOutcome {
                step,
                probe_blocked: false,
                along_x: false,
                along_z: false,
            };
        }

        let along_x = self.collides(position, probe.x_only());
        let along_z = self.collides(position, probe.z_only());
        let mut resolved = step;
        if along_x {
            resolved.dx = 0.0;
        }
        if along_z {
            resolved.dz = 0.0;
        }

        SlideOutcome {
            step: resolved,
            probe_blocked: true,
            along_x,
            along_z,
        }
    }
}
