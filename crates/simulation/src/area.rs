//! Area queries: which buildings touch a (padded) rectangle.

use std::collections::BTreeSet;

use crate::buildings::BuildingId;
use crate::grid::{Grid, GridRect};

/// Distinct buildings with at least one footprint cell inside the rectangle
/// (`x`, `y`, `width`, `height`) grown by `radius_x`/`radius_y` on each side.
/// The rectangle is clamped to the grid; anything fully off-grid is empty.
///
/// Cost is proportional to the padded rectangle's area.
pub fn buildings_in_area(
    grid: &Grid,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    radius_x: i32,
    radius_y: i32,
) -> BTreeSet<BuildingId> {
    let Some(rect) = GridRect::padded(
        x,
        y,
        width,
        height,
        radius_x,
        radius_y,
        grid.width,
        grid.height,
    ) else {
        return BTreeSet::new();
    };
    rect.cells()
        .filter_map(|(cx, cy)| grid.occupant(cx, cy))
        .collect()
}
