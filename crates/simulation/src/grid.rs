use serde::{Deserialize, Serialize};

use crate::buildings::BuildingId;
use crate::footprint::FootprintType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub flags: FootprintType,
    pub building: Option<BuildingId>,
}

impl Cell {
    pub fn terrain(&self) -> FootprintType {
        self.flags & FootprintType::MUST_BE_ON
    }

    pub fn is_empty(&self) -> bool {
        self.building.is_none()
    }
}

/// Fixed-size tile grid. Cells hold building ids, never building data, so a
/// multi-tile building is one arena entry referenced from every covered cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub cells: Vec<Cell>,
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn occupant(&self, x: usize, y: usize) -> Option<BuildingId> {
        self.get(x, y).building
    }

    /// True when the whole `w` x `h` rectangle anchored at (`x`, `y`) lies on the grid.
    pub fn rect_in_bounds(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        w > 0
            && h > 0
            && x.checked_add(w).is_some_and(|x1| x1 <= self.width)
            && y.checked_add(h).is_some_and(|y1| y1 <= self.height)
    }

    pub fn full_rect(&self) -> GridRect {
        GridRect {
            x0: 0,
            y0: 0,
            x1: self.width,
            y1: self.height,
        }
    }
}

/// Half-open cell rectangle `[x0, x1) x [y0, y1)`, always within grid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl GridRect {
    /// The rectangle (`x`, `y`, `w`, `h`) grown by `rx`/`ry` on each side and
    /// clamped to a `width` x `height` grid. `None` when nothing is left.
    #[allow(clippy::too_many_arguments)]
    pub fn padded(
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        rx: i32,
        ry: i32,
        width: usize,
        height: usize,
    ) -> Option<Self> {
        if w <= 0 || h <= 0 {
            return None;
        }
        let x0 = (x as i64 - rx.max(0) as i64).max(0);
        let y0 = (y as i64 - ry.max(0) as i64).max(0);
        let x1 = (x as i64 + w as i64 + rx.max(0) as i64).min(width as i64);
        let y1 = (y as i64 + h as i64 + ry.max(0) as i64).min(height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self {
            x0: x0 as usize,
            y0: y0 as usize,
            x1: x1 as usize,
            y1: y1 as usize,
        })
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }

    /// Row-major iteration over every cell in the rectangle.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..self.y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}
