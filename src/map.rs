use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::common::{Direction, Location, StateError};

pub const OBSTACLE: i32 = -1;

/// Rectangular grid of cell heights: `-1` is an obstacle, `0` empty floor,
/// and `n > 0` a stair segment of height `n`.
///
/// Cells sit behind an immutable shared slice. Maps that are derived with
/// [`HeightMap::with_cell`] own a fresh copy, while plain clones share the
/// parent's cells, which is safe because nothing ever writes through them.
#[derive(Debug, Clone)]
pub struct HeightMap {
    pub height: usize,
    pub width: usize,
    cells: Rc<[i32]>,
}

impl HeightMap {
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, StateError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            return Err(StateError::EmptyMap);
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(StateError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            for (col, value) in row.into_iter().enumerate() {
                if value < OBSTACLE {
                    return Err(StateError::InvalidCell {
                        position: (row_index, col),
                        value,
                    });
                }
                cells.push(value);
            }
        }

        Ok(HeightMap {
            height,
            width,
            cells: cells.into(),
        })
    }

    pub fn in_bounds(&self, (x, y): Location) -> bool {
        x < self.height && y < self.width
    }

    /// Panics if `position` is out of bounds; callers validate first.
    pub fn get(&self, (x, y): Location) -> i32 {
        assert!(self.in_bounds((x, y)), "cell {:?} out of bounds", (x, y));
        self.cells[x * self.width + y]
    }

    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.get((x, y)) != OBSTACLE
    }

    /// Passable cells one step away, in `Direction::ALL` order.
    pub fn get_neighbors(&self, x: usize, y: usize) -> Vec<(Direction, Location)> {
        let mut neighbors = Vec::new();

        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let new_x = x as i64 + dx;
            let new_y = y as i64 + dy;
            if new_x >= 0
                && new_y >= 0
                && new_x < self.height as i64
                && new_y < self.width as i64
                && self.is_passable(new_x as usize, new_y as usize)
            {
                neighbors.push((direction, (new_x as usize, new_y as usize)));
            }
        }

        neighbors
    }

    /// Copy of this map with a single cell replaced.
    pub fn with_cell(&self, (x, y): Location, value: i32) -> HeightMap {
        let mut cells = self.cells.to_vec();
        cells[x * self.width + y] = value;
        HeightMap {
            height: self.height,
            width: self.width,
            cells: cells.into(),
        }
    }

    /// Every cell holding a stair segment, in row-major order.
    pub fn stairs(&self) -> impl Iterator<Item = (Location, i32)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value > 0)
            .map(move |(index, &value)| ((index / width, index % width), value))
    }

    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells.chunks(self.width).map(|row| row.to_vec()).collect()
    }

    pub(crate) fn shares_cells_with(&self, other: &HeightMap) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }
}

impl PartialEq for HeightMap {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height
            && self.width == other.width
            && (self.shares_cells_with(other) || self.cells == other.cells)
    }
}

impl Eq for HeightMap {}

impl Hash for HeightMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.height.hash(state);
        self.width.hash(state);
        self.cells.hash(state);
    }
}
