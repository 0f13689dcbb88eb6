use std::fmt;

use bit_set::BitSet;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::errors::*;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{CellsCount, SideLength};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Open,
}

/// A square grid of cells, each either a wall or open.
///
/// Only the open cells are stored, as bits in row major order. Every cell of a new grid is a wall.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    side: SideLength,
    open_cells: BitSet,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: side: {:?}, open cells: {:?}",
               self.side.0,
               self.open_cells_count().0)
    }
}

impl Grid {
    /// A grid of `side * side` wall cells.
    ///
    /// Fails with `InvalidSize` for a zero side or one whose cells cannot be addressed.
    pub fn new(side: SideLength) -> Result<Grid> {
        let cells_count = Grid::validate_side_length(side)?;
        Ok(Grid {
            side,
            open_cells: BitSet::with_capacity(cells_count.0),
        })
    }

    /// The number of cells a grid of this side length would hold, or `InvalidSize` if it cannot
    /// be built.
    pub fn validate_side_length(side: SideLength) -> Result<CellsCount> {
        let SideLength(side_len) = side;
        match side_len.checked_mul(side_len) {
            Some(count) if side_len >= 1 && side_len <= u32::MAX as usize => Ok(CellsCount(count)),
            _ => Err(ErrorKind::InvalidSize(side_len).into()),
        }
    }

    /// A grid with no walls at all.
    pub fn fully_open(side: SideLength) -> Result<Grid> {
        let mut grid = Grid::new(side)?;
        for index in 0..grid.size().0 {
            grid.open_cells.insert(index);
        }
        Ok(grid)
    }

    #[inline]
    pub fn side_length(&self) -> SideLength {
        self.side
    }

    #[inline]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.side.0 * self.side.0)
    }

    #[inline]
    pub fn open_cells_count(&self) -> CellsCount {
        CellsCount(self.open_cells.len())
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.side.0 && (coord.y as usize) < self.side.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some((coord.y as usize * self.side.0) + coord.x as usize)
        } else {
            None
        }
    }

    pub fn cell_state(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| {
            if self.open_cells.contains(index) {
                CellState::Open
            } else {
                CellState::Wall
            }
        })
    }

    /// Can the cell be walked through? Coordinates outside the grid are never open, so
    /// neighbours can be probed at the boundary without separate bounds checks.
    #[inline]
    pub fn is_open(&self, coord: Cartesian2DCoordinate) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.open_cells.contains(index))
    }

    /// Set the state of a single cell.
    ///
    /// Fails with `OutOfBounds`, leaving the grid unchanged, if the coordinate is not on the grid.
    pub fn set_cell_state(&mut self, coord: Cartesian2DCoordinate, state: CellState) -> Result<()> {
        let index = self.grid_coordinate_to_index(coord)
            .ok_or_else(|| ErrorKind::OutOfBounds(coord, self.side.0))?;
        match state {
            CellState::Open => {
                let _ = self.open_cells.insert(index);
            }
            CellState::Wall => {
                let _ = self.open_cells.remove(index);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn set_open(&mut self, coord: Cartesian2DCoordinate) -> Result<()> {
        self.set_cell_state(coord, CellState::Open)
    }

    #[inline]
    pub fn set_wall(&mut self, coord: Cartesian2DCoordinate) -> Result<()> {
        self.set_cell_state(coord, CellState::Wall)
    }

    /// Cells that are to the North, South, East or West of a particular cell, whether open or not.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::PROBE_ORDER
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// The adjacent cells that are open.
    pub fn open_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::PROBE_ORDER
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .filter(|neighbour| self.is_open(*neighbour))
            .collect()
    }

    #[inline]
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        self.neighbour_at_distance(coord, direction, 1)
    }

    /// The cell `steps` away in `direction`, if it lies on the grid.
    pub fn neighbour_at_distance(&self,
                                 coord: Cartesian2DCoordinate,
                                 direction: CompassPrimary,
                                 steps: u32)
                                 -> Option<Cartesian2DCoordinate> {
        coord.offset(direction, steps)
            .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.side)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.side)
    }

    /// Open cells in row major order.
    pub fn iter_open<'a>(&'a self) -> impl Iterator<Item = Cartesian2DCoordinate> + 'a {
        let side = self.side;
        self.open_cells
            .iter()
            .map(move |index| Cartesian2DCoordinate::from_row_major_index(index, side))
    }
}
