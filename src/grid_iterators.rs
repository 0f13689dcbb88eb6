use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{ColumnIndex, RowIndex, SideLength};

#[derive(Copy, Clone)]
pub struct CellIter {
    side: SideLength,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(side: SideLength) -> CellIter {
        CellIter {
            side,
            current_cell_number: 0,
            cells_count: side.0 * side.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.side);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Iterates the grid one whole row at a time, north to south.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    side: SideLength,
    current_index: usize,
}

impl RowIter {
    pub(crate) fn new(side: SideLength) -> RowIter {
        RowIter {
            side,
            current_index: 0,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let SideLength(length) = self.side;
        if self.current_index < length {
            let row = RowIndex(self.current_index);
            let coords = (0..length)
                .map(|i: usize| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i), row))
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.side.0 - self.current_index;
        (lower_bound, Some(lower_bound))
    }
}
