use std::convert::From;
use std::fmt;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, RowIndex, SideLength};

/// A grid position: `x` is the column, `y` the row. Row 0 is the northern edge.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// The coordinate of the `index`th cell when a square grid is laid out row by row.
    pub fn from_row_major_index(index: usize, side: SideLength) -> Cartesian2DCoordinate {
        let SideLength(side_len) = side;
        let col = index % side_len;
        let row = index / side_len;
        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(col), RowIndex(row))
    }

    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(col_index.0 as u32, row_index.0 as u32)
    }

    /// Creates a new coordinate `steps` cells away in the given direction.
    /// Returns None if the coordinate is not representable (stepping off the north or west
    /// edge, or overflowing). Grid bounds are not checked here.
    pub fn offset(self, dir: CompassPrimary, steps: u32) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(steps).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_add(steps).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(steps).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(steps).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// The order in which neighbours are probed when carving and when searching.
    /// Visit order and carved layout (for a given random sequence) depend on it.
    pub const PROBE_ORDER: [CompassPrimary; 4] = [CompassPrimary::South,
                                                  CompassPrimary::East,
                                                  CompassPrimary::North,
                                                  CompassPrimary::West];
}

/// Where a route through the maze starts and ends.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Endpoints {
    pub start: Cartesian2DCoordinate,
    pub end: Cartesian2DCoordinate,
}

impl Endpoints {
    pub fn new(start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) -> Endpoints {
        Endpoints { start, end }
    }

    /// Top left to bottom right, the default route.
    pub fn corners(side: SideLength) -> Endpoints {
        let far = side.0.saturating_sub(1) as u32;
        Endpoints {
            start: Cartesian2DCoordinate::new(0, 0),
            end: Cartesian2DCoordinate::new(far, far),
        }
    }
}
