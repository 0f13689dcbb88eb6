use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, Endpoints};
use crate::errors::*;
use crate::grid::Grid;

/// Distance between the cells the backtracker visits. The cell half way between two
/// lattice cells is the wall knocked through to join them.
const LATTICE_STEP: u32 = 2;

/// Apply the recursive backtracker maze generation algorithm to a grid of walls.
///
/// A random walk starts at (0, 0) and only ever moves to lattice cells (two steps away) that are
/// still walls, opening the wall between as it goes. When the walk is boxed in it backtracks along
/// its own path, held on an explicit stack rather than the call stack, until it finds a cell with an
/// unvisited lattice neighbour. It is finished when it has backtracked all the way to the start.
/// Every lattice cell is then reachable through exactly one route: a perfect maze, biased towards
/// long winding passages.
///
/// The grid is expected to be all walls; cells already open are treated as visited.
///
/// After carving, the start and end cells are forced open. An end off the lattice (the far corner
/// of an even sized grid) would then be a lone open cell, so it gets joined to the maze through
/// an adjacent wall cell that touches exactly one open cell. Endpoints must lie on the grid,
/// otherwise `OutOfBounds` is returned before anything is carved.
pub fn recursive_backtracker<R>(grid: &mut Grid, rng: &mut R, endpoints: Endpoints) -> Result<()>
    where R: Rng + ?Sized
{
    for endpoint in &[endpoints.start, endpoints.end] {
        if !grid.is_valid_coordinate(*endpoint) {
            return Err(ErrorKind::OutOfBounds(*endpoint, grid.side_length().0).into());
        }
    }

    let root = Cartesian2DCoordinate::new(0, 0);
    grid.set_open(root)?;
    let mut stack = vec![root];

    while let Some(&current) = stack.last() {
        let candidates = unvisited_lattice_neighbours(grid, current);

        if let Some(&(next, wall)) = candidates.choose(rng) {
            grid.set_open(wall)?;
            grid.set_open(next)?;
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    debug!("Carved {} open cells into a {}x{} grid",
           grid.open_cells_count().0,
           grid.side_length().0,
           grid.side_length().0);

    open_endpoint(grid, endpoints.start)?;
    open_endpoint(grid, endpoints.end)
}

/// Lattice cells two steps from `coord` that have not been carved yet, each paired with the wall
/// cell between it and `coord`.
fn unvisited_lattice_neighbours(grid: &Grid,
                                coord: Cartesian2DCoordinate)
                                -> SmallVec<[(Cartesian2DCoordinate, Cartesian2DCoordinate); 4]> {
    CompassPrimary::PROBE_ORDER
        .iter()
        .filter_map(|dir| {
            grid.neighbour_at_distance(coord, *dir, LATTICE_STEP)
                .filter(|lattice_coord| !grid.is_open(*lattice_coord))
                .and_then(|lattice_coord| {
                    grid.neighbour_at_direction(coord, *dir).map(|wall| (lattice_coord, wall))
                })
        })
        .collect()
}

fn open_endpoint(grid: &mut Grid, endpoint: Cartesian2DCoordinate) -> Result<()> {
    if grid.is_open(endpoint) {
        return Ok(());
    }

    grid.set_open(endpoint)?;
    if !grid.open_neighbours(endpoint).is_empty() {
        debug!("Forced endpoint {} open next to the carved maze", endpoint);
        return Ok(());
    }

    // A connector with a single open neighbour hangs the endpoint off the maze as a leaf, so no
    // loop is introduced.
    let connector = grid.neighbours(endpoint)
        .into_iter()
        .find(|wall| {
            grid.open_neighbours(*wall)
                .iter()
                .filter(|open| **open != endpoint)
                .count() == 1
        });

    match connector {
        Some(wall) => {
            debug!("Joined isolated endpoint {} to the maze through {}", endpoint, wall);
            grid.set_open(wall)
        }
        None => {
            debug!("Endpoint {} is forced open but left unreachable", endpoint);
            Ok(())
        }
    }
}
