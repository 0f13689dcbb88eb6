use log::info;
use rand::Rng;

use crate::analysis::MazeStats;
use crate::cells::Endpoints;
use crate::config::MazeConfig;
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::pathing::{self, BreadthFirstSearch, Solution};

/// A generated grid together with the two cells a route is wanted between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    endpoints: Endpoints,
}

impl Maze {
    /// Carve a new perfect maze of the configured size, with both endpoints open.
    pub fn generate<R>(config: &MazeConfig, rng: &mut R) -> Result<Maze>
        where R: Rng + ?Sized
    {
        let mut grid = Grid::new(config.side_length())?;
        generators::recursive_backtracker(&mut grid, rng, config.endpoints())?;
        info!("Generated a {}x{} maze from {} to {}",
              config.side_length().0,
              config.side_length().0,
              config.endpoints().start,
              config.endpoints().end);
        Ok(Maze {
            grid,
            endpoints: config.endpoints(),
        })
    }

    /// Wrap an existing grid, e.g. a hand built one. The endpoints must be on the grid but need
    /// not be open.
    pub fn from_grid(grid: Grid, endpoints: Endpoints) -> Result<Maze> {
        for endpoint in &[endpoints.start, endpoints.end] {
            if !grid.is_valid_coordinate(*endpoint) {
                return Err(ErrorKind::OutOfBounds(*endpoint, grid.side_length().0).into());
            }
        }
        Ok(Maze { grid, endpoints })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    /// A fresh step by step search from start to end.
    pub fn solver(&self) -> Result<BreadthFirstSearch<'_>> {
        BreadthFirstSearch::new(&self.grid, self.endpoints)
    }

    pub fn solve(&self) -> Result<Solution> {
        pathing::solve(&self.grid, self.endpoints)
    }

    pub fn stats(&self) -> MazeStats {
        MazeStats::for_maze(self)
    }
}
