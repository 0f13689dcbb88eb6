use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::cells::{Cartesian2DCoordinate, Endpoints};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::SideLength;

pub const DEFAULT_SIDE_LENGTH: usize = 20;
pub const DEFAULT_STEP_DELAY_MS: u64 = 10;
pub const DEFAULT_FINISH_PAUSE_MS: u64 = 500;

/// Everything needed to generate and present one maze.
///
/// The delays are only hints for whoever animates a search; nothing in the library sleeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    side: SideLength,
    endpoints: Endpoints,
    seed: Option<u64>,
    step_delay: Duration,
    finish_pause: Duration,
}

impl MazeConfig {
    #[inline]
    pub fn side_length(&self) -> SideLength {
        self.side
    }

    #[inline]
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    #[inline]
    pub fn finish_pause(&self) -> Duration {
        self.finish_pause
    }

    /// A seeded generator when a seed was given, otherwise one seeded from the OS.
    pub fn rng(&self) -> SmallRng {
        self.seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64)
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        let side = SideLength(DEFAULT_SIDE_LENGTH);
        MazeConfig {
            side,
            endpoints: Endpoints::corners(side),
            seed: None,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            finish_pause: Duration::from_millis(DEFAULT_FINISH_PAUSE_MS),
        }
    }
}

/// Unset endpoints fall back to the top left and bottom right corners.
#[derive(Debug, Clone)]
pub struct MazeConfigBuilder {
    side: SideLength,
    start: Option<Cartesian2DCoordinate>,
    end: Option<Cartesian2DCoordinate>,
    seed: Option<u64>,
    step_delay: Duration,
    finish_pause: Duration,
}

impl MazeConfigBuilder {
    pub fn new() -> MazeConfigBuilder {
        MazeConfigBuilder {
            side: SideLength(DEFAULT_SIDE_LENGTH),
            start: None,
            end: None,
            seed: None,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            finish_pause: Duration::from_millis(DEFAULT_FINISH_PAUSE_MS),
        }
    }

    pub fn side_length(mut self, side: SideLength) -> MazeConfigBuilder {
        self.side = side;
        self
    }

    pub fn start(mut self, start: Option<Cartesian2DCoordinate>) -> MazeConfigBuilder {
        self.start = start;
        self
    }

    pub fn end(mut self, end: Option<Cartesian2DCoordinate>) -> MazeConfigBuilder {
        self.end = end;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> MazeConfigBuilder {
        self.seed = seed;
        self
    }

    pub fn step_delay(mut self, step_delay: Duration) -> MazeConfigBuilder {
        self.step_delay = step_delay;
        self
    }

    pub fn finish_pause(mut self, finish_pause: Duration) -> MazeConfigBuilder {
        self.finish_pause = finish_pause;
        self
    }

    /// Fails with `InvalidSize` for a side length no grid can have and with `OutOfBounds` for an
    /// endpoint off the grid.
    pub fn build(self) -> Result<MazeConfig> {
        // Same checks as building the grid for real, without allocating it.
        Grid::validate_side_length(self.side)?;

        let corners = Endpoints::corners(self.side);
        let endpoints = Endpoints::new(self.start.unwrap_or(corners.start),
                                       self.end.unwrap_or(corners.end));
        let side = self.side.0 as u64;
        for endpoint in &[endpoints.start, endpoints.end] {
            if endpoint.x as u64 >= side || endpoint.y as u64 >= side {
                return Err(ErrorKind::OutOfBounds(*endpoint, self.side.0).into());
            }
        }

        Ok(MazeConfig {
            side: self.side,
            endpoints,
            seed: self.seed,
            step_delay: self.step_delay,
            finish_pause: self.finish_pause,
        })
    }
}

impl Default for MazeConfigBuilder {
    fn default() -> Self {
        MazeConfigBuilder::new()
    }
}
