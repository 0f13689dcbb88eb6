//! **mazerunner** generates perfect mazes on a square grid of wall and open cells and finds the
//! shortest route through them with a breadth first search that can be stepped one cell at a time.

#![recursion_limit = "1024"]

pub mod analysis;
pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod maze;
pub mod pathing;
pub mod units;
