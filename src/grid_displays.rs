use std::fmt;

use fnv::FnvHashSet;

use crate::cells::{Cartesian2DCoordinate, Endpoints};
use crate::grid::Grid;

const WALL_BODY: &str = "███";
const BLANK_BODY: &str = "   ";

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required. `None` means this display has
    /// nothing to say about the cell and the plain wall or open body is drawn.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> Option<String> {
        None
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<String> {
        if self.on_path_coordinates.contains(&coord) {
            Some(String::from(" * "))
        } else {
            None
        }
    }
}

/// Marks the cells a search has dequeued so far.
#[derive(Debug)]
pub struct VisitedDisplay {
    visited_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl VisitedDisplay {
    pub fn new(visited: &[Cartesian2DCoordinate]) -> Self {
        VisitedDisplay { visited_coordinates: visited.iter().cloned().collect() }
    }
}
impl GridDisplay for VisitedDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<String> {
        if self.visited_coordinates.contains(&coord) {
            Some(String::from(" . "))
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    endpoints: Endpoints,
}
impl StartEndPointsDisplay {
    pub fn new(endpoints: Endpoints) -> StartEndPointsDisplay {
        StartEndPointsDisplay { endpoints }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<String> {
        if coord == self.endpoints.start {
            Some(String::from(" S "))
        } else if coord == self.endpoints.end {
            Some(String::from(" E "))
        } else {
            None
        }
    }
}

/// Stacks displays, the first one added that renders a cell wins.
#[derive(Default)]
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}
impl<'a> LayeredDisplay<'a> {
    pub fn new() -> LayeredDisplay<'a> {
        LayeredDisplay { layers: vec![] }
    }

    pub fn with_layer(mut self, layer: &'a dyn GridDisplay) -> LayeredDisplay<'a> {
        self.layers.push(layer);
        self
    }
}
impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<String> {
        self.layers.iter().filter_map(|layer| layer.render_cell_body(coord)).next()
    }
}

/// A grid paired with an optional text overlay, ready for `Display`.
pub struct GridView<'a> {
    grid: &'a Grid,
    grid_display: Option<&'a dyn GridDisplay>,
}

impl Grid {
    pub fn display_with<'a>(&'a self, grid_display: &'a dyn GridDisplay) -> GridView<'a> {
        GridView {
            grid: self,
            grid_display: Some(grid_display),
        }
    }
}

impl<'a> fmt::Display for GridView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_RD: &str = "┌";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";

        let horizontal_boundary = WALL_LR.repeat(self.grid.side_length().0 * 3);

        let mut output = String::from(WALL_RD);
        output.push_str(&horizontal_boundary);
        output.push_str(WALL_LD);
        output.push('\n');

        for row in self.grid.iter_row() {
            output.push_str(WALL_UD);
            for cell_coord in row {
                let overlay = self.grid_display.and_then(|d| d.render_cell_body(cell_coord));
                match overlay {
                    Some(body) => output.push_str(&body),
                    None if self.grid.is_open(cell_coord) => output.push_str(BLANK_BODY),
                    None => output.push_str(WALL_BODY),
                }
            }
            output.push_str(WALL_UD);
            output.push('\n');
        }

        output.push_str(WALL_RU);
        output.push_str(&horizontal_boundary);
        output.push_str(WALL_LU);
        output.push('\n');

        write!(f, "{}", output)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let plain = GridView {
            grid: self,
            grid_display: None,
        };
        write!(f, "{}", plain)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::SideLength;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn corridor_grid() -> Grid {
        let mut g = Grid::new(SideLength(2)).unwrap();
        g.set_open(gc(0, 0)).unwrap();
        g.set_open(gc(1, 0)).unwrap();
        g.set_open(gc(1, 1)).unwrap();
        g
    }

    #[test]
    fn plain_rendering() {
        let g = corridor_grid();
        let expected = "┌──────┐\n\
                        │      │\n\
                        │███   │\n\
                        └──────┘\n";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn overlay_rendering() {
        let g = corridor_grid();
        let ends = StartEndPointsDisplay::new(Endpoints::new(gc(0, 0), gc(1, 1)));
        let path = PathDisplay::new(&[gc(0, 0), gc(1, 0), gc(1, 1)]);
        let layers = LayeredDisplay::new().with_layer(&ends).with_layer(&path);

        let expected = "┌──────┐\n\
                        │ S  * │\n\
                        │███ E │\n\
                        └──────┘\n";
        assert_eq!(format!("{}", g.display_with(&layers)), expected);
    }

    #[test]
    fn repeated_cells_mark_once() {
        let path = PathDisplay::new(&[gc(0, 0), gc(0, 0), gc(1, 0)]);
        assert_eq!(path.on_path_coordinates.len(), 2);
        assert_eq!(path.render_cell_body(gc(0, 0)), Some(String::from(" * ")));
        assert_eq!(path.render_cell_body(gc(0, 1)), None);

        let visited = VisitedDisplay::new(&[]);
        assert!(visited.visited_coordinates.is_empty());
        assert_eq!(visited.render_cell_body(gc(0, 0)), None);
    }

    #[test]
    fn later_layers_fill_gaps() {
        let visited = VisitedDisplay::new(&[gc(1, 0)]);
        let path = PathDisplay::new(&[gc(0, 0)]);
        let layers = LayeredDisplay::new().with_layer(&path).with_layer(&visited);
        assert_eq!(layers.render_cell_body(gc(0, 0)), Some(String::from(" * ")));
        assert_eq!(layers.render_cell_body(gc(1, 0)), Some(String::from(" . ")));
        assert_eq!(layers.render_cell_body(gc(1, 1)), None);
    }
}
