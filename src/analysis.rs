//! A graph view of a grid's open cells, built independently of the generator and the solver so
//! that their results can be checked against petgraph's own algorithms.

use std::fmt;

use fnv::FnvHashMap;
use petgraph::algo::{connected_components, dijkstra, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, Endpoints};
use crate::grid::Grid;
use crate::maze::Maze;

/// Open cells as nodes, with an edge between every pair of 4-adjacent open cells.
#[derive(Debug, Clone)]
pub struct MazeGraph {
    graph: UnGraph<Cartesian2DCoordinate, ()>,
    nodes: FnvHashMap<Cartesian2DCoordinate, NodeIndex>,
}

impl MazeGraph {
    pub fn from_grid(grid: &Grid) -> MazeGraph {
        let open_count = grid.open_cells_count().0;
        let mut graph = UnGraph::with_capacity(open_count, 2 * open_count);
        let mut nodes = FnvHashMap::with_capacity_and_hasher(open_count, Default::default());

        for coord in grid.iter_open() {
            let node = graph.add_node(coord);
            nodes.insert(coord, node);
        }

        // Looking only east and south adds each passage once.
        for coord in grid.iter_open() {
            for dir in &[CompassPrimary::East, CompassPrimary::South] {
                let open_neighbour = grid.neighbour_at_direction(coord, *dir)
                    .filter(|neighbour| grid.is_open(*neighbour));
                if let Some(neighbour) = open_neighbour {
                    let _ = graph.add_edge(nodes[&coord], nodes[&neighbour], ());
                }
            }
        }

        MazeGraph { graph, nodes }
    }

    #[inline]
    pub fn open_cells_count(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn passages_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn connected_components(&self) -> usize {
        connected_components(&self.graph)
    }

    pub fn has_cycles(&self) -> bool {
        is_cyclic_undirected(&self.graph)
    }

    /// Connected and acyclic: exactly one simple route between any two open cells.
    pub fn is_perfect(&self) -> bool {
        self.connected_components() == 1 && !self.has_cycles()
    }

    /// Number of moves on the shortest route between two open cells, None if either is not open
    /// or they are not connected.
    pub fn shortest_hops(&self, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) -> Option<usize> {
        let from_node = *self.nodes.get(&from)?;
        let to_node = *self.nodes.get(&to)?;
        let hops = dijkstra(&self.graph, from_node, Some(to_node), |_| 1usize);
        hops.get(&to_node).cloned()
    }

    /// Open cells with exactly one way in or out, in row major order.
    pub fn dead_ends(&self) -> Vec<Cartesian2DCoordinate> {
        let mut ends = self.graph
            .node_indices()
            .filter(|node| self.graph.neighbors(*node).count() == 1)
            .map(|node| self.graph[node])
            .collect::<Vec<_>>();
        ends.sort_by_key(|coord| (coord.y, coord.x));
        ends
    }
}

/// Summary numbers about a maze and the route between its endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeStats {
    pub open_cells: usize,
    pub passages: usize,
    pub connected_components: usize,
    pub dead_ends: usize,
    pub has_cycles: bool,
    pub shortest_hops: Option<usize>,
}

impl MazeStats {
    pub fn for_grid(grid: &Grid, endpoints: Endpoints) -> MazeStats {
        let graph = MazeGraph::from_grid(grid);
        MazeStats {
            open_cells: graph.open_cells_count(),
            passages: graph.passages_count(),
            connected_components: graph.connected_components(),
            dead_ends: graph.dead_ends().len(),
            has_cycles: graph.has_cycles(),
            shortest_hops: graph.shortest_hops(endpoints.start, endpoints.end),
        }
    }

    pub fn for_maze(maze: &Maze) -> MazeStats {
        MazeStats::for_grid(maze.grid(), maze.endpoints())
    }
}

impl fmt::Display for MazeStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Open cells:           {}", self.open_cells)?;
        writeln!(f, "Passages:             {}", self.passages)?;
        writeln!(f, "Connected components: {}", self.connected_components)?;
        writeln!(f, "Dead ends:            {}", self.dead_ends)?;
        writeln!(f, "Has cycles:           {}", self.has_cycles)?;
        match self.shortest_hops {
            Some(hops) => write!(f, "Shortest route:       {} moves", hops),
            None => write!(f, "Shortest route:       none"),
        }
    }
}
