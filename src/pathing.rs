// Breadth first search, one dequeued cell per step.
//
// The search does not own any timing. A caller that wants to animate the search pulls one step,
// draws `visited()`, waits however long it likes and pulls the next one. Dropping the search part way
// through is always safe as the grid is only ever borrowed immutably.
//
// Every move costs the same, so the first time the end cell comes off the FIFO frontier it has been
// reached by a minimal number of moves and the recorded route to it is a shortest path.

use std::collections::hash_map::Entry;
use std::collections::VecDeque;
use std::iter::FusedIterator;

use fnv::FnvHashMap;
use log::{debug, trace};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, Endpoints};
use crate::errors::*;
use crate::grid::Grid;

/// One observable event of a search.
#[derive(Eq, PartialEq, Clone, Debug)]
pub enum SolveStep {
    /// A cell was taken off the frontier. Emitted once per cell, in breadth first order.
    Visited(Cartesian2DCoordinate),
    /// The end was reached; the shortest path from start to end inclusive.
    Found(Vec<Cartesian2DCoordinate>),
    /// Every cell reachable from the start was visited without meeting the end.
    NotFound,
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum SearchOutcome {
    Found(Vec<Cartesian2DCoordinate>),
    NotFound,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum SearchState {
    Searching,
    Reached,
    Finished,
}

/// A breadth first search over the open cells of a grid, moving North, South, East or West.
///
/// Iterating yields a `SolveStep::Visited` for every dequeued cell followed by exactly one
/// `SolveStep::Found` or `SolveStep::NotFound`, after which the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct BreadthFirstSearch<'a> {
    grid: &'a Grid,
    endpoints: Endpoints,
    frontier: VecDeque<Cartesian2DCoordinate>,
    // Filled in when a cell is enqueued, not when it is dequeued, so a cell bordering several
    // frontier cells is still only enqueued once. Doubles as the visited set.
    came_from: FnvHashMap<Cartesian2DCoordinate, Option<Cartesian2DCoordinate>>,
    visited: Vec<Cartesian2DCoordinate>,
    path: Vec<Cartesian2DCoordinate>,
    state: SearchState,
}

impl<'a> BreadthFirstSearch<'a> {
    /// Prepare a search between any two cells of the grid.
    ///
    /// Fails with `OutOfBounds` if either endpoint is not on the grid.
    pub fn new(grid: &'a Grid, endpoints: Endpoints) -> Result<BreadthFirstSearch<'a>> {
        for endpoint in &[endpoints.start, endpoints.end] {
            if !grid.is_valid_coordinate(*endpoint) {
                return Err(ErrorKind::OutOfBounds(*endpoint, grid.side_length().0).into());
            }
        }

        let open_count = grid.open_cells_count().0;
        let mut search = BreadthFirstSearch {
            grid,
            endpoints,
            frontier: VecDeque::new(),
            came_from: FnvHashMap::with_capacity_and_hasher(open_count, Default::default()),
            visited: Vec::with_capacity(open_count),
            path: vec![],
            state: SearchState::Searching,
        };
        search.restart();
        Ok(search)
    }

    /// Throw away all progress and begin again from the start cell. The same grid and endpoints
    /// always replay the same steps.
    pub fn restart(&mut self) {
        self.frontier.clear();
        self.came_from.clear();
        self.visited.clear();
        self.path.clear();

        let start = self.endpoints.start;
        self.frontier.push_back(start);
        self.came_from.insert(start, None);
        self.state = SearchState::Searching;
    }

    #[inline]
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    /// Cells dequeued so far, in order.
    #[inline]
    pub fn visited(&self) -> &[Cartesian2DCoordinate] {
        &self.visited
    }

    /// The shortest path once the end has been reached, empty before that or if it is unreachable.
    #[inline]
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        &self.path
    }

    /// None while the search is still running.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Searching => None,
            SearchState::Reached => Some(SearchOutcome::Found(self.path.clone())),
            SearchState::Finished if self.path.is_empty() => Some(SearchOutcome::NotFound),
            SearchState::Finished => Some(SearchOutcome::Found(self.path.clone())),
        }
    }

    /// Take every remaining step without pausing.
    pub fn run_to_completion(mut self) -> Solution {
        self.by_ref().for_each(drop);
        let outcome = self.outcome().unwrap_or(SearchOutcome::NotFound);
        Solution {
            visited: self.visited,
            outcome,
        }
    }

    fn visit(&mut self, coord: Cartesian2DCoordinate) {
        self.visited.push(coord);
        trace!("Visited {} (step {})", coord, self.visited.len());

        if coord == self.endpoints.end {
            self.path = self.route_to(coord);
            self.state = SearchState::Reached;
            debug!("Reached {} after {} steps, path of {} cells",
                   coord,
                   self.visited.len(),
                   self.path.len());
            return;
        }

        for dir in &CompassPrimary::PROBE_ORDER {
            let neighbour = match self.grid.neighbour_at_direction(coord, *dir) {
                Some(n) if self.grid.is_open(n) => n,
                _ => continue,
            };
            if let Entry::Vacant(entry) = self.came_from.entry(neighbour) {
                entry.insert(Some(coord));
                self.frontier.push_back(neighbour);
            }
        }
    }

    fn route_to(&self, end: Cartesian2DCoordinate) -> Vec<Cartesian2DCoordinate> {
        let mut route = vec![end];
        let mut current = end;
        while let Some(&Some(previous)) = self.came_from.get(&current) {
            route.push(previous);
            current = previous;
        }
        route.reverse();
        route
    }
}

impl<'a> Iterator for BreadthFirstSearch<'a> {
    type Item = SolveStep;

    fn next(&mut self) -> Option<SolveStep> {
        match self.state {
            SearchState::Searching => {
                if let Some(coord) = self.frontier.pop_front() {
                    self.visit(coord);
                    Some(SolveStep::Visited(coord))
                } else {
                    debug!("No path from {} to {}, {} cells visited",
                           self.endpoints.start,
                           self.endpoints.end,
                           self.visited.len());
                    self.state = SearchState::Finished;
                    Some(SolveStep::NotFound)
                }
            }
            SearchState::Reached => {
                self.state = SearchState::Finished;
                Some(SolveStep::Found(self.path.clone()))
            }
            SearchState::Finished => None,
        }
    }
}

impl<'a> FusedIterator for BreadthFirstSearch<'a> {}

/// The record of a finished search.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Solution {
    visited: Vec<Cartesian2DCoordinate>,
    outcome: SearchOutcome,
}

impl Solution {
    #[inline]
    pub fn visited(&self) -> &[Cartesian2DCoordinate] {
        &self.visited
    }

    #[inline]
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        match self.outcome {
            SearchOutcome::Found(ref path) => path,
            SearchOutcome::NotFound => &[],
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.outcome != SearchOutcome::NotFound
    }

    /// How many cells were dequeued.
    #[inline]
    pub fn steps_count(&self) -> usize {
        self.visited.len()
    }

    /// Cells on the path, start and end included. Zero when there is no path.
    #[inline]
    pub fn path_length(&self) -> usize {
        self.path().len()
    }
}

/// Search from start to end in one go.
pub fn solve(grid: &Grid, endpoints: Endpoints) -> Result<Solution> {
    Ok(BreadthFirstSearch::new(grid, endpoints)?.run_to_completion())
}

#[cfg(test)]
mod tests {

    use fnv::FnvHashSet;
    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::analysis::MazeGraph;
    use crate::generators;
    use crate::units::SideLength;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn is_adjacent(a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let dx = (a.x as i64 - b.x as i64).abs();
        let dy = (a.y as i64 - b.y as i64).abs();
        dx + dy == 1
    }

    fn maze(side: usize, seed: u64) -> Grid {
        let side = SideLength(side);
        let mut g = Grid::new(side).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        generators::recursive_backtracker(&mut g, &mut rng, Endpoints::corners(side)).unwrap();
        g
    }

    #[test]
    fn open_grid_shortest_path() {
        let g = Grid::fully_open(SideLength(4)).unwrap();
        let solution = solve(&g, Endpoints::new(gc(0, 0), gc(3, 3))).unwrap();

        assert!(solution.is_found());
        assert_eq!(solution.path_length(), 7);
        assert_eq!(solution.path().first(), Some(&gc(0, 0)));
        assert_eq!(solution.path().last(), Some(&gc(3, 3)));
        assert!(solution.path().windows(2).all(|pair| is_adjacent(pair[0], pair[1])));
        assert!(solution.path().iter().all(|coord| g.is_open(*coord)));
    }

    #[test]
    fn walled_off_end_is_not_found() {
        let mut g = Grid::fully_open(SideLength(3)).unwrap();
        g.set_wall(gc(1, 2)).unwrap();
        g.set_wall(gc(2, 1)).unwrap();

        let solution = solve(&g, Endpoints::new(gc(0, 0), gc(2, 2))).unwrap();
        assert_eq!(*solution.outcome(), SearchOutcome::NotFound);
        assert!(solution.path().is_empty());
        assert_eq!(solution.path_length(), 0);
        // Every open cell except the isolated corner.
        assert_eq!(solution.steps_count(), 6);
        assert!(!solution.visited().contains(&gc(2, 2)));
    }

    #[test]
    fn step_sequence() {
        let g = Grid::fully_open(SideLength(2)).unwrap();
        let steps = BreadthFirstSearch::new(&g, Endpoints::new(gc(0, 0), gc(1, 1)))
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(steps,
                   vec![SolveStep::Visited(gc(0, 0)),
                        SolveStep::Visited(gc(0, 1)),
                        SolveStep::Visited(gc(1, 0)),
                        SolveStep::Visited(gc(1, 1)),
                        SolveStep::Found(vec![gc(0, 0), gc(0, 1), gc(1, 1)])]);
    }

    #[test]
    fn unreachable_end_step_sequence() {
        let mut g = Grid::new(SideLength(2)).unwrap();
        g.set_open(gc(0, 0)).unwrap();
        g.set_open(gc(1, 1)).unwrap();
        let mut search = BreadthFirstSearch::new(&g, Endpoints::new(gc(0, 0), gc(1, 1))).unwrap();
        assert_eq!(search.next(), Some(SolveStep::Visited(gc(0, 0))));
        assert_eq!(search.outcome(), None);
        assert_eq!(search.next(), Some(SolveStep::NotFound));
        assert_eq!(search.outcome(), Some(SearchOutcome::NotFound));
        assert_eq!(search.next(), None);
        assert_eq!(search.next(), None);
    }

    #[test]
    fn start_is_end() {
        let g = Grid::fully_open(SideLength(3)).unwrap();
        let start = gc(1, 1);
        let steps = BreadthFirstSearch::new(&g, Endpoints::new(start, start))
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(steps, vec![SolveStep::Visited(start), SolveStep::Found(vec![start])]);
    }

    #[test]
    fn endpoints_must_be_on_the_grid() {
        let g = Grid::fully_open(SideLength(3)).unwrap();
        assert!(BreadthFirstSearch::new(&g, Endpoints::new(gc(3, 0), gc(0, 0))).is_err());
        let err = solve(&g, Endpoints::new(gc(0, 0), gc(0, 9))).unwrap_err();
        match *err.kind() {
            ErrorKind::OutOfBounds(coord, 3) => assert_eq!(coord, gc(0, 9)),
            ref other => panic!("unexpected error kind {:?}", other),
        }
    }

    #[test]
    fn solving_twice_is_identical() {
        let g = maze(15, 99);
        let endpoints = Endpoints::corners(SideLength(15));
        let first = solve(&g, endpoints).unwrap();
        let second = solve(&g, endpoints).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn restart_replays_the_same_steps() {
        let g = maze(11, 7);
        let mut search = BreadthFirstSearch::new(&g, Endpoints::corners(SideLength(11))).unwrap();

        let first_run = search.by_ref().collect::<Vec<_>>();
        let first_path = search.path().to_vec();
        search.restart();
        assert!(search.visited().is_empty());
        assert!(search.path().is_empty());
        assert_eq!(search.outcome(), None);

        let second_run = search.by_ref().collect::<Vec<_>>();
        assert_eq!(first_run, second_run);
        assert_eq!(first_path, search.path());
    }

    #[test]
    fn abandoned_search_can_restart() {
        let g = maze(9, 3);
        let endpoints = Endpoints::corners(SideLength(9));
        let mut search = BreadthFirstSearch::new(&g, endpoints).unwrap();
        let partial = search.by_ref().take(5).collect::<Vec<_>>();
        assert_eq!(partial.len(), 5);
        assert_eq!(search.visited().len(), 5);

        search.restart();
        assert_eq!(search.run_to_completion(), solve(&g, endpoints).unwrap());
    }

    #[test]
    fn visited_record_grows_one_cell_per_step() {
        let g = maze(13, 21);
        let mut search = BreadthFirstSearch::new(&g, Endpoints::corners(SideLength(13))).unwrap();
        let mut expected_len = 0;
        while let Some(step) = search.next() {
            if let SolveStep::Visited(coord) = step {
                expected_len += 1;
                assert_eq!(search.visited().len(), expected_len);
                assert_eq!(search.visited().last(), Some(&coord));
            }
        }
    }

    #[test]
    fn even_sized_maze_is_solvable() {
        for seed in 0..10 {
            let g = maze(20, seed);
            let solution = solve(&g, Endpoints::corners(SideLength(20))).unwrap();
            assert!(solution.is_found());
        }
    }

    #[test]
    fn quickcheck_maze_paths_are_shortest() {
        fn p(size: u8, seed: u64) -> TestResult {
            let side = (size % 32) as usize;
            if side < 2 {
                return TestResult::discard();
            }
            let g = maze(side, seed);
            let endpoints = Endpoints::corners(SideLength(side));
            let solution = solve(&g, endpoints).unwrap();
            let hops = MazeGraph::from_grid(&g).shortest_hops(endpoints.start, endpoints.end);

            TestResult::from_bool(solution.is_found() &&
                                  hops.map(|h| h + 1) == Some(solution.path_length()))
        }
        quickcheck(p as fn(u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_cells_visited_once() {
        fn p(size: u8, seed: u64) -> TestResult {
            let side = (size % 32) as usize;
            if side < 1 {
                return TestResult::discard();
            }
            let g = maze(side, seed);
            let solution = solve(&g, Endpoints::corners(SideLength(side))).unwrap();
            let unique = solution.visited().iter().cloned().collect::<FnvHashSet<_>>();
            TestResult::from_bool(unique.len() == solution.steps_count())
        }
        quickcheck(p as fn(u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_open_grid_paths_are_shortest() {
        fn p(size: u8, x1: u8, y1: u8, x2: u8, y2: u8) -> TestResult {
            let side = (size % 16) as u32;
            if side < 1 {
                return TestResult::discard();
            }
            let g = Grid::fully_open(SideLength(side as usize)).unwrap();
            let start = gc(x1 as u32 % side, y1 as u32 % side);
            let end = gc(x2 as u32 % side, y2 as u32 % side);
            let solution = solve(&g, Endpoints::new(start, end)).unwrap();

            let manhattan = (start.x as i64 - end.x as i64).abs() + (start.y as i64 - end.y as i64).abs();
            TestResult::from_bool(solution.path_length() as i64 == manhattan + 1)
        }
        quickcheck(p as fn(u8, u8, u8, u8, u8) -> TestResult);
    }
}
