//! Algorithm dispatch and the grid-level entry points.

use mazer_core::{Algorithm, Grid, Point};

use crate::pather::GridPather;
use crate::space::{Search, SearchSpace};
use crate::traits::AstarPather;

impl SearchSpace {
    /// Run the selected algorithm from `from` to `to`.
    pub fn search<P: AstarPather>(
        &self,
        algorithm: Algorithm,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Search {
        let result = match algorithm {
            Algorithm::AStar => self.astar(pather, from, to),
            Algorithm::Dijkstra => self.dijkstra(pather, from, to),
            Algorithm::Bfs => self.bfs(pather, from, to),
            Algorithm::Dfs => self.dfs(pather, from, to),
        };
        log::debug!(
            "{algorithm} {from} -> {to}: found={} path={} explored={}",
            result.found(),
            result.path.len(),
            result.explored.len()
        );
        result
    }

    /// Whether `to` is reachable from `from`.
    pub fn connected<P: AstarPather>(&self, pather: &P, from: Point, to: Point) -> bool {
        self.astar(pather, from, to).found()
    }

    /// Search a grid from its Start to its End.
    pub fn solve(&self, algorithm: Algorithm, grid: &Grid) -> Search {
        self.search(algorithm, &GridPather::new(grid), grid.start(), grid.end())
    }
}

/// Run `algorithm` on `grid` from Start to End.
pub fn solve(algorithm: Algorithm, grid: &Grid) -> Search {
    SearchSpace::for_grid(grid).solve(algorithm, grid)
}

/// Whether the grid's Start and End are connected.
pub fn is_connected(grid: &Grid) -> bool {
    SearchSpace::for_grid(grid).connected(&GridPather::new(grid), grid.start(), grid.end())
}
