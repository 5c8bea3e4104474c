use mazer_core::Point;

use crate::space::{Search, SearchSpace};
use crate::traits::WeightedPather;

impl SearchSpace {
    /// Shortest path from `from` to `to` using Dijkstra's algorithm.
    ///
    /// Same frontier discipline as [`astar`](Self::astar) with a zero
    /// heuristic: cells are settled by accumulated cost alone, ties going
    /// to the earliest inserted.
    pub fn dijkstra<P: WeightedPather>(&self, pather: &P, from: Point, to: Point) -> Search {
        self.best_first(pather, from, to, |_| 0)
    }
}
