use mazer_core::Point;

/// Minimal search interface: neighbour enumeration.
///
/// Neighbours must be appended in a fixed order; the engine's tie-breaking
/// and DFS's path shape follow it.
pub trait Pather {
    /// Append the passable neighbours of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether a search may start or end on `p`. Searches from or to a
    /// cell that is not passable find nothing.
    fn passable(&self, _p: Point) -> bool {
        true
    }
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Pather with an admissible heuristic, as A* requires.
pub trait AstarPather: WeightedPather {
    /// Estimate of the remaining cost from `from` to `to`.
    /// Must never overestimate the true cost.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
