use mazer_core::{Grid, Point, Range};

use crate::traits::Pather;

/// Result of one search: the path and the order cells were settled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Search {
    /// Start to end inclusive, or empty when the end is unreachable.
    pub path: Vec<Point>,
    /// Settled cells in order, excluding the start and end.
    pub explored: Vec<Point>,
}

impl Search {
    /// Whether a path was found.
    #[inline]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path (cells minus one), 0 when not found.
    #[inline]
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    fn trivial(p: Point) -> Self {
        Self {
            path: vec![p],
            explored: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-run node table
// ---------------------------------------------------------------------------

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Search progress of a single cell within one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum NodeState {
    #[default]
    Unvisited,
    /// Discovered and enqueued.
    Frontier,
    /// Dequeued and expanded; never revisited.
    Settled,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    /// Insertion rank into the frontier, kept across in-place updates.
    pub(crate) seq: u32,
    pub(crate) state: NodeState,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: NO_PARENT,
            seq: 0,
            state: NodeState::Unvisited,
        }
    }
}

/// Frontier entry for `BinaryHeap`, ordered by lowest `f` then earliest
/// insertion.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so the max-heap pops the smallest (f, seq) first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// The rectangle searches run over.
///
/// A `SearchSpace` holds no search state: every call allocates its own node
/// table, so results never depend on earlier runs and the grid is only
/// read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSpace {
    pub(crate) rng: Range,
    pub(crate) width: usize,
}

impl SearchSpace {
    /// Create a search space for the given rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
        }
    }

    /// Search space covering a whole grid.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    pub(crate) fn nodes(&self) -> Vec<Node> {
        vec![Node::default(); self.rng.len()]
    }

    /// Resolve both endpoints to indices, or return the finished result for
    /// the degenerate cases: an endpoint outside the space or not passable
    /// (no path) and `from == to` (a one-cell path).
    pub(crate) fn endpoints<P: Pather>(
        &self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<(usize, usize), Search> {
        let (Some(si), Some(gi)) = (self.idx(from), self.idx(to)) else {
            return Err(Search::default());
        };
        if !pather.passable(from) || !pather.passable(to) {
            return Err(Search::default());
        }
        if si == gi {
            return Err(Search::trivial(from));
        }
        Ok((si, gi))
    }

    /// Follow predecessor links from `goal` back to the start.
    pub(crate) fn trace(&self, nodes: &[Node], goal: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    use mazer_core::Algorithm;

    use crate::GridPather;

    #[test]
    fn idx_and_point_are_inverse() {
        let sp = SearchSpace::new(Range::new(2, 3, 7, 9));
        for p in sp.range() {
            let i = sp.idx(p).unwrap();
            assert_eq!(sp.point(i), p);
        }
        assert_eq!(sp.idx(Point::new(0, 0)), None);
    }

    #[test]
    fn heap_pops_lowest_f_then_earliest() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 3, seq: 2 });
        heap.push(NodeRef { idx: 2, f: 3, seq: 1 });
        heap.push(NodeRef { idx: 3, f: 4, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|r| r.idx)).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }

    #[test]
    fn degenerate_endpoints() {
        let grid = Grid::new(5);
        let sp = SearchSpace::for_grid(&grid);
        let pather = GridPather::new(&grid);
        let p = Point::new(1, 1);
        assert_eq!(
            sp.endpoints(&pather, p, p),
            Err(Search {
                path: vec![p],
                explored: vec![]
            })
        );
        assert_eq!(sp.endpoints(&pather, p, Point::new(9, 9)), Err(Search::default()));
        assert!(sp.endpoints(&pather, p, Point::new(2, 2)).is_ok());
    }

    #[test]
    fn wall_endpoints_find_nothing() {
        let grid = Grid::parse(
            "\
S#.
..E",
        )
        .unwrap();
        let sp = SearchSpace::for_grid(&grid);
        let pather = GridPather::new(&grid);
        let wall = Point::new(1, 0);
        assert_eq!(sp.endpoints(&pather, wall, grid.end()), Err(Search::default()));
        assert_eq!(sp.endpoints(&pather, grid.start(), wall), Err(Search::default()));
        assert_eq!(sp.endpoints(&pather, wall, wall), Err(Search::default()));
        for algorithm in Algorithm::ALL {
            assert_eq!(
                sp.search(algorithm, &pather, wall, grid.end()),
                Search::default(),
                "{algorithm} searched from a wall"
            );
            assert_eq!(
                sp.search(algorithm, &pather, grid.start(), wall),
                Search::default(),
                "{algorithm} searched into a wall"
            );
        }
    }

    #[test]
    fn search_counts() {
        let s = Search {
            path: vec![Point::new(0, 0), Point::new(1, 0)],
            explored: vec![],
        };
        assert!(s.found());
        assert_eq!(s.moves(), 1);
        assert_eq!(Search::default().moves(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn search_round_trip() {
        let s = Search {
            path: vec![Point::new(1, 1), Point::new(2, 1)],
            explored: vec![Point::new(1, 2)],
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Search = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
