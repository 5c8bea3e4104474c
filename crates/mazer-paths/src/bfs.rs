use std::collections::VecDeque;

use mazer_core::Point;

use crate::space::{NodeState, Search, SearchSpace};
use crate::traits::Pather;

/// Frontier container for the uninformed searches. The discipline of
/// `take` (FIFO or LIFO) is the only difference between BFS and DFS.
pub(crate) trait Fringe {
    fn put(&mut self, idx: usize);
    fn take(&mut self) -> Option<usize>;
}

impl Fringe for VecDeque<usize> {
    fn put(&mut self, idx: usize) {
        self.push_back(idx);
    }

    fn take(&mut self) -> Option<usize> {
        self.pop_front()
    }
}

impl Fringe for Vec<usize> {
    fn put(&mut self, idx: usize) {
        self.push(idx);
    }

    fn take(&mut self) -> Option<usize> {
        self.pop()
    }
}

impl SearchSpace {
    /// Path from `from` to `to` using breadth-first search.
    ///
    /// Cells are marked at enqueue time, so each is queued at most once and
    /// the path is shortest by edge count.
    pub fn bfs<P: Pather>(&self, pather: &P, from: Point, to: Point) -> Search {
        self.uninformed(pather, from, to, VecDeque::new())
    }

    /// Uninformed search shared by BFS and DFS.
    pub(crate) fn uninformed<P: Pather, F: Fringe>(
        &self,
        pather: &P,
        from: Point,
        to: Point,
        mut fringe: F,
    ) -> Search {
        let (start_idx, goal_idx) = match self.endpoints(pather, from, to) {
            Ok(ends) => ends,
            Err(done) => return done,
        };

        let mut nodes = self.nodes();
        let mut explored = Vec::new();
        nodes[start_idx].state = NodeState::Frontier;
        fringe.put(start_idx);

        let mut nbuf = Vec::with_capacity(4);

        while let Some(ci) = fringe.take() {
            if ci == goal_idx {
                return Search {
                    path: self.trace(&nodes, goal_idx),
                    explored,
                };
            }

            nodes[ci].state = NodeState::Settled;
            let cp = self.point(ci);
            if ci != start_idx {
                explored.push(cp);
            }
            let depth = nodes[ci].g;

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut nodes[ni];
                if n.state != NodeState::Unvisited {
                    continue;
                }
                n.state = NodeState::Frontier;
                n.parent = ci;
                n.g = depth + 1;
                fringe.put(ni);
            }
        }

        Search {
            path: Vec::new(),
            explored,
        }
    }
}
