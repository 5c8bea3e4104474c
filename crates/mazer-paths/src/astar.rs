use std::collections::BinaryHeap;

use mazer_core::Point;

use crate::space::{NodeRef, NodeState, Search, SearchSpace};
use crate::traits::{AstarPather, WeightedPather};

impl SearchSpace {
    /// Shortest path from `from` to `to` using A*.
    ///
    /// The frontier is ordered by `f = g + h` with `h` the pather's
    /// estimate; equal `f` values go to the entry inserted first. A frontier
    /// cell reached again with a smaller `g` is updated in place and keeps
    /// its insertion rank.
    pub fn astar<P: AstarPather>(&self, pather: &P, from: Point, to: Point) -> Search {
        self.best_first(pather, from, to, |p| pather.estimate(p, to))
    }

    /// Best-first search shared by A* and Dijkstra.
    pub(crate) fn best_first<P: WeightedPather>(
        &self,
        pather: &P,
        from: Point,
        to: Point,
        estimate: impl Fn(Point) -> i32,
    ) -> Search {
        let (start_idx, goal_idx) = match self.endpoints(pather, from, to) {
            Ok(ends) => ends,
            Err(done) => return done,
        };

        let mut nodes = self.nodes();
        let mut explored = Vec::new();
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq: u32 = 0;

        {
            let node = &mut nodes[start_idx];
            node.f = estimate(from);
            node.state = NodeState::Frontier;
            open.push(NodeRef {
                idx: start_idx,
                f: node.f,
                seq,
            });
        }

        let mut nbuf = Vec::with_capacity(4);

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip entries superseded by an in-place update or already settled.
            if nodes[ci].state != NodeState::Frontier || nodes[ci].f != current.f {
                continue;
            }

            if ci == goal_idx {
                return Search {
                    path: self.trace(&nodes, goal_idx),
                    explored,
                };
            }

            nodes[ci].state = NodeState::Settled;
            let current_g = nodes[ci].g;
            let current_point = self.point(ci);
            if ci != start_idx {
                explored.push(current_point);
            }

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut nodes[ni];
                match n.state {
                    NodeState::Settled => continue,
                    NodeState::Frontier => {
                        if tentative_g >= n.g {
                            continue;
                        }
                    }
                    NodeState::Unvisited => {
                        seq += 1;
                        n.seq = seq;
                        n.state = NodeState::Frontier;
                    }
                }

                n.g = tentative_g;
                n.f = tentative_g + estimate(np);
                n.parent = ci;

                open.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    seq: n.seq,
                });
            }
        }

        Search {
            path: Vec::new(),
            explored,
        }
    }
}
