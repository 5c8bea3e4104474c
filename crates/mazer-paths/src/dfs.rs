use mazer_core::Point;

use crate::space::{Search, SearchSpace};
use crate::traits::Pather;

impl SearchSpace {
    /// Path from `from` to `to` using depth-first search.
    ///
    /// A LIFO stack with cells marked at push time. The path follows the
    /// first branch that happens to reach the goal and is not necessarily
    /// shortest. With neighbours pushed up, right, down, left, the last
    /// pushed (left) is expanded first.
    pub fn dfs<P: Pather>(&self, pather: &P, from: Point, to: Point) -> Search {
        self.uninformed(pather, from, to, Vec::new())
    }
}
