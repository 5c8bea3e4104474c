//! Path search over maze grids.
//!
//! Four algorithms share one neighbour-expansion scheme and one per-run
//! node state machine (unvisited → frontier → settled):
//!
//! - **A\*** shortest path ([`SearchSpace::astar`])
//! - **Dijkstra** shortest path ([`SearchSpace::dijkstra`])
//! - **BFS** shortest path by edge count ([`SearchSpace::bfs`])
//! - **DFS** any path, depth first ([`SearchSpace::dfs`])
//!
//! Each returns a [`Search`]: the path from start to end (empty when
//! unreachable) and the order cells were settled in, for replay.
//! Searches never mutate the grid and keep no state between calls.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A*, algorithm dispatch |
//!
//! [`GridPather`] implements all three for a [`mazer_core::Grid`].

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod pather;
mod search;
mod space;
mod traits;

pub use distance::manhattan;
pub use pather::GridPather;
pub use search::{is_connected, solve};
pub use space::{Search, SearchSpace};
pub use traits::{AstarPather, Pather, WeightedPather};
