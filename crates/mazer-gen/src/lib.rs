//! Random maze generation for mazer grids.

pub mod mapgen;

pub use mapgen::{DEFAULT_OPENING_SCALE, MazeGen};
