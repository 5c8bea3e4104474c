//! **mazer-core** — core types shared by the maze generator, the search
//! engine and the session layer.
//!
//! This crate provides geometry primitives, the [`Grid`] of [`Tile`] states
//! with its Start/End invariant, and the boundary-validated [`MazeConfig`].

pub mod config;
pub mod geom;
pub mod grid;
pub mod tile;

pub use config::{Algorithm, ConfigError, MAX_SPEED, MIN_SPEED, MazeConfig, ParseAlgorithmError};
pub use geom::{Point, Range};
pub use grid::{Endpoint, Grid, GridError, MAX_SIZE, MIN_SIZE};
pub use tile::Tile;
