//! Maze configuration and its boundary validation.
//!
//! The generator and search engine trust their inputs; out-of-range values
//! are rejected here, before a [`MazeConfig`] is handed to the core.

use std::fmt;
use std::str::FromStr;

use crate::grid::{MAX_SIZE, MIN_SIZE};

/// Slowest animation speed.
pub const MIN_SPEED: u8 = 1;

/// Fastest animation speed.
pub const MAX_SPEED: u8 = 100;

/// Path search algorithm selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
    Bfs,
    Dfs,
}

impl Algorithm {
    /// Every algorithm, in selector order.
    pub const ALL: [Algorithm; 4] = [Self::AStar, Self::Dijkstra, Self::Bfs, Self::Dfs];

    /// The selector name (`astar`, `dijkstra`, `bfs`, `dfs`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Dijkstra => "dijkstra",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        }
    }

    /// Whether the algorithm always returns a shortest path.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown algorithm selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?} (expected astar, dijkstra, bfs or dfs)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

/// Out-of-range configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("maze size {0} is outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    Size(i32),

    #[error("wall density {0} is outside 0..=100")]
    WallDensity(u8),

    #[error("animation speed {0} is outside {min}..={max}", min = MIN_SPEED, max = MAX_SPEED)]
    Speed(u8),
}

/// User-facing maze settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    /// Side length of the square grid.
    pub size: i32,
    /// Percent in `0..=100`; higher keeps more walls after generation.
    pub wall_density: u8,
    pub algorithm: Algorithm,
    /// Replay speed in `1..=100`; higher is faster. Presentation only.
    pub speed: u8,
    /// Seed for reproducible generation. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 15,
            wall_density: 30,
            algorithm: Algorithm::AStar,
            speed: 50,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Check every field against its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size(self.size)?;
        check_wall_density(self.wall_density)?;
        check_speed(self.speed)?;
        Ok(())
    }

    /// Validate and return `self`, for builder-style construction.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

pub fn check_size(size: i32) -> Result<(), ConfigError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(ConfigError::Size(size))
    }
}

pub fn check_wall_density(density: u8) -> Result<(), ConfigError> {
    if density <= 100 {
        Ok(())
    } else {
        Err(ConfigError::WallDensity(density))
    }
}

pub fn check_speed(speed: u8) -> Result<(), ConfigError> {
    if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
        Ok(())
    } else {
        Err(ConfigError::Speed(speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = MazeConfig::default();
        assert_eq!(cfg.size, 15);
        assert_eq!(cfg.wall_density, 30);
        assert_eq!(cfg.algorithm, Algorithm::AStar);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn bounds_are_enforced() {
        let cfg = MazeConfig {
            size: 26,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Size(26)));

        let cfg = MazeConfig {
            size: 4,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Size(4)));

        let cfg = MazeConfig {
            wall_density: 101,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::WallDensity(101)));

        let cfg = MazeConfig {
            speed: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validated(), Err(ConfigError::Speed(0)));

        assert!(check_size(MIN_SIZE).is_ok());
        assert!(check_size(MAX_SIZE).is_ok());
        assert!(check_wall_density(100).is_ok());
    }

    #[test]
    fn algorithm_names_round_trip() {
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!(" BFS ".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!(
            "greedy".parse::<Algorithm>(),
            Err(ParseAlgorithmError("greedy".into()))
        );
        assert!(!Algorithm::Dfs.is_optimal());
        assert!(Algorithm::Dijkstra.is_optimal());
    }
}
