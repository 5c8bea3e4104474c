//! The interactive maze-solver state: configuration, grid and the running
//! replay, with the operations a front end exposes as controls.

use std::time::Duration;

use mazer_core::{
    Algorithm, ConfigError, Grid, GridError, MazeConfig, Point, Range, config,
};
use mazer_gen::MazeGen;
use mazer_paths::{Search, SearchSpace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::replay::{Replay, ReplayEvent};

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a replay is running")]
    Busy,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Summary of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    pub algorithm: Algorithm,
    pub found: bool,
    /// Cells on the path, endpoints included.
    pub path_len: usize,
    pub explored: usize,
}

impl SolveReport {
    fn new(algorithm: Algorithm, search: &Search) -> Self {
        Self {
            algorithm,
            found: search.found(),
            path_len: search.path.len(),
            explored: search.explored.len(),
        }
    }
}

/// A maze, its settings and the replay of the last solve.
#[derive(Debug)]
pub struct Session {
    config: MazeConfig,
    grid: Grid,
    space: SearchSpace,
    last: Option<Search>,
    replay: Option<Replay>,
}

impl Session {
    /// Start with an empty grid of the configured size.
    pub fn new(config: MazeConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let grid = Grid::new(config.size);
        Ok(Self {
            space: SearchSpace::for_grid(&grid),
            config,
            grid,
            last: None,
            replay: None,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bounds(&self) -> Range {
        self.grid.bounds()
    }

    /// Result of the most recent solve, if the grid has not changed since.
    pub fn last_search(&self) -> Option<&Search> {
        self.last.as_ref()
    }

    pub fn replay(&self) -> Option<&Replay> {
        self.replay.as_ref()
    }

    /// Whether a replay is in progress. Grid edits are refused meanwhile.
    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    // -----------------------------------------------------------------------
    // Grid lifecycle
    // -----------------------------------------------------------------------

    /// Replace the grid with a freshly generated maze.
    pub fn generate<R: Rng>(&mut self, rng: R) {
        self.cancel();
        let mut mg = MazeGen::new(rng);
        self.set_grid(mg.generate(self.config.size, self.config.wall_density));
    }

    /// Generate from the configured seed, or from the thread RNG when no
    /// seed is set.
    pub fn generate_configured(&mut self) {
        match self.config.seed {
            Some(seed) => self.generate(StdRng::seed_from_u64(seed)),
            None => self.generate(rand::rng()),
        }
    }

    /// Empty grid with default endpoints.
    pub fn clear(&mut self) {
        self.cancel();
        self.set_grid(Grid::new(self.config.size));
    }

    /// Remove Visited and Path marks.
    pub fn reset_marks(&mut self) {
        self.cancel();
        let n = self.grid.clear_marks();
        log::debug!("cleared {n} marks");
    }

    /// Flip a wall. Refused while replaying and on endpoints or marks.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        if self.is_replaying() {
            return false;
        }
        let changed = self.grid.toggle_wall(p);
        if changed {
            self.last = None;
        }
        changed
    }

    pub fn move_start(&mut self, p: Point) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.grid.move_start(p)?;
        self.last = None;
        Ok(())
    }

    pub fn move_end(&mut self, p: Point) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.grid.move_end(p)?;
        self.last = None;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Solving and replay
    // -----------------------------------------------------------------------

    /// Run the configured algorithm from Start to End and start replaying
    /// the result. Any running replay is dropped and old marks cleared.
    pub fn solve(&mut self) -> SolveReport {
        self.cancel();
        self.grid.clear_marks();
        let algorithm = self.config.algorithm;
        let search = self.space.solve(algorithm, &self.grid);
        let report = SolveReport::new(algorithm, &search);
        log::info!(
            "{algorithm}: found={} path={} explored={}",
            report.found,
            report.path_len,
            report.explored
        );
        self.replay = Some(Replay::new(&search, self.config.speed));
        self.last = Some(search);
        report
    }

    /// Advance the replay by `dt`, apply due marks to the grid and return
    /// the events that fell due. The replay is dropped once exhausted.
    pub fn tick(&mut self, dt: Duration) -> Vec<ReplayEvent> {
        let Some(replay) = self.replay.as_mut() else {
            return Vec::new();
        };
        let events: Vec<ReplayEvent> = replay.advance(dt).iter().map(|s| s.event).collect();
        let done = replay.is_finished();
        self.apply(&events);
        if done {
            self.replay = None;
        }
        events
    }

    /// Apply every remaining replay step at once.
    pub fn finish(&mut self) -> Vec<ReplayEvent> {
        let Some(mut replay) = self.replay.take() else {
            return Vec::new();
        };
        let events: Vec<ReplayEvent> = replay.finish().iter().map(|s| s.event).collect();
        self.apply(&events);
        events
    }

    fn apply(&mut self, events: &[ReplayEvent]) {
        for event in events {
            match *event {
                ReplayEvent::Visit(p) => {
                    self.grid.mark_visited(p);
                }
                ReplayEvent::Path(p) => {
                    self.grid.mark_path(p);
                }
                ReplayEvent::NotFound => log::info!("no path found"),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Change the maze size. The grid is rebuilt empty.
    pub fn set_size(&mut self, size: i32) -> Result<(), ConfigError> {
        config::check_size(size)?;
        self.config.size = size;
        self.clear();
        Ok(())
    }

    /// Takes effect on the next `generate`.
    pub fn set_wall_density(&mut self, density: u8) -> Result<(), ConfigError> {
        config::check_wall_density(density)?;
        self.config.wall_density = density;
        Ok(())
    }

    /// Takes effect on the next `solve`.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    /// Takes effect on the next `solve`.
    pub fn set_speed(&mut self, speed: u8) -> Result<(), ConfigError> {
        config::check_speed(speed)?;
        self.config.speed = speed;
        Ok(())
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
    }

    fn set_grid(&mut self, grid: Grid) {
        self.space = SearchSpace::for_grid(&grid);
        self.grid = grid;
        self.last = None;
    }

    fn cancel(&mut self) {
        if let Some(r) = self.replay.take() {
            log::debug!("replay cancelled with {} steps left", r.remaining());
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_replaying() {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }
}
