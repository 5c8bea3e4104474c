//! Maze generation.
//!
//! Mazes are carved with randomized Prim over the odd-aligned lattice, then
//! patched until Start reaches End, then loosened with random openings
//! whose frequency falls as the wall density rises.

use mazer_core::{Grid, MAX_SIZE, MIN_SIZE, Point, Tile};
use mazer_paths::is_connected;
use rand::{Rng, RngExt};

/// Default factor applied to `100 - wall_density` when opening extra walls.
pub const DEFAULT_OPENING_SCALE: f64 = 0.3;

/// Maze generator driven by `rng`.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    /// Percent chance per interior wall of being opened is
    /// `(100 - wall_density) * opening_scale`.
    pub opening_scale: f64,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            opening_scale: DEFAULT_OPENING_SCALE,
        }
    }

    /// Build a `size`×`size` maze whose Start and End are connected.
    ///
    /// `size` is clamped to `MIN_SIZE..=MAX_SIZE` and `wall_density` to
    /// `0..=100`; higher density leaves more walls standing.
    pub fn generate(&mut self, size: i32, wall_density: u8) -> Grid {
        let clamped = size.clamp(MIN_SIZE, MAX_SIZE);
        if clamped != size {
            log::warn!("maze size {size} clamped to {clamped}");
        }
        let density = wall_density.min(100);
        if density != wall_density {
            log::warn!("wall density {wall_density} clamped to {density}");
        }

        let mut grid = Grid::new(clamped);
        grid.fill(Tile::Wall);

        let carved = self.carve(&mut grid);
        let cleared = self.ensure_path(&mut grid);
        let opened = self.open_walls(&mut grid, density);
        grid.restamp_endpoints();

        log::debug!(
            "generated {clamped}x{clamped} maze: carved={carved} repaired={cleared} opened={opened} walls={}",
            grid.count(Tile::Wall)
        );
        grid
    }

    /// Randomized Prim from a random odd-aligned seed cell. Cells two steps
    /// apart are joined by clearing the wall between them; a cell counts as
    /// visited once it is no longer Wall, so the endpoints are never
    /// carved through.
    ///
    /// Returns the number of cells turned from Wall to Empty.
    pub fn carve(&mut self, grid: &mut Grid) -> usize {
        let Some(seed) = self.seed_cell(grid) else {
            return 0;
        };
        grid.set(seed, Tile::Empty);
        let mut carved = 1;

        let mut frontier: Vec<(Point, Point)> = Vec::new();
        push_frontier(grid, seed, &mut frontier);

        while !frontier.is_empty() {
            let i = self.rng.random_range(0..frontier.len());
            let (wall, cell) = frontier.swap_remove(i);
            if grid.at(cell) != Some(Tile::Wall) {
                continue;
            }
            if grid.set(wall, Tile::Empty) {
                carved += 1;
            }
            grid.set(cell, Tile::Empty);
            carved += 1;
            push_frontier(grid, cell, &mut frontier);
        }
        carved
    }

    /// Clear random interior walls until Start reaches End. Each wall is
    /// cleared at most once, so this always terminates.
    ///
    /// Returns the number of walls cleared.
    pub fn ensure_path(&mut self, grid: &mut Grid) -> usize {
        if is_connected(grid) {
            return 0;
        }
        let mut walls: Vec<Point> = grid
            .bounds()
            .interior()
            .iter()
            .filter(|&p| grid.at(p) == Some(Tile::Wall))
            .collect();

        let mut cleared = 0;
        loop {
            if walls.is_empty() {
                log::warn!("no interior walls left and Start still cut off from End");
                break;
            }
            let p = walls.swap_remove(self.rng.random_range(0..walls.len()));
            grid.set(p, Tile::Empty);
            cleared += 1;
            log::trace!("repair: cleared wall at {p}");
            if is_connected(grid) {
                break;
            }
        }
        cleared
    }

    /// Open each interior wall with probability
    /// `(100 - wall_density) * opening_scale` percent.
    ///
    /// Returns the number of walls opened.
    pub fn open_walls(&mut self, grid: &mut Grid, wall_density: u8) -> usize {
        let chance = f64::from(100 - wall_density.min(100)) * self.opening_scale;
        let mut opened = 0;
        for p in grid.bounds().interior() {
            if grid.is_endpoint(p) || grid.at(p) != Some(Tile::Wall) {
                continue;
            }
            if self.rng.random::<f64>() * 100.0 < chance && grid.set(p, Tile::Empty) {
                opened += 1;
            }
        }
        opened
    }

    /// A random odd-aligned cell `(2i+1, 2j+1)` with `i, j < (size-1)/2`
    /// that is not an endpoint.
    fn seed_cell(&mut self, grid: &Grid) -> Option<Point> {
        let kx = (grid.width() - 1) / 2;
        let ky = (grid.height() - 1) / 2;
        let candidates: Vec<Point> = (0..ky)
            .flat_map(|j| (0..kx).map(move |i| Point::new(2 * i + 1, 2 * j + 1)))
            .filter(|&p| !grid.is_endpoint(p))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.random_range(0..candidates.len())])
    }
}

/// Queue the (wall, cell) pairs around `from` whose far cell is an
/// in-bounds Wall.
fn push_frontier(grid: &Grid, from: Point, frontier: &mut Vec<(Point, Point)>) {
    for d in Point::CARDINALS {
        let cell = from + d * 2;
        if grid.at(cell) == Some(Tile::Wall) {
            frontier.push((from + d, cell));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(seed: u64) -> MazeGen<StdRng> {
        MazeGen::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn generated_mazes_are_connected() {
        for seed in 0..20 {
            for density in [0, 30, 70, 100] {
                let grid = seeded(seed).generate(15, density);
                assert!(is_connected(&grid), "seed {seed} density {density}:\n{grid}");
                assert_eq!(grid.start(), Point::new(1, 1));
                assert_eq!(grid.end(), Point::new(13, 13));
                assert_eq!(grid.at(grid.start()), Some(Tile::Start));
                assert_eq!(grid.at(grid.end()), Some(Tile::End));
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(seeded(7).generate(21, 40), seeded(7).generate(21, 40));
    }

    #[test]
    fn odd_sizes_keep_a_solid_border() {
        let grid = seeded(3).generate(15, 30);
        let bounds = grid.bounds();
        for p in bounds {
            if !bounds.interior().contains(p) {
                assert_eq!(grid.at(p), Some(Tile::Wall), "border open at {p}");
            }
        }
    }

    #[test]
    fn carving_stays_on_the_lattice() {
        let mut grid = Grid::new(11);
        grid.fill(Tile::Wall);
        let carved = seeded(11).carve(&mut grid);
        assert!(carved > 0);
        for (p, t) in grid.iter() {
            if t == Tile::Empty {
                // Cells are odd on both axes, passages odd on exactly one.
                assert!(p.x % 2 == 1 || p.y % 2 == 1, "stray carve at {p}");
            }
        }
        // Every lattice cell except the endpoints gets carved.
        for p in grid.bounds().iter().filter(|p| p.is_odd_aligned()) {
            if !grid.is_endpoint(p) {
                assert_eq!(grid.at(p), Some(Tile::Empty), "{p} never carved");
            }
        }
    }

    #[test]
    fn full_density_opens_nothing() {
        let mut grid = Grid::new(9);
        grid.fill(Tile::Wall);
        assert_eq!(seeded(1).open_walls(&mut grid, 100), 0);
        assert_eq!(grid.count(Tile::Empty), 0);
    }

    #[test]
    fn certain_openings_clear_the_interior() {
        let mut grid = Grid::new(9);
        grid.fill(Tile::Wall);
        let mut mg = seeded(1);
        mg.opening_scale = 1.0;
        assert_eq!(mg.open_walls(&mut grid, 0), 7 * 7 - 2);
        assert_eq!(grid.count(Tile::Wall), 9 * 9 - 7 * 7);
    }

    #[test]
    fn repair_connects_a_walled_grid() {
        let mut grid = Grid::new(7);
        grid.fill(Tile::Wall);
        let cleared = seeded(5).ensure_path(&mut grid);
        assert!(cleared >= 7);
        assert!(is_connected(&grid));
        assert_eq!(seeded(5).ensure_path(&mut grid), 0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(seeded(0).generate(40, 30).width(), MAX_SIZE);
        assert_eq!(seeded(0).generate(2, 30).width(), MIN_SIZE);
        assert!(is_connected(&seeded(0).generate(9, 250)));
    }
}
