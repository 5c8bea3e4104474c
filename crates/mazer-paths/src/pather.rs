//! [`GridPather`]: the search traits over a maze [`Grid`].

use mazer_core::{Grid, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Read-only view of a [`Grid`] for the search engine.
///
/// Neighbours are the four cardinal cells (up, right, down, left) that are
/// in bounds and not walls. Every step costs 1 and the estimate is the
/// Manhattan distance, which is admissible under unit costs.
#[derive(Clone, Copy, Debug)]
pub struct GridPather<'a> {
    grid: &'a Grid,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(
            p.neighbors_4()
                .into_iter()
                .filter(|&n| self.grid.is_walkable(n)),
        );
    }

    fn passable(&self, p: Point) -> bool {
        self.grid.is_walkable(p)
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_skip_walls_and_bounds() {
        let grid = Grid::parse(
            "\
S#.
..E",
        )
        .unwrap();
        let pather = GridPather::new(&grid);
        let mut buf = Vec::new();
        pather.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1)]);

        buf.clear();
        pather.neighbors(Point::new(1, 1), &mut buf);
        // up is a wall; right, left remain in up-right-down-left order
        assert_eq!(buf, vec![Point::new(2, 1), Point::new(0, 1)]);
    }

    #[test]
    fn unit_cost_and_manhattan_estimate() {
        let grid = Grid::new(5);
        let pather = GridPather::new(&grid);
        assert_eq!(pather.cost(Point::new(1, 1), Point::new(2, 1)), 1);
        assert_eq!(pather.estimate(Point::new(1, 1), Point::new(3, 3)), 4);
    }
}
