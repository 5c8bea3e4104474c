//! The [`Grid`] type: a rectangular maze of [`Tile`]s with one Start and
//! one End.
//!
//! The grid owns the endpoint positions and mirrors them in the tile array.
//! Every mutating method keeps the invariant that exactly one Start and one
//! End exist, that they differ, and that neither is a wall.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};
use crate::tile::Tile;

/// Smallest supported maze side. Below this the default endpoints collide
/// or the odd-cell lattice has no room besides them.
pub const MIN_SIZE: i32 = 5;

/// Largest supported maze side.
pub const MAX_SIZE: i32 = 25;

/// Which of the two endpoints an operation refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    fn tile(self) -> Tile {
        match self {
            Self::Start => Tile::Start,
            Self::End => Tile::End,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors raised by grid construction, parsing and endpoint edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} must be positive")]
    Empty { width: i32, height: i32 },

    #[error("{which} {pos} lies outside the grid")]
    OutOfBounds { which: Endpoint, pos: Point },

    #[error("start and end cannot share cell {0}")]
    SameCell(Point),

    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("invalid glyph {ch:?} at {pos}")]
    InvalidGlyph { ch: char, pos: Point },

    #[error("expected exactly one {which} marker, found {count}")]
    EndpointCount { which: Endpoint, count: usize },
}

/// A maze grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Grid {
    bounds: Range,
    cells: Vec<Tile>,
    start: Point,
    end: Point,
}

impl Grid {
    /// Create an empty square grid with Start at (1, 1) and End at
    /// (size-2, size-2). Sizes below [`MIN_SIZE`] are raised to it.
    pub fn new(size: i32) -> Self {
        let size = size.max(MIN_SIZE);
        let bounds = Range::sized(size, size);
        let start = Point::new(1, 1);
        let end = Point::new(size - 2, size - 2);
        let mut grid = Self {
            bounds,
            cells: vec![Tile::Empty; bounds.len()],
            start,
            end,
        };
        grid.restamp_endpoints();
        grid
    }

    /// Create an empty `width × height` grid with explicit endpoints.
    pub fn with_endpoints(
        width: i32,
        height: i32,
        start: Point,
        end: Point,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Empty { width, height });
        }
        let bounds = Range::sized(width, height);
        check_endpoints(bounds, start, end)?;
        let mut grid = Self {
            bounds,
            cells: vec![Tile::Empty; bounds.len()],
            start,
            end,
        };
        grid.restamp_endpoints();
        Ok(grid)
    }

    /// Parse the ASCII form produced by [`Display`](fmt::Display).
    ///
    /// Glyphs: `#` wall, `.` empty, `S` start, `E` end, `o` visited,
    /// `*` path. Surrounding whitespace of the whole text is ignored, rows
    /// must all have the same width, and exactly one `S` and one `E` must
    /// appear.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text.trim().lines().map(|l| l.trim_end()).collect();
        let expected = rows.first().map_or(0, |r| r.chars().count());
        if rows.is_empty() || expected == 0 {
            return Err(GridError::Empty {
                width: expected as i32,
                height: rows.len() as i32,
            });
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(GridError::Ragged {
                    row: y,
                    found,
                    expected,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let tile = Tile::from_glyph(ch).ok_or(GridError::InvalidGlyph { ch, pos })?;
                match tile {
                    Tile::Start => starts.push(pos),
                    Tile::End => ends.push(pos),
                    _ => {}
                }
                cells.push(tile);
            }
        }

        let (start, end) = match (starts.as_slice(), ends.as_slice()) {
            ([s], [e]) => (*s, *e),
            ([_], _) => {
                return Err(GridError::EndpointCount {
                    which: Endpoint::End,
                    count: ends.len(),
                });
            }
            _ => {
                return Err(GridError::EndpointCount {
                    which: Endpoint::Start,
                    count: starts.len(),
                });
            }
        };

        Ok(Self {
            bounds: Range::sized(expected as i32, rows.len() as i32),
            cells,
            start,
            end,
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The bounding range, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The tile at `p`, or `None` out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.at(p).is_some_and(|t| !t.is_wall())
    }

    /// Whether `p` is the Start or End position.
    #[inline]
    pub fn is_endpoint(&self, p: Point) -> bool {
        p == self.start || p == self.end
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Set a non-endpoint cell. Endpoint cells and endpoint tiles are
    /// refused (use [`move_start`](Self::move_start) /
    /// [`move_end`](Self::move_end)). Returns whether the cell was written.
    pub fn set(&mut self, p: Point, tile: Tile) -> bool {
        if tile.is_endpoint() || self.is_endpoint(p) {
            return false;
        }
        match self.index(p) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Set every non-endpoint cell to `tile`.
    pub fn fill(&mut self, tile: Tile) {
        if tile.is_endpoint() {
            return;
        }
        self.cells.fill(tile);
        self.restamp_endpoints();
    }

    /// Flip an Empty cell to Wall or a Wall to Empty. Endpoints, marks and
    /// out-of-bounds points are left alone. Returns whether anything changed.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        match self.at(p) {
            Some(Tile::Empty) => self.set(p, Tile::Wall),
            Some(Tile::Wall) => self.set(p, Tile::Empty),
            _ => false,
        }
    }

    /// Move the Start marker to `p`. The old cell becomes Empty and a wall
    /// at `p` is replaced.
    pub fn move_start(&mut self, p: Point) -> Result<(), GridError> {
        self.move_endpoint(Endpoint::Start, p)
    }

    /// Move the End marker to `p`. The old cell becomes Empty and a wall
    /// at `p` is replaced.
    pub fn move_end(&mut self, p: Point) -> Result<(), GridError> {
        self.move_endpoint(Endpoint::End, p)
    }

    fn move_endpoint(&mut self, which: Endpoint, p: Point) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds { which, pos: p });
        }
        let (own, other) = match which {
            Endpoint::Start => (self.start, self.end),
            Endpoint::End => (self.end, self.start),
        };
        if p == other {
            return Err(GridError::SameCell(p));
        }
        if p == own {
            return Ok(());
        }
        self.put(own, Tile::Empty);
        self.put(p, which.tile());
        match which {
            Endpoint::Start => self.start = p,
            Endpoint::End => self.end = p,
        }
        Ok(())
    }

    /// Mark an Empty cell as visited. Returns whether it was marked.
    pub fn mark_visited(&mut self, p: Point) -> bool {
        self.at(p) == Some(Tile::Empty) && self.set(p, Tile::Visited)
    }

    /// Mark a non-endpoint, non-wall cell as part of the path.
    pub fn mark_path(&mut self, p: Point) -> bool {
        self.at(p).is_some_and(|t| !t.is_wall()) && self.set(p, Tile::Path)
    }

    /// Turn every Visited/Path mark back into Empty. Returns the number of
    /// cells cleared.
    pub fn clear_marks(&mut self) -> usize {
        let mut n = 0;
        for t in self.cells.iter_mut().filter(|t| t.is_mark()) {
            *t = Tile::Empty;
            n += 1;
        }
        n
    }

    /// Write the Start/End tiles back at their positions.
    pub fn restamp_endpoints(&mut self) {
        self.put(self.start, Tile::Start);
        self.put(self.end, Tile::End);
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    fn put(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.index(p) {
            self.cells[i] = tile;
        }
    }
}

fn check_endpoints(bounds: Range, start: Point, end: Point) -> Result<(), GridError> {
    if !bounds.contains(start) {
        return Err(GridError::OutOfBounds {
            which: Endpoint::Start,
            pos: start,
        });
    }
    if !bounds.contains(end) {
        return Err(GridError::OutOfBounds {
            which: Endpoint::End,
            pos: end,
        });
    }
    if start == end {
        return Err(GridError::SameCell(start));
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.bounds.width() as usize;
        for (y, row) in self.cells.chunks(w).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for t in row {
                write!(f, "{}", t.glyph())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Grid> for String {
    fn from(g: Grid) -> Self {
        g.to_string()
    }
}

impl TryFrom<String> for Grid {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: &str = "\
#####
#S..#
#...#
#..E#
#####";

    #[test]
    fn new_places_default_endpoints() {
        let g = Grid::new(15);
        assert_eq!(g.size(), Point::new(15, 15));
        assert_eq!(g.start(), Point::new(1, 1));
        assert_eq!(g.end(), Point::new(13, 13));
        assert_eq!(g.at(g.start()), Some(Tile::Start));
        assert_eq!(g.at(g.end()), Some(Tile::End));
        assert_eq!(g.count(Tile::Empty), 15 * 15 - 2);
    }

    #[test]
    fn new_raises_tiny_sizes() {
        let g = Grid::new(2);
        assert_eq!(g.width(), MIN_SIZE);
        assert_ne!(g.start(), g.end());
    }

    #[test]
    fn parse_and_display_agree() {
        let g = Grid::parse(OPEN).unwrap();
        assert_eq!(g.size(), Point::new(5, 5));
        assert_eq!(g.start(), Point::new(1, 1));
        assert_eq!(g.end(), Point::new(3, 3));
        assert_eq!(g.count(Tile::Wall), 16);
        assert_eq!(g.to_string(), OPEN);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            Grid::parse("S.\n.E."),
            Err(GridError::Ragged { row: 1, .. })
        ));
        assert!(matches!(
            Grid::parse("S?E"),
            Err(GridError::InvalidGlyph { ch: '?', .. })
        ));
        assert!(matches!(
            Grid::parse("S.S\n..E"),
            Err(GridError::EndpointCount {
                which: Endpoint::Start,
                count: 2
            })
        ));
        assert!(matches!(
            Grid::parse("S.."),
            Err(GridError::EndpointCount {
                which: Endpoint::End,
                count: 0
            })
        ));
        assert!(matches!(Grid::parse("   "), Err(GridError::Empty { .. })));
    }

    #[test]
    fn with_endpoints_validates() {
        assert!(Grid::with_endpoints(4, 4, Point::new(0, 0), Point::new(3, 3)).is_ok());
        assert_eq!(
            Grid::with_endpoints(4, 4, Point::new(2, 2), Point::new(2, 2)),
            Err(GridError::SameCell(Point::new(2, 2)))
        );
        assert!(matches!(
            Grid::with_endpoints(4, 4, Point::new(0, 0), Point::new(4, 0)),
            Err(GridError::OutOfBounds {
                which: Endpoint::End,
                ..
            })
        ));
        assert!(matches!(
            Grid::with_endpoints(0, 4, Point::new(0, 0), Point::new(1, 0)),
            Err(GridError::Empty { .. })
        ));
    }

    #[test]
    fn set_never_touches_endpoints() {
        let mut g = Grid::new(5);
        assert!(!g.set(g.start(), Tile::Wall));
        assert!(!g.set(Point::new(2, 2), Tile::End));
        assert!(!g.set(Point::new(9, 9), Tile::Wall));
        assert!(g.set(Point::new(2, 2), Tile::Wall));
        g.fill(Tile::Wall);
        assert_eq!(g.count(Tile::Wall), 23);
        assert_eq!(g.at(g.start()), Some(Tile::Start));
    }

    #[test]
    fn toggle_wall_flips_only_empty_and_wall() {
        let mut g = Grid::new(5);
        let p = Point::new(2, 1);
        assert!(g.toggle_wall(p));
        assert_eq!(g.at(p), Some(Tile::Wall));
        assert!(g.toggle_wall(p));
        assert_eq!(g.at(p), Some(Tile::Empty));
        assert!(!g.toggle_wall(g.start()));
        g.mark_visited(p);
        assert!(!g.toggle_wall(p));
    }

    #[test]
    fn moving_endpoints_keeps_invariants() {
        let mut g = Grid::new(7);
        let wall = Point::new(3, 3);
        g.set(wall, Tile::Wall);

        g.move_start(wall).unwrap();
        assert_eq!(g.start(), wall);
        assert_eq!(g.at(wall), Some(Tile::Start));
        assert_eq!(g.at(Point::new(1, 1)), Some(Tile::Empty));
        assert_eq!(g.count(Tile::Start), 1);

        assert_eq!(g.move_end(wall), Err(GridError::SameCell(wall)));
        assert!(matches!(
            g.move_end(Point::new(-1, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(g.end(), Point::new(5, 5));
    }

    #[test]
    fn marks_are_cleared() {
        let mut g = Grid::new(5);
        assert!(g.mark_visited(Point::new(2, 1)));
        assert!(!g.mark_visited(g.start()));
        assert!(g.mark_path(Point::new(2, 1)));
        assert!(g.mark_visited(Point::new(3, 1)));
        g.set(Point::new(1, 2), Tile::Wall);
        assert!(!g.mark_path(Point::new(1, 2)));
        assert_eq!(g.clear_marks(), 2);
        assert_eq!(g.count(Tile::Visited) + g.count(Tile::Path), 0);
    }

    #[test]
    fn walkability() {
        let g = Grid::parse(OPEN).unwrap();
        assert!(g.is_walkable(Point::new(1, 1)));
        assert!(!g.is_walkable(Point::new(0, 0)));
        assert!(!g.is_walkable(Point::new(5, 5)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_serializes_as_ascii() {
        let g = Grid::parse("#S.\n#.E").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "\"#S.\\n#.E\"");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert!(serde_json::from_str::<Grid>("\"#..\"").is_err());
    }
}
