//! The [`Tile`] type: the state of a single maze cell.

use std::fmt;

/// State of one maze cell.
///
/// `Visited` and `Path` are visualization marks laid over `Empty` cells
/// while a search is replayed; for movement they behave like `Empty`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Path,
}

impl Tile {
    /// Whether the tile blocks movement.
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Whether the tile is the Start or End marker.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Whether the tile is a visualization mark.
    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Self::Visited | Self::Path)
    }

    /// ASCII glyph used by [`Grid`](crate::Grid)'s text form.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Visited => 'o',
            Self::Path => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        Some(match ch {
            '.' => Self::Empty,
            '#' => Self::Wall,
            'S' => Self::Start,
            'E' => Self::End,
            'o' => Self::Visited,
            '*' => Self::Path,
            _ => return None,
        })
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
