//! Immutable N-puzzle board with the distance heuristics used by the solver.
//!
//! A board is stored row-major in a single buffer together with the cached
//! position of the blank. Every board handed out by this module satisfies the
//! permutation invariant: values `0..N²` each appear exactly once, `0` being
//! the blank. Successors and twins are derived by swapping two cells of a copy,
//! so the invariant carries over without re-validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Value used for the blank cell.
pub const BLANK: u32 = 0;

/// Direction the blank travels during one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slide {
    Up,
    Left,
    Down,
    Right,
}

impl Slide {
    /// Neighbor generation order: above, left, below, right of the blank.
    pub const ALL: [Slide; 4] = [Slide::Up, Slide::Left, Slide::Down, Slide::Right];

    /// Row/column offset applied to the blank.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Slide::Up => (-1, 0),
            Slide::Left => (0, -1),
            Slide::Down => (1, 0),
            Slide::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Slide {
        match self {
            Slide::Up => Slide::Down,
            Slide::Down => Slide::Up,
            Slide::Left => Slide::Right,
            Slide::Right => Slide::Left,
        }
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Slide::Up => "Up",
            Slide::Left => "Left",
            Slide::Down => "Down",
            Slide::Right => "Right",
        };
        write!(f, "{s}")
    }
}

/// Reasons a tile grid cannot be turned into a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A row does not have as many cells as the grid has rows.
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Boards smaller than 2×2 have no twin.
    TooSmall(usize),
    /// A flat tile buffer does not hold exactly N² values.
    TileCount { expected: usize, found: usize },
    /// A declared dimension disagrees with the tile grid.
    DimensionMismatch { declared: usize, actual: usize },
    /// A tile value is outside `0..N²`.
    TileOutOfRange { tile: u32, max: u32 },
    /// A tile value appears more than once.
    DuplicateTile(u32),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSquare {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} tiles, expected {expected}"),
            Self::TooSmall(n) => write!(f, "board dimension {n} is too small (minimum is 2)"),
            Self::TileCount { expected, found } => {
                write!(f, "expected {expected} tiles, found {found}")
            }
            Self::DimensionMismatch { declared, actual } => write!(
                f,
                "declared dimension {declared} does not match {actual} rows of tiles"
            ),
            Self::TileOutOfRange { tile, max } => {
                write!(f, "tile {tile} is out of range (0..={max})")
            }
            Self::DuplicateTile(tile) => write!(f, "tile {tile} appears more than once"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Wire shape of a board: `{"dimension": 3, "tiles": [[...], ...]}`.
///
/// `dimension` is optional on input; when present it must agree with the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,
    pub tiles: Vec<Vec<u32>>,
}

/// An N×N arrangement of tiles. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BoardRepr", try_from = "BoardRepr")]
pub struct Board {
    dimension: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// Build a board from rows of tiles, copying them.
    ///
    /// The grid must be square, at least 2×2, and contain every value in
    /// `0..N²` exactly once.
    pub fn new<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        let n = rows.len();
        if n < 2 {
            return Err(BoardError::TooSmall(n));
        }

        let mut tiles = Vec::with_capacity(n * n);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != n {
                return Err(BoardError::NotSquare {
                    row,
                    expected: n,
                    found: cells.len(),
                });
            }
            tiles.extend_from_slice(cells);
        }

        Self::from_flat(n, tiles)
    }

    /// Build a board from a row-major buffer of `n * n` tiles.
    pub fn from_flat(n: usize, tiles: Vec<u32>) -> Result<Self, BoardError> {
        if n < 2 {
            return Err(BoardError::TooSmall(n));
        }
        if tiles.len() != n * n {
            return Err(BoardError::TileCount {
                expected: n * n,
                found: tiles.len(),
            });
        }

        let max = (n * n - 1) as u32;
        let mut seen = vec![false; n * n];
        let mut blank = 0;
        for (idx, &tile) in tiles.iter().enumerate() {
            if tile > max {
                return Err(BoardError::TileOutOfRange { tile, max });
            }
            if std::mem::replace(&mut seen[tile as usize], true) {
                return Err(BoardError::DuplicateTile(tile));
            }
            if tile == BLANK {
                blank = idx;
            }
        }

        Ok(Self {
            dimension: n,
            tiles,
            blank,
        })
    }

    /// The solved arrangement for dimension `n`: `1..N²` in order, blank last.
    pub fn goal(n: usize) -> Result<Self, BoardError> {
        if n < 2 {
            return Err(BoardError::TooSmall(n));
        }
        let mut tiles: Vec<u32> = (1..(n * n) as u32).collect();
        tiles.push(BLANK);
        Ok(Self {
            dimension: n,
            tiles,
            blank: n * n - 1,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Tile at `(row, col)`. Panics when out of bounds.
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.dimension + col]
    }

    /// Tiles grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.tiles.chunks(self.dimension)
    }

    /// Position of the blank as `(row, col)`.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.dimension, self.blank % self.dimension)
    }

    /// Number of tiles out of place. The blank is never counted.
    pub fn hamming(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(idx, &tile)| tile != BLANK && tile as usize != idx + 1)
            .count() as u32
    }

    /// Sum of the grid distances of every tile from its goal cell.
    pub fn manhattan(&self) -> u32 {
        let n = self.dimension;
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(idx, &tile)| {
                let (row, col) = (idx / n, idx % n);
                let goal = tile as usize - 1;
                let (goal_row, goal_col) = (goal / n, goal % n);
                (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
            })
            .sum()
    }

    pub fn is_goal(&self) -> bool {
        self.manhattan() == 0
    }

    /// The board with two non-blank tiles exchanged.
    ///
    /// Swaps `(0,0)` and `(0,1)` unless one of them is the blank, in which
    /// case `(1,0)` and `(1,1)` are swapped. A board and its twin lie in
    /// opposite parity classes, so exactly one of them can reach the goal.
    pub fn twin(&self) -> Board {
        let n = self.dimension;
        if self.tiles[0] != BLANK && self.tiles[1] != BLANK {
            self.swapped(0, 1)
        } else {
            self.swapped(n, n + 1)
        }
    }

    /// Every board one slide away, in [`Slide::ALL`] order.
    pub fn neighbors(&self) -> SmallVec<[Board; 4]> {
        Slide::ALL
            .iter()
            .filter_map(|&slide| self.slid(slide))
            .collect()
    }

    /// Board reached by moving the blank in `slide`'s direction, if legal.
    pub fn slid(&self, slide: Slide) -> Option<Board> {
        self.target_of(slide).map(|target| self.swapped(self.blank, target))
    }

    /// The slide that turns `self` into `other`, when they are neighbors.
    pub fn slide_to(&self, other: &Board) -> Option<Slide> {
        if self.dimension != other.dimension {
            return None;
        }
        Slide::ALL.into_iter().find(|&slide| {
            self.target_of(slide) == Some(other.blank) && self.slid(slide).as_ref() == Some(other)
        })
    }

    /// Index of the cell the blank would swap with.
    fn target_of(&self, slide: Slide) -> Option<usize> {
        let n = self.dimension as isize;
        let (row, col) = self.blank_position();
        let (dr, dc) = slide.delta();
        let (row, col) = (row as isize + dr, col as isize + dc);
        if row < 0 || row >= n || col < 0 || col >= n {
            return None;
        }
        Some((row * n + col) as usize)
    }

    fn swapped(&self, a: usize, b: usize) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        let blank = if self.blank == a {
            b
        } else if self.blank == b {
            a
        } else {
            self.blank
        };
        Board {
            dimension: self.dimension,
            tiles,
            blank,
        }
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            dimension: Some(board.dimension),
            tiles: board.rows().map(<[u32]>::to_vec).collect(),
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        if let Some(declared) = repr.dimension {
            if declared != repr.tiles.len() {
                return Err(BoardError::DimensionMismatch {
                    declared,
                    actual: repr.tiles.len(),
                });
            }
        }
        Board::new(&repr.tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.dimension)?;
        for row in self.rows() {
            for tile in row {
                write!(f, "{tile:2} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
