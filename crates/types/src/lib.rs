//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond identity and geometry, so
//! they can be used by the resolution core, the presentation bridge and any
//! frontend alike.
//!
//! # Coordinates
//!
//! Positions are `(row, col)`:
//!
//! - **row** 0 is the top row, rows grow downward (gravity pulls toward larger rows)
//! - **col** 0 is the leftmost column
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` / `DEFAULT_COLS` | 8 | Board size |
//! | `TILE_TYPE_COUNT` | 6 | Number of distinct tile types |
//! | `MIN_TILE_TYPES` | 3 | Fewest types a board may use |
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `SCORE_PER_TILE` | 10 | Points per removed tile |
//! | `STEP_INTERVAL_MS` | 400 | Default playback delay per cascade step |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Direction, Move, Pos, TileType};
//!
//! let tile = TileType::from_str("red").unwrap();
//! assert_eq!(tile, TileType::Red);
//!
//! let a = Pos::new(2, 3);
//! assert_eq!(a.step(Direction::Right), Some(Pos::new(2, 4)));
//! assert_eq!(Pos::new(0, 0).step(Direction::Up), None);
//!
//! assert!(Move::new(a, Pos::new(3, 3)).is_some());
//! assert!(Move::new(a, Pos::new(3, 4)).is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in cells
pub const DEFAULT_ROWS: usize = 8;

/// Default board width in cells
pub const DEFAULT_COLS: usize = 8;

/// Number of tile type variants
pub const TILE_TYPE_COUNT: u8 = 6;

/// A board needs at least this many types to be generated match-free
pub const MIN_TILE_TYPES: u8 = 3;

/// Shortest run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Points awarded per removed tile
pub const SCORE_PER_TILE: u32 = 10;

/// Re-roll passes the board generator may make before giving up
pub const MAX_GENERATION_PASSES: u32 = 1_000;

/// Cascade iterations a single swap may trigger before the resolver gives up
pub const MAX_CASCADE_STEPS: u32 = 1_000;

/// Permutations tried when reshuffling a deadlocked board
pub const MAX_RESHUFFLE_ATTEMPTS: u32 = 100;

/// Delay between revealing consecutive cascade steps (the match blink time)
pub const STEP_INTERVAL_MS: u32 = 400;

/// Tile types
///
/// A session uses the first `tile_types` variants in declaration order, so a
/// three-type board only ever contains Red, Blue and Green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl TileType {
    /// All variants in index order
    pub const ALL: [TileType; TILE_TYPE_COUNT as usize] = [
        TileType::Red,
        TileType::Blue,
        TileType::Green,
        TileType::Yellow,
        TileType::Purple,
        TileType::Orange,
    ];

    /// Map an index in `0..TILE_TYPE_COUNT` to a tile type
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::TileType;
    ///
    /// assert_eq!(TileType::from_index(0), Some(TileType::Red));
    /// assert_eq!(TileType::from_index(5), Some(TileType::Orange));
    /// assert_eq!(TileType::from_index(6), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse tile type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(TileType::Red),
            "blue" | "b" => Some(TileType::Blue),
            "green" | "g" => Some(TileType::Green),
            "yellow" | "y" => Some(TileType::Yellow),
            "purple" | "p" => Some(TileType::Purple),
            "orange" | "o" => Some(TileType::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Red => "red",
            TileType::Blue => "blue",
            TileType::Green => "green",
            TileType::Yellow => "yellow",
            TileType::Purple => "purple",
            TileType::Orange => "orange",
        }
    }

    /// Single-letter code used by text dumps of a grid
    pub fn as_char(&self) -> char {
        match self {
            TileType::Red => 'R',
            TileType::Blue => 'B',
            TileType::Green => 'G',
            TileType::Yellow => 'Y',
            TileType::Purple => 'P',
            TileType::Orange => 'O',
        }
    }
}

/// A cell on the board
///
/// - `None`: Empty cell (only observable mid-cascade)
/// - `Some(TileType)`: Occupied cell
pub type Cell = Option<TileType>;

/// Board position, `row` 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbouring position in `dir`, or `None` when it would go below zero.
    ///
    /// Upper bounds are the grid's concern.
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Pos::new(row, col))
    }

    /// Manhattan distance exactly 1
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Pos::new(row, col)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Swap direction as recognised by the presentation layer
///
/// `Up` moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` delta
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A proposed swap of two adjacent cells
///
/// Adjacency is checked at construction, so every `Move` in circulation is a
/// geometrically valid swap. Bounds are still checked by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    /// Returns `None` unless the positions are orthogonal neighbours
    pub fn new(from: Pos, to: Pos) -> Option<Self> {
        from.is_adjacent(to).then_some(Self { from, to })
    }

    /// Move from `from` one cell in `dir`
    pub fn toward(from: Pos, dir: Direction) -> Option<Self> {
        from.step(dir).map(|to| Self { from, to })
    }

    /// The same swap expressed in the opposite order
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.from, self.to)
    }
}
