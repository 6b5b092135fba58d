//! Match detection - runs of three or more identical tiles
//!
//! A match through a cell is the horizontal run and/or the vertical run that
//! contain it, each counted only when it reaches [`MIN_RUN`] on its own. When
//! both qualify they form one L/T/plus shaped set sharing the queried cell.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::grid::Grid;
use crate::types::{Pos, TileType, MIN_RUN};

/// A deduplicated set of matched positions, iterated in row-major order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    cells: BTreeSet<Pos>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    /// Add every position of `other`
    pub fn merge(&mut self, other: &MatchSet) {
        self.cells.extend(other.cells.iter().copied());
    }

    pub fn to_vec(&self) -> Vec<Pos> {
        self.iter().collect()
    }
}

impl FromIterator<Pos> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Pos> for MatchSet {
    fn extend<I: IntoIterator<Item = Pos>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Pos;
    type IntoIter = std::collections::btree_set::Iter<'a, Pos>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Maximal horizontal run of `tile` through `pos`, as `(first_col, len)`
fn horizontal_run(grid: &Grid, pos: Pos, tile: TileType) -> (usize, usize) {
    let same = |col: usize| grid.tile(Pos::new(pos.row, col)) == Some(tile);

    let mut start = pos.col;
    while start > 0 && same(start - 1) {
        start -= 1;
    }
    let mut end = pos.col;
    while end + 1 < grid.cols() && same(end + 1) {
        end += 1;
    }
    (start, end - start + 1)
}

/// Maximal vertical run of `tile` through `pos`, as `(first_row, len)`
fn vertical_run(grid: &Grid, pos: Pos, tile: TileType) -> (usize, usize) {
    let same = |row: usize| grid.tile(Pos::new(row, pos.col)) == Some(tile);

    let mut start = pos.row;
    while start > 0 && same(start - 1) {
        start -= 1;
    }
    let mut end = pos.row;
    while end + 1 < grid.rows() && same(end + 1) {
        end += 1;
    }
    (start, end - start + 1)
}

/// Match set through `pos` (possibly empty)
///
/// Fails only when `pos` is off the board. An empty cell never matches.
///
/// ```
/// use match3_core::{matches_at, Grid};
/// use match3_core::types::Pos;
///
/// let grid = Grid::parse("RRRB\nGBYB\nGYBG").unwrap();
/// assert_eq!(matches_at(&grid, Pos::new(0, 1)).unwrap().len(), 3);
/// assert!(matches_at(&grid, Pos::new(0, 3)).unwrap().is_empty());
/// ```
pub fn matches_at(grid: &Grid, pos: Pos) -> Result<MatchSet> {
    grid.check(pos)?;
    Ok(matches_through(grid, pos))
}

/// `matches_at` for a position already known to be on the board
pub(crate) fn matches_through(grid: &Grid, pos: Pos) -> MatchSet {
    let mut set = MatchSet::new();
    let Some(tile) = grid.tile(pos) else {
        return set;
    };

    let (first_col, h_len) = horizontal_run(grid, pos, tile);
    if h_len >= MIN_RUN {
        set.extend((first_col..first_col + h_len).map(|col| Pos::new(pos.row, col)));
    }

    let (first_row, v_len) = vertical_run(grid, pos, tile);
    if v_len >= MIN_RUN {
        set.extend((first_row..first_row + v_len).map(|row| Pos::new(row, pos.col)));
    }

    set
}

/// Union of the matches through each seed cell
pub fn matches_from(grid: &Grid, seeds: &[Pos]) -> Result<MatchSet> {
    let mut set = MatchSet::new();
    for &seed in seeds {
        set.merge(&matches_at(grid, seed)?);
    }
    Ok(set)
}

/// Every matched cell on the board, deduplicated
pub fn all_matches(grid: &Grid) -> MatchSet {
    let mut set = MatchSet::new();
    for pos in grid.positions() {
        if set.contains(pos) {
            // Any unvisited cell of a crossing run reports that run itself.
            continue;
        }
        set.merge(&matches_through(grid, pos));
    }
    set
}

/// True when any run of three or more exists
pub fn has_matches(grid: &Grid) -> bool {
    grid.positions()
        .any(|pos| !matches_through(grid, pos).is_empty())
}
