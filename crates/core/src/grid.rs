//! Grid module - the board's cell store
//!
//! The grid is a `rows x cols` rectangle of [`Cell`]s kept in a flat row-major
//! vector. It is the only place tile placement lives: the detector, generator
//! and resolver all read and write through it.
//! Coordinates: `(row, col)` with row 0 at the top.

use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::error::{Match3Error, Result};
use crate::types::{Cell, Direction, Pos, TileType};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Match3Error::InvalidConfig(format!(
                "grid dimensions must be non-zero, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        })
    }

    /// Build a fully occupied grid from rows of tiles
    pub fn from_tiles(rows: &[Vec<TileType>]) -> Result<Self> {
        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| row.iter().copied().map(Some).collect())
            .collect();
        Self::from_rows(&cells)
    }

    /// Build a grid from rows of cells. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(rows.len(), cols)?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Match3Error::InvalidConfig(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            let start = r * cols;
            grid.cells[start..start + cols].copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Parse a compact text layout, one line per row, one letter per cell
    /// (`R B G Y P O`, `.` for empty). Whitespace inside a line is ignored.
    ///
    /// ```
    /// use match3_core::Grid;
    ///
    /// let grid = Grid::parse("RRG\nBY.").unwrap();
    /// assert_eq!(grid.dimensions(), (2, 3));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let mut row = Vec::new();
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = match ch {
                    '.' => None,
                    other => Some(TileType::from_str(&other.to_string()).ok_or_else(|| {
                        Match3Error::InvalidConfig(format!("unknown tile letter {:?}", other))
                    })?),
                };
                row.push(cell);
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// Convert to rows of cells (for snapshots and tests)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(<[Cell]>::to_vec).collect()
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn flat_index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.flat_index(pos).is_some()
    }

    /// Fail with `OutOfBounds` unless `pos` is on the board
    pub fn check(&self, pos: Pos) -> Result<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(self.out_of_bounds(pos))
        }
    }

    fn out_of_bounds(&self, pos: Pos) -> Match3Error {
        Match3Error::OutOfBounds {
            pos,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Get cell at `pos`
    pub fn get(&self, pos: Pos) -> Result<Cell> {
        self.flat_index(pos)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Set cell at `pos`
    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<()> {
        let idx = self.flat_index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Tile at `pos`, `None` when empty or off the board
    pub fn tile(&self, pos: Pos) -> Option<TileType> {
        self.flat_index(pos).and_then(|idx| self.cells[idx])
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<()> {
        let ia = self.flat_index(a).ok_or_else(|| self.out_of_bounds(a))?;
        let ib = self.flat_index(b).ok_or_else(|| self.out_of_bounds(b))?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// On-board neighbour of `pos` in `dir`
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        pos.step(dir).filter(|p| self.in_bounds(*p))
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Pos::new(row, col)))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to the flat cells (row-major)
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of cells holding `tile`
    pub fn count(&self, tile: TileType) -> usize {
        self.cells.iter().filter(|c| **c == Some(tile)).count()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Index<Pos> for Grid {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Cell {
        let idx = self.flat_index(pos)
            .unwrap_or_else(|| panic!("{}", self.out_of_bounds(pos)));
        &self.cells[idx]
    }
}

impl IndexMut<Pos> for Grid {
    fn index_mut(&mut self, pos: Pos) -> &mut Cell {
        let idx = self.flat_index(pos)
            .unwrap_or_else(|| panic!("{}", self.out_of_bounds(pos)));
        &mut self.cells[idx]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row
                .iter()
                .map(|c| c.map_or('.', |t| t.as_char()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
