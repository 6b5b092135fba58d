//! Swap validation and legal move enumeration
//!
//! All checks here work on a scratch copy of the grid, so callers holding a
//! `&Grid` can rely on it being untouched.

use arrayvec::ArrayVec;

use crate::error::Result;
use crate::grid::Grid;
use crate::matcher::{matches_through, MatchSet};
use crate::types::{Direction, Move, MIN_RUN};

/// Cells matched if `mv` were played on `scratch`. The scratch grid is
/// swapped and swapped back, so it ends unchanged.
fn swap_matches(scratch: &mut Grid, mv: Move) -> Result<MatchSet> {
    scratch.swap(mv.from, mv.to)?;
    let mut set = matches_through(scratch, mv.from);
    set.merge(&matches_through(scratch, mv.to));
    scratch.swap(mv.from, mv.to)?;
    Ok(set)
}

/// Would swapping the two cells of `mv` create a match?
///
/// ```
/// use match3_core::{would_match, Grid};
/// use match3_core::types::{Move, Pos};
///
/// let grid = Grid::parse("RRGR\nBGBY").unwrap();
/// let mv = Move::new(Pos::new(0, 2), Pos::new(0, 3)).unwrap();
/// assert!(would_match(&grid, mv).unwrap());
/// ```
pub fn would_match(grid: &Grid, mv: Move) -> Result<bool> {
    let mut scratch = grid.clone();
    Ok(swap_matches(&mut scratch, mv)?.len() >= MIN_RUN)
}

/// Every cell the swap would clear immediately (before any cascade)
pub fn swap_preview(grid: &Grid, mv: Move) -> Result<MatchSet> {
    let mut scratch = grid.clone();
    swap_matches(&mut scratch, mv)
}

/// Right and down neighbours of a cell, skipping the board edge
fn forward_moves(grid: &Grid, from: crate::types::Pos) -> ArrayVec<Move, 2> {
    let mut out = ArrayVec::new();
    for dir in [Direction::Right, Direction::Down] {
        if let Some(to) = grid.neighbor(from, dir) {
            out.push(Move { from, to });
        }
    }
    out
}

/// All swaps that produce a match, in row-major order of their first cell
/// (right neighbour before down neighbour)
pub fn legal_moves(grid: &Grid) -> Vec<Move> {
    let mut scratch = grid.clone();
    let mut moves = Vec::new();
    for from in grid.positions() {
        for mv in forward_moves(grid, from) {
            // Both cells come from `positions()`, so the swap cannot fail.
            if swap_matches(&mut scratch, mv).is_ok_and(|set| set.len() >= MIN_RUN) {
                moves.push(mv);
            }
        }
    }
    moves
}

/// No swap on the board produces a match
pub fn is_deadlocked(grid: &Grid) -> bool {
    let mut scratch = grid.clone();
    !grid.positions().any(|from| {
        forward_moves(grid, from)
            .into_iter()
            .any(|mv| swap_matches(&mut scratch, mv).is_ok_and(|set| set.len() >= MIN_RUN))
    })
}

/// Legal move clearing the most cells immediately; the first one wins ties
pub fn best_move(grid: &Grid) -> Option<Move> {
    let mut scratch = grid.clone();
    let mut best: Option<(usize, Move)> = None;
    for mv in legal_moves(grid) {
        let cleared = swap_matches(&mut scratch, mv).map_or(0, |set| set.len());
        if best.map_or(true, |(n, _)| cleared > n) {
            best = Some((cleared, mv));
        }
    }
    best.map(|(_, mv)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Pos, TileType};

    fn grid(text: &str) -> Grid {
        Grid::parse(text).unwrap()
    }

    fn mv(a: (usize, usize), b: (usize, usize)) -> Move {
        Move::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn test_would_match_detects_completing_swap() {
        let g = grid("RRGR\nBGBY");
        assert!(would_match(&g, mv((0, 2), (0, 3))).unwrap());
        assert!(!would_match(&g, mv((0, 0), (1, 0))).unwrap());
    }

    #[test]
    fn test_would_match_leaves_grid_untouched() {
        let g = grid("RRGR\nBGBY\nYBGB");
        let before = g.clone();
        for m in [mv((0, 2), (0, 3)), mv((1, 1), (2, 1)), mv((0, 0), (0, 1))] {
            let _ = would_match(&g, m).unwrap();
        }
        assert_eq!(g, before);
    }

    #[test]
    fn test_would_match_out_of_bounds() {
        let g = grid("RRG");
        assert!(would_match(&g, mv((0, 2), (0, 3))).is_err());
    }

    #[test]
    fn test_same_type_swap_is_not_a_match() {
        let g = grid("RRBB\nRGBY\nGYRG\nBRYB");
        assert!(!would_match(&g, mv((0, 2), (1, 2))).unwrap());
    }

    #[test]
    fn test_legal_moves_order_and_content() {
        let g = grid("RRGR\nBGBY");
        let moves = legal_moves(&g);
        assert_eq!(moves, vec![mv((0, 2), (0, 3))]);
    }

    #[test]
    fn test_uniform_grid_every_pair_is_legal() {
        let g = Grid::from_tiles(&vec![vec![TileType::Blue; 3]; 3]).unwrap();
        let moves = legal_moves(&g);
        // 3 rows x 2 horizontal pairs + 2 x 3 vertical pairs
        assert_eq!(moves.len(), 12);
        assert!(!is_deadlocked(&g));
    }

    #[test]
    fn test_deadlocked_board() {
        let g = grid("RGB\nGBR\nBRG");
        assert!(legal_moves(&g).is_empty());
        assert!(is_deadlocked(&g));
        assert_eq!(best_move(&g), None);
    }

    #[test]
    fn test_best_move_prefers_bigger_clear() {
        // (1,1)<->(1,2) clears a vertical 3 in column 2;
        // (1,2)<->(1,3) completes row 1 and column 2 at once.
        let g = grid("GBGY\nRRYR\nBGRB\nYBRG");
        let moves = legal_moves(&g);
        assert_eq!(moves[0], mv((1, 1), (1, 2)));
        assert_eq!(swap_preview(&g, moves[0]).unwrap().len(), 3);

        let best = best_move(&g).unwrap();
        assert_eq!(best, mv((1, 2), (1, 3)));
        let cleared = swap_preview(&g, best).unwrap();
        assert_eq!(cleared.len(), 5);
        assert!(cleared.contains(Pos::new(3, 2)));
    }
}
