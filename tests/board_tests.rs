//! Board tests - grid storage and run detection

use match3::core::{all_matches, matches_at, matches_from, Grid, Match3Error};
use match3::types::{Direction, Pos, TileType};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(5, 7).unwrap();
    assert_eq!(grid.dimensions(), (5, 7));

    // All cells should be empty
    for pos in grid.positions() {
        assert_eq!(grid.get(pos), Ok(None), "cell {} should be empty", pos);
    }
    assert!(!grid.is_full());
}

#[test]
fn test_grid_rejects_zero_dimension() {
    assert!(matches!(Grid::new(0, 4), Err(Match3Error::InvalidConfig(_))));
    assert!(matches!(Grid::new(4, 0), Err(Match3Error::InvalidConfig(_))));
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new(3, 4).unwrap();

    assert_eq!(
        grid.get(Pos::new(3, 0)),
        Err(Match3Error::OutOfBounds {
            pos: Pos::new(3, 0),
            rows: 3,
            cols: 4
        })
    );
    assert!(grid.get(Pos::new(0, 4)).is_err());
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new(3, 3).unwrap();

    grid.set(Pos::new(1, 2), Some(TileType::Purple)).unwrap();
    assert_eq!(grid.get(Pos::new(1, 2)), Ok(Some(TileType::Purple)));
    assert_eq!(grid.tile(Pos::new(1, 2)), Some(TileType::Purple));

    // Clear a cell
    grid.set(Pos::new(1, 2), None).unwrap();
    assert_eq!(grid.get(Pos::new(1, 2)), Ok(None));

    assert!(grid.set(Pos::new(3, 0), Some(TileType::Red)).is_err());
}

#[test]
fn test_grid_swap_and_neighbor() {
    let mut grid = Grid::parse("RG\nBY").unwrap();
    grid.swap(Pos::new(0, 0), Pos::new(1, 1)).unwrap();
    assert_eq!(grid, Grid::parse("YG\nBR").unwrap());

    assert_eq!(grid.neighbor(Pos::new(0, 0), Direction::Up), None);
    assert_eq!(grid.neighbor(Pos::new(0, 0), Direction::Left), None);
    assert_eq!(
        grid.neighbor(Pos::new(0, 0), Direction::Down),
        Some(Pos::new(1, 0))
    );
    assert_eq!(grid.neighbor(Pos::new(1, 1), Direction::Right), None);
}

#[test]
fn test_grid_text_round_trip() {
    let text = "RGB.\nYPO.\n";
    let grid = Grid::parse(text).unwrap();
    assert_eq!(grid.to_string(), text);
    assert_eq!(grid.count(TileType::Red), 1);
    assert!(Grid::parse("RG\nB").is_err());
}

#[test]
fn test_horizontal_run_of_three() {
    let grid = Grid::parse("GRRRB\nBGYGP").unwrap();
    let set = matches_at(&grid, Pos::new(0, 2)).unwrap();
    assert_eq!(
        set.to_vec(),
        vec![Pos::new(0, 1), Pos::new(0, 2), Pos::new(0, 3)]
    );
    // Off-run cell reports nothing.
    assert!(matches_at(&grid, Pos::new(0, 0)).unwrap().is_empty());
}

#[test]
fn test_run_of_two_is_not_a_match() {
    let grid = Grid::parse("RRG\nGBB").unwrap();
    assert!(all_matches(&grid).is_empty());
}

#[test]
fn test_crossing_runs_union() {
    // L shape: column 0 rows 0..2 plus row 2 cols 0..2.
    let grid = Grid::parse("RGB\nRBG\nRRR").unwrap();
    let set = matches_at(&grid, Pos::new(2, 0)).unwrap();
    assert_eq!(set.len(), 5);
    assert!(set.iter().all(|p| grid.tile(p) == Some(TileType::Red)));
}

#[test]
fn test_empty_cells_never_match() {
    let grid = Grid::parse("...\nRGB").unwrap();
    assert!(matches_at(&grid, Pos::new(0, 1)).unwrap().is_empty());
    assert!(all_matches(&grid).is_empty());
}

#[test]
fn test_matches_from_merges_seeds() {
    let grid = Grid::parse("RRRG\nBGYG\nYBBG").unwrap();
    let set = matches_from(&grid, &[Pos::new(0, 0), Pos::new(2, 3)]).unwrap();
    assert_eq!(set.len(), 6);
    assert_eq!(all_matches(&grid), set);
}

#[test]
fn test_matches_at_out_of_bounds() {
    let grid = Grid::parse("RGB").unwrap();
    assert!(matches!(
        matches_at(&grid, Pos::new(1, 0)),
        Err(Match3Error::OutOfBounds { .. })
    ));
}
