//! RNG module - injectable randomness for tile generation
//!
//! Everything random in the core (initial board, refills, reshuffles) draws
//! through the [`TileRng`] trait so tests can script exact tile sequences.
//!
//! Also provides a simple LCG for deterministic seeded games.

use crate::types::TileType;

/// Source of randomness consumed by the core
pub trait TileRng {
    /// Generate a value in range [0, max). `max` is never 0.
    fn next_range(&mut self, max: u32) -> u32;

    /// Pick one of the first `tile_types` tile types uniformly
    fn next_tile(&mut self, tile_types: u8) -> TileType {
        let idx = self.next_range(tile_types.max(1) as u32) as usize;
        TileType::ALL[idx.min(TileType::ALL.len() - 1)]
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl<R: TileRng + ?Sized> TileRng for &mut R {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is mapped to 1
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (the seed that reproduces the remaining sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TileRng for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested range, so a script of tile
/// indices works for any `tile_types` at least as large as its biggest entry.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Script a sequence of tiles directly
    pub fn from_tiles(tiles: &[TileType]) -> Self {
        Self::new(tiles.iter().map(|t| t.index() as u32).collect())
    }

    /// Number of values drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TileRng for SequenceRng {
    fn next_range(&mut self, max: u32) -> u32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v % max.max(1)
    }
}
