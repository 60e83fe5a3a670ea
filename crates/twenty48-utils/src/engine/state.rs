use rand::Rng;
use std::fmt;

use super::ops;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

// Internal type aliases for packed representation
pub(crate) type BoardRaw = u64;
pub(crate) type Line = u64;
pub(crate) type Tile = u64;
pub(crate) type Score = u64;

/// Tile values as the player sees them, row-major. 0 is an empty cell.
pub type Grid = [[u32; 4]; 4];

/// Largest exponent a 4-bit cell can hold (2^15 = 32768).
pub const MAX_EXPONENT: u32 = 15;

/// Default chance that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
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

    /// True for Right/Down, where a line is processed back to front.
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Packed 4x4 2048 board as 16 4-bit exponents in a `u64`.
///
/// Cell 0 (top-left) lives in the highest nibble. Exponent 0 is an empty
/// cell, exponent k is the tile 2^k.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) BoardRaw);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board(0);

    /// Construct a `Board` from its raw packed representation.
    #[inline]
    pub fn from_raw(raw: BoardRaw) -> Self {
        Board(raw)
    }

    /// Borrow the raw packed `u64` for this `Board`.
    #[inline]
    pub fn raw(&self) -> BoardRaw {
        self.0
    }

    /// Pack a grid of tile values.
    ///
    /// Every cell must be 0 or a power of two between 2 and 32768.
    ///
    /// ```
    /// use twenty48_utils::engine::Board;
    /// let b = Board::from_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]).unwrap();
    /// assert_eq!(b.tile_value(0), 2);
    /// assert_eq!(b.tile_value(15), 4);
    /// ```
    pub fn from_grid(grid: Grid) -> Result<Self, EngineError> {
        let mut raw: BoardRaw = 0;
        for (row, cells) in grid.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let exp = value_to_exponent(value).ok_or(EngineError::InvalidTile {
                    row,
                    col,
                    value,
                })?;
                raw |= exp << (60 - 16 * row - 4 * col);
            }
        }
        Ok(Board(raw))
    }

    /// Unpack into a grid of tile values.
    pub fn to_grid(self) -> Grid {
        let mut grid = [[0u32; 4]; 4];
        for (idx, exp) in self.tiles().enumerate() {
            grid[idx / 4][idx % 4] = exponent_to_value(exp);
        }
        grid
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use twenty48_utils::engine::{Board, Direction};
    /// let b = Board::from_grid([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.shift(Direction::Left).tile_value(0), 4);
    /// ```
    #[inline]
    pub fn shift(self, dir: Direction) -> Self {
        ops::shift(self, dir).0
    }

    /// Like [`Board::shift`] but also returns the merge score produced by the move.
    #[inline]
    pub fn shift_scored(self, dir: Direction) -> (Self, Score) {
        ops::shift(self, dir)
    }

    /// Place a 2 (90%) or 4 (10%) tile into a uniformly chosen empty cell.
    ///
    /// A full board is returned unchanged.
    ///
    /// ```
    /// use twenty48_utils::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        self.with_random_tile_weighted(rng, DEFAULT_FOUR_PROBABILITY)
    }

    /// Like [`Board::with_random_tile`] with an explicit chance of spawning a 4.
    ///
    /// `four_probability` must lie in `[0, 1]`.
    pub fn with_random_tile_weighted<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        four_probability: f64,
    ) -> Self {
        let empty = ops::count_empty(self);
        if empty == 0 {
            return self;
        }
        let mut index = rng.gen_range(0..empty);
        let mut tmp = self.0;
        let mut tile = ops::generate_random_tile(rng, four_probability);
        loop {
            while (tmp & 0xf) != 0 {
                tmp >>= 4;
                tile <<= 4;
            }
            if index == 0 {
                break;
            }
            index -= 1;
            tmp >>= 4;
            tile <<= 4;
        }
        Board(self.0 | tile)
    }

    /// Return true if some direction would change the board.
    ///
    /// ```
    /// use twenty48_utils::engine::Board;
    /// // Nothing slides on an empty board.
    /// assert!(!Board::EMPTY.can_move());
    /// ```
    #[inline]
    pub fn can_move(self) -> bool {
        ops::can_move(self)
    }

    /// Return true if any tile holds exactly `value`.
    #[inline]
    pub fn contains(self, value: u32) -> bool {
        match value_to_exponent(value) {
            Some(exp) if exp != 0 => self.tiles().any(|t| t as Tile == exp),
            _ => false,
        }
    }

    /// Return true if two horizontally or vertically adjacent tiles are equal.
    #[inline]
    pub fn has_adjacent_pair(self) -> bool {
        ops::has_adjacent_pair(self)
    }

    /// Return the highest tile value on the board (0 for an empty board).
    #[inline]
    pub fn highest_tile(self) -> u32 {
        ops::get_highest_tile_val(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> u64 {
        ops::count_empty(self)
    }

    /// Get the actual value at index (2^exponent stored at nibble).
    ///
    /// Index runs 0..16 row-major.
    #[inline]
    pub fn tile_value(self, idx: usize) -> u32 {
        ops::get_tile_val(self, idx)
    }

    /// Iterate over tile exponents (nibbles) in row-major order.
    /// Returns 0 for empty, 1 for 2, 2 for 4, etc.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter {
            raw: self.0,
            idx: 0,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#018x})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.tiles().map(ops::format_val).collect();
        for (row, chunk) in cells.chunks(4).enumerate() {
            if row > 0 {
                writeln!(f, "{}", "-".repeat(31))?;
            }
            writeln!(f, "{}", chunk.join("|"))?;
        }
        Ok(())
    }
}

impl From<BoardRaw> for Board {
    fn from(v: BoardRaw) -> Self {
        Board::from_raw(v)
    }
}

impl From<Board> for BoardRaw {
    fn from(b: Board) -> Self {
        b.raw()
    }
}

impl TryFrom<Grid> for Board {
    type Error = EngineError;

    fn try_from(grid: Grid) -> Result<Self, Self::Error> {
        Board::from_grid(grid)
    }
}

/// Iterator over board tiles (exponents) in row-major order.
pub struct TilesIter {
    raw: BoardRaw,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= 16 {
            return None;
        }
        let n = ((self.raw >> (60 - (4 * self.idx))) & 0xf) as u8;
        self.idx += 1;
        Some(n)
    }
}

impl IntoIterator for Board {
    type Item = u8;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

/// Map a tile value to its exponent. `None` if it is not 0 or 2^1..=2^15.
pub fn value_to_exponent(value: u32) -> Option<Tile> {
    if value == 0 {
        return Some(0);
    }
    let exp = value.trailing_zeros();
    if value.is_power_of_two() && (1..=MAX_EXPONENT).contains(&exp) {
        Some(exp as Tile)
    } else {
        None
    }
}

/// Map an exponent back to its tile value (0 stays empty).
#[inline]
pub fn exponent_to_value(exp: u8) -> u32 {
    if exp == 0 { 0 } else { 1 << exp }
}
