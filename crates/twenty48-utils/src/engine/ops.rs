use rand::Rng;

use super::state::{Board, BoardRaw, Direction, Line, MAX_EXPONENT, Score, Tile};
use super::tables::stores;

/// Outcome of sliding a single line of tile values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShift {
    /// Resulting line, in the same orientation as the input.
    pub line: [u32; 4],
    /// Sum of the tiles created by merges.
    pub score: Score,
    /// Number of merges performed (at most 2).
    pub merges: u8,
}

impl LineShift {
    #[inline]
    pub fn moved(&self, original: [u32; 4]) -> bool {
        self.line != original
    }
}

/// Slide and merge one line of tile values toward the leading edge of `direction`.
///
/// Index 0 is the left end of a row or the top of a column. Each tile merges
/// at most once per move, pairs are taken front to back.
///
/// ```
/// use twenty48_utils::engine::{Direction, slide_line};
/// let r = slide_line([2, 2, 2, 0], Direction::Left);
/// assert_eq!(r.line, [4, 2, 0, 0]);
/// assert_eq!(r.score, 4);
/// ```
pub fn slide_line(line: [u32; 4], direction: Direction) -> LineShift {
    let mut cells = line;
    if direction.is_reversed() {
        cells.reverse();
    }
    let (mut out, score, merges) = merge_toward_front(cells);
    if direction.is_reversed() {
        out.reverse();
    }
    LineShift {
        line: out,
        score,
        merges,
    }
}

fn merge_toward_front(cells: [u32; 4]) -> ([u32; 4], Score, u8) {
    let compacted: Vec<u32> = cells.into_iter().filter(|&v| v != 0).collect();
    let mut out = [0u32; 4];
    let mut len = 0;
    let mut score = 0;
    let mut merges = 0;
    let mut i = 0;
    while i < compacted.len() {
        let cur = compacted[i];
        if i + 1 < compacted.len() && compacted[i + 1] == cur && can_merge(cur) {
            out[len] = cur * 2;
            score += Score::from(cur * 2);
            merges += 1;
            i += 2;
        } else {
            out[len] = cur;
            i += 1;
        }
        len += 1;
    }
    (out, score, merges)
}

// A 4-bit cell tops out at 2^15; two of them have nowhere to go.
#[inline]
fn can_merge(value: u32) -> bool {
    value < (1 << MAX_EXPONENT)
}

/// Slide/merge tiles in the given direction. Returns the new board and the merge score.
pub fn shift(board: Board, direction: Direction) -> (Board, Score) {
    match direction {
        Direction::Left | Direction::Right => shift_rows(board, direction),
        Direction::Up | Direction::Down => shift_cols(board, direction),
    }
}

// Credit to Nneonneo
pub(crate) fn transpose(x: BoardRaw) -> BoardRaw {
    let a1 = x & 0xF0F00F0FF0F00F0F;
    let a2 = x & 0x0000F0F00000F0F0;
    let a3 = x & 0x0F0F00000F0F0000;
    let a = a1 | (a2 << 12) | (a3 >> 12);
    let b1 = a & 0xFF00FF0000FF00FF;
    let b2 = a & 0x00FF00FF00000000;
    let b3 = a & 0x00000000FF00FF00;
    b1 | (b2 >> 24) | (b3 << 24)
}

pub(crate) fn extract_line(board: BoardRaw, line_idx: u64) -> Line {
    (board >> ((3 - line_idx) * 16)) & 0xffff
}

/// Return the cell's actual value (0 if empty), e.g., 2, 4, 8, ...
pub fn get_tile_val(board: Board, idx: usize) -> u32 {
    super::state::exponent_to_value(get_tile(board, idx) as u8)
}

pub(crate) fn line_to_vec(line: Line) -> Vec<Tile> {
    (0..4).fold(Vec::new(), |mut tiles, tile_idx| {
        tiles.push(line >> ((3 - tile_idx) * 4) & 0xf);
        tiles
    })
}

/// True if some direction changes the board.
pub fn can_move(board: Board) -> bool {
    Direction::ALL
        .into_iter()
        .any(|direction| shift(board, direction).0 != board)
}

/// True if two horizontally or vertically adjacent non-empty cells hold the same tile.
pub fn has_adjacent_pair(board: Board) -> bool {
    let tiles: Vec<u8> = board.tiles().collect();
    (0..16).any(|idx| {
        let t = tiles[idx];
        if t == 0 {
            return false;
        }
        let right = idx % 4 < 3 && tiles[idx + 1] == t;
        let down = idx < 12 && tiles[idx + 4] == t;
        right || down
    })
}

// https://stackoverflow.com/questions/38225571/count-number-of-zero-nibbles-in-an-unsigned-64-bit-integer
/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> u64 {
    16 - count_non_empty(board)
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R, four_probability: f64) -> Tile {
    if rng.gen_bool(four_probability) { 2 } else { 1 }
}

fn shift_rows(board: Board, direction: Direction) -> (Board, Score) {
    let table = stores().table(direction);
    (0..4).fold((Board::EMPTY, 0), |(new_board, score), row_idx| {
        let row_val = extract_line(board.0, row_idx) as u16;
        let new_row_val = table.line(row_val);
        (
            Board(new_board.0 | (new_row_val << (48 - (16 * row_idx)))),
            score + table.score(row_val),
        )
    })
}

fn shift_cols(board: Board, direction: Direction) -> (Board, Score) {
    let transpose_board = transpose(board.0);
    let table = stores().table(direction);
    (0..4).fold((Board::EMPTY, 0), |(new_board, score), col_idx| {
        let col_val = extract_line(transpose_board, col_idx) as u16;
        let new_col_val = table.line(col_val);
        (
            Board(new_board.0 | (new_col_val << (12 - (4 * col_idx)))),
            score + table.score(col_val),
        )
    })
}

/// Build the lookup entry for one packed 16-bit line.
pub(crate) fn table_entry(line: Line, direction: Direction) -> (Line, Score) {
    let tiles = line_to_vec(line);
    let values = [0, 1, 2, 3].map(|i| super::state::exponent_to_value(tiles[i] as u8));
    let shifted = slide_line(values, direction);
    let exps: Vec<Tile> = shifted
        .line
        .iter()
        .map(|&v| if v == 0 { 0 } else { v.trailing_zeros() as Tile })
        .collect();
    let packed = match direction {
        Direction::Left | Direction::Right => vec_to_row(&exps),
        Direction::Up | Direction::Down => vec_to_col(&exps),
    };
    (packed, shifted.score)
}

fn vec_to_row(tiles: &[Tile]) -> Line {
    tiles[0] << 12 | tiles[1] << 8 | tiles[2] << 4 | tiles[3]
}

fn vec_to_col(tiles: &[Tile]) -> Line {
    tiles[0] << 48 | tiles[1] << 32 | tiles[2] << 16 | tiles[3]
}

fn count_non_empty(board: Board) -> u64 {
    let mut board_copy = board.0;
    board_copy |= board_copy >> 1;
    board_copy |= board_copy >> 2;
    board_copy &= 0x1111111111111111;
    board_copy.count_ones() as u64
}

pub(crate) fn format_val(val: u8) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", 1u32 << x),
    }
}

pub fn get_highest_tile_val(board: Board) -> u32 {
    let max_tile = board.tiles().max().unwrap_or(0);
    super::state::exponent_to_value(max_tile)
}

fn get_tile(board: Board, idx: usize) -> Tile {
    (board.0 >> (60 - (4 * idx))) & 0xf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_slide_line_left() {
        assert_eq!(slide_line([0, 0, 0, 0], Direction::Left).line, [0, 0, 0, 0]);
        assert_eq!(slide_line([2, 4, 2, 4], Direction::Left).line, [2, 4, 2, 4]);
        assert_eq!(slide_line([2, 2, 4, 4], Direction::Left).line, [4, 8, 0, 0]);
        assert_eq!(slide_line([2, 0, 0, 2], Direction::Left).line, [4, 0, 0, 0]);
        assert_eq!(slide_line([4, 2, 2, 0], Direction::Left).line, [4, 4, 0, 0]);
    }

    #[test]
    fn it_slide_line_right() {
        assert_eq!(slide_line([0, 0, 0, 0], Direction::Right).line, [0, 0, 0, 0]);
        assert_eq!(slide_line([2, 4, 2, 4], Direction::Right).line, [2, 4, 2, 4]);
        assert_eq!(slide_line([2, 2, 4, 4], Direction::Right).line, [0, 0, 4, 8]);
        assert_eq!(slide_line([32, 0, 0, 32], Direction::Right).line, [0, 0, 0, 64]);
        assert_eq!(slide_line([0, 4, 4, 4], Direction::Right).line, [0, 0, 4, 8]);
    }

    #[test]
    fn four_equal_tiles_merge_pairwise() {
        let r = slide_line([2, 2, 2, 2], Direction::Left);
        assert_eq!(r.line, [4, 4, 0, 0]);
        assert_eq!(r.score, 8);
        assert_eq!(r.merges, 2);
    }

    #[test]
    fn three_equal_tiles_merge_front_pair_only() {
        let r = slide_line([2, 2, 2, 0], Direction::Left);
        assert_eq!(r.line, [4, 2, 0, 0]);
        assert_eq!(r.score, 4);
        assert_eq!(r.merges, 1);

        let r = slide_line([0, 2, 2, 2], Direction::Right);
        assert_eq!(r.line, [0, 0, 2, 4]);
    }

    #[test]
    fn merged_tile_is_not_merged_again() {
        let r = slide_line([4, 2, 2, 0], Direction::Left);
        assert_eq!(r.line, [4, 4, 0, 0]);
        assert_eq!(r.score, 4);
    }

    #[test]
    fn right_slide_to_edge() {
        let original = [0, 0, 2, 2];
        let r = slide_line(original, Direction::Right);
        assert_eq!(r.line, [0, 0, 0, 4]);
        assert_eq!(r.score, 4);
        assert!(r.moved(original));
    }

    #[test]
    fn max_tiles_do_not_merge() {
        let r = slide_line([32768, 32768, 0, 0], Direction::Left);
        assert_eq!(r.line, [32768, 32768, 0, 0]);
        assert_eq!(r.score, 0);
    }

    #[test]
    fn test_shift_left() {
        crate::engine::new();
        let cases = [
            (0x0000, 0x0000, 0),
            (0x0002, 0x2000, 0),
            (0x2020, 0x3000, 8),
            (0x1332, 0x1420, 16),
            (0x1234, 0x1234, 0),
            (0x1002, 0x1200, 0),
        ];
        for (before, after, score) in cases {
            assert_eq!(
                shift(Board::from_raw(before), Direction::Left),
                (Board::from_raw(after), score)
            );
        }
        assert_ne!(
            shift(Board::from_raw(0x1210), Direction::Left).0,
            Board::from_raw(0x2200)
        );
    }

    #[test]
    fn test_shift_right() {
        crate::engine::new();
        let cases = [
            (0x0000, 0x0000, 0),
            (0x2000, 0x0002, 0),
            (0x2020, 0x0003, 8),
            (0x1332, 0x0142, 16),
            (0x1234, 0x1234, 0),
            (0x1002, 0x0012, 0),
        ];
        for (before, after, score) in cases {
            assert_eq!(
                shift(Board::from_raw(before), Direction::Right),
                (Board::from_raw(after), score)
            );
        }
    }

    #[test]
    fn test_move_left() {
        let game = Board::from_raw(0x1234133220021002);
        let (game, score) = shift(game, Direction::Left);
        assert_eq!(game, Board::from_raw(0x1234142030001200));
        assert_eq!(score, 16 + 8);
    }

    #[test]
    fn test_move_up() {
        let game = Board::from_raw(0x1121230033004222);
        let (game, score) = shift(game, Direction::Up);
        assert_eq!(game, Board::from_raw(0x1131240232004000));
        assert_eq!(score, 16 + 8);
    }

    #[test]
    fn test_move_right() {
        let game = Board::from_raw(0x1234133220021002);
        let (game, _) = shift(game, Direction::Right);
        assert_eq!(game, Board::from_raw(0x1234014200030012));
    }

    #[test]
    fn test_move_down() {
        let game = Board::from_raw(0x1121230033004222);
        let (game, _) = shift(game, Direction::Down);
        assert_eq!(game, Board::from_raw(0x1000210034014232));
    }

    #[test]
    fn it_count_empty() {
        let game = Board::from_raw(0x1111000011110000);
        assert_eq!(count_empty(game), 8);
        let game = Board::from_raw(0x1100000000000000);
        assert_eq!(count_empty(game), 14);
    }

    #[test]
    fn it_get_tile_val() {
        let game = Board::from_raw(0x0123456789abcdef);
        assert_eq!(get_tile_val(game, 3), 8);
        assert_eq!(get_tile_val(game, 10), 1024);
        assert_eq!(get_tile_val(game, 15), 32768);
        assert_eq!(get_tile_val(Board::EMPTY, 8), 0);
    }

    #[test]
    fn adjacent_pairs_horizontal_and_vertical() {
        assert!(!has_adjacent_pair(Board::from_raw(0x1212212112122121)));
        assert!(has_adjacent_pair(Board::from_raw(0x1212212112122111)));
        assert!(has_adjacent_pair(Board::from_raw(0x1212212112121121)));
        // Row wrap is not adjacency.
        assert!(!has_adjacent_pair(Board::from_raw(0x1234412323413412)));
    }

    #[test]
    fn full_board_without_pairs_cannot_move() {
        let b = Board::from_raw(0x1212212112122121);
        assert!(!can_move(b));
        assert!(can_move(Board::from_raw(0x1000000000000000)));
    }

    #[test]
    fn highest_tile() {
        assert_eq!(get_highest_tile_val(Board::EMPTY), 0);
        assert_eq!(get_highest_tile_val(Board::from_raw(0x0000_0000_00b0_0001)), 2048);
    }
}
