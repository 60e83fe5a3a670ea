use std::sync::OnceLock;

use super::ops::table_entry;
use super::state::{Direction, Line, Score};

/// Precomputed lookup tables for all possible 4-tile lines (16-bit packed).
///
/// Sliding a row or column depends only on its 4 nibbles, so every move is
/// answered by one lookup per line. Each direction gets its own table:
///
/// - `lines[i]`: replacement line after the move. Left/Right entries use the
///   row layout (bits 0..16), Up/Down entries the column layout (one nibble
///   per 16-bit lane) so they can be OR-ed straight back into the board.
/// - `scores[i]`: sum of merged tile values produced by the move.
///
/// Access is via `stores()` which lazily builds a single global `Stores`.
/// The public `engine::new()` simply forces the build early.
pub(crate) struct Stores {
    up: LineTable,
    down: LineTable,
    left: LineTable,
    right: LineTable,
}

pub(crate) struct LineTable {
    lines: Box<[Line]>,
    scores: Box<[Score]>,
}

const LINE_TABLE_SIZE: usize = 0x1_0000; // 65,536 possible 16-bit lines

static STORES: OnceLock<Stores> = OnceLock::new();

/// Ensure lookup tables are initialized.
pub fn init() {
    let _ = stores();
}

#[inline(always)]
pub(crate) fn stores() -> &'static Stores {
    STORES.get_or_init(create_stores)
}

impl Stores {
    #[inline(always)]
    pub(crate) fn table(&self, direction: Direction) -> &LineTable {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

impl LineTable {
    fn build(direction: Direction) -> Self {
        // Allocate on the heap to keep stack frames small during init.
        let mut lines = vec![0 as Line; LINE_TABLE_SIZE];
        let mut scores = vec![0 as Score; LINE_TABLE_SIZE];
        for (val, (line, score)) in lines.iter_mut().zip(scores.iter_mut()).enumerate() {
            (*line, *score) = table_entry(val as Line, direction);
        }
        LineTable {
            lines: lines.into_boxed_slice(),
            scores: scores.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub(crate) fn line(&self, idx: u16) -> Line {
        self.lines[idx as usize]
    }

    #[inline(always)]
    pub(crate) fn score(&self, idx: u16) -> Score {
        self.scores[idx as usize]
    }
}

fn create_stores() -> Stores {
    log::debug!("building line tables ({LINE_TABLE_SIZE} entries per direction)");
    Stores {
        up: LineTable::build(Direction::Up),
        down: LineTable::build(Direction::Down),
        left: LineTable::build(Direction::Left),
        right: LineTable::build(Direction::Right),
    }
}
