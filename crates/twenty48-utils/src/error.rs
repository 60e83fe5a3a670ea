/// Errors raised when building engine values from untrusted input.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("cell ({row}, {col}) holds {value}, expected 0 or a power of two in 2..=32768")]
    InvalidTile { row: usize, col: usize, value: u32 },
    #[error("target tile {0} must be a power of two in 4..=32768")]
    InvalidTarget(u32),
    #[error("four-tile probability {0} must lie in [0, 1]")]
    InvalidProbability(f64),
}
