use std::path::PathBuf;

use thiserror::Error;

/// Problems with a text map layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map layout is empty")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, ch: char },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(
        "terminal is {cols}x{rows}, the arena needs at least {need_cols}x{need_rows}"
    )]
    TerminalTooSmall {
        need_cols: u16,
        need_rows: u16,
        cols: u16,
        rows: u16,
    },
    #[error("failed to open log file {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
