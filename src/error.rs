use thiserror::Error;

/// Errors raised while reading a tile map from text or disk.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("map contains no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile character {ch:?} at row {row}, column {column}")]
    UnknownTile { ch: char, row: usize, column: usize },

    #[error("map declares more than one {0} marker")]
    DuplicateMarker(&'static str),
}

/// Error returned when a `x,y` coordinate string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected a coordinate of the form `x,y`, got {0:?}")]
pub struct CoordParseError(pub String);
