//! Error types for the puzzle engine
//!
//! Three kinds, kept apart on purpose: [`BoardError`] for structural misuse
//! of the board, [`GameError`] for session-state misuse, and [`ImageError`]
//! for failures inside the external image subsystem. Structural errors mean
//! a caller bug; image errors degrade to "numeric tiles, no artwork".

use thiserror::Error;

use crate::types::Move;

/// Structural board errors
#[derive(Debug, Error)]
pub enum BoardError {
    /// Construction with a zero size or one whose square overflows the
    /// allocation range.
    #[error("invalid board size {0}")]
    InvalidSize(usize),

    #[error("row {row} is outside a board of size {size}")]
    RowOutOfRange { row: usize, size: usize },

    #[error("column {col} is outside a board of size {size}")]
    ColumnOutOfRange { col: usize, size: usize },

    /// A position query or a move before any placement populated the cell.
    #[error("the board has no tiles placed on it")]
    EmptyBoard,

    /// The tile handed in is not the object this board holds under that
    /// number.
    #[error("tile {0} does not belong to this board")]
    ForeignTile(usize),

    /// The requested move would push the blank off the grid.
    #[error("cannot move {0}: the destination is off the board")]
    MoveOffBoard(Move),

    #[error("layout token {0:?} is not a tile number")]
    LayoutSyntax(String),

    #[error("layout names tile {number}, but the board holds tiles 0..{tile_count}")]
    LayoutUnknownTile { number: usize, tile_count: usize },

    #[error("tile {0} appears more than once in the layout")]
    LayoutDuplicateTile(usize),

    #[error("layout supplies {placed} tiles, the board needs {expected}")]
    LayoutIncomplete { expected: usize, placed: usize },
}

/// Session-state errors raised by [`Game`](crate::Game) operations
#[derive(Debug, Error)]
pub enum GameError {
    /// `preview` requested after the game has started.
    #[error("the game has already started")]
    AlreadyStarted,

    /// No difficulty preset plays a board of this size.
    #[error("no difficulty preset for a board of size {0}")]
    UnsupportedBoardSize(usize),

    /// An image operation before an image was selected.
    #[error("no image is selected")]
    NoImageSelected,

    /// Aspect ratio requested before the image dimensions were loaded.
    #[error("no image has been loaded")]
    NoImageLoaded,

    /// Artwork loading before the tile pixel size was set.
    #[error("the tile size has not been set")]
    TileSizeNotSet,

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// External image subsystem failure: decode, scale, or slice
#[derive(Debug, Error)]
#[error("image processing failed: {message}")]
pub struct ImageError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ImageError {
    pub fn new(message: impl Into<String>) -> Self {
        ImageError {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying decoder/IO error with context
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ImageError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
