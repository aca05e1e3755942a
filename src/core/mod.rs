//! Core module - the puzzle model
//!
//! Tiles, the board that owns them, and the game session wrapper. Pure
//! model logic: no UI, no storage backend, no image decoding.

pub mod board;
pub mod game;
pub mod tile;

// Re-export the model types
pub use board::{Board, MoveListener};
pub use game::Game;
pub use tile::{Tile, TileOnTargetListener};
