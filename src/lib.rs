//! Sliding-tile ("n-puzzle") engine
//!
//! The model behind a square grid of numbered tiles plus one blank: legal
//! moves, solvable random shuffles, progress tracking, and a compact
//! serialized board form. It has no opinions about rendering, storage
//! backends, or image decoding; those plug in through small traits.
//!
//! - **Solvable by construction**: shuffles are checked against Calabro's
//!   parity criterion and fixed up when they fail it
//! - **Consistent counters**: move count and score follow the board through
//!   listener notifications instead of mid-session rescans
//! - **Deterministic**: seeded games reproduce their shuffles exactly
//! - **Single-threaded by contract**: listener handles are `Rc`; wrap an
//!   instance in your own lock if it must cross threads
//!
//! # Module Structure
//!
//! - [`core`]: tiles, the board, and the game session wrapper
//! - [`types`]: directions, difficulty presets, positions, settings keys
//! - [`error`]: the structural / session / image error kinds
//! - [`settings`]: the persistence seam and an in-memory store
//! - [`image`]: the artwork seam
//!
//! # Example
//!
//! ```
//! use npuzzle_core::{Difficulty, Game};
//!
//! let mut game: Game = Game::with_seed(Difficulty::Easy, 7);
//! game.start();
//!
//! // a fresh shuffle is always reachable from the solved state
//! assert!(game.board().is_solvable().unwrap());
//! assert_eq!(game.move_count(), 0);
//!
//! // any tile orthogonally adjacent to the blank may move through it
//! let mut direction = None;
//! game.board().for_each_tile(|tile| {
//!     if direction.is_none() {
//!         direction = game.board().permitted_move_for(tile).unwrap();
//!     }
//! });
//! let direction = direction.expect("some tile always neighbors the blank");
//!
//! game.board_mut().make_move(direction).unwrap();
//! assert_eq!(game.move_count(), 1);
//! ```

pub mod core;
pub mod error;
pub mod image;
pub mod settings;
pub mod types;

// Re-export the working set for convenience
pub use crate::core::{Board, Game, MoveListener, Tile, TileOnTargetListener};
pub use error::{BoardError, GameError, ImageError};
pub use image::{ImageId, ImageSource};
pub use settings::{MemorySettings, SettingsEditor, SettingsSource};
pub use types::{Difficulty, Move, Pos};
