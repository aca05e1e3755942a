//! Core value types shared across the engine
//! Pure data: directions, difficulty presets, positions, settings keys

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;

/// Persisted settings keys
pub const DIFFICULTY_SETTING: &str = "difficulty";
pub const IMAGE_ID_SETTING: &str = "image_id";
pub const MOVE_COUNT_SETTING: &str = "move_count";
pub const BOARD_STATE_SETTING: &str = "tiles";

/// A (row, column) cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

/// Move directions for the blank tile
///
/// A direction describes the blank's travel: `Up`/`Down` step its row by
/// -1/+1, `Left`/`Right` step its column by -1/+1. Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Whether this direction runs along the horizontal axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Move::Left | Move::Right)
    }

    /// Whether this direction runs along the vertical axis
    pub fn is_vertical(&self) -> bool {
        !self.is_horizontal()
    }

    /// Signed unit offset along this direction's axis
    pub fn amount(&self) -> isize {
        match self {
            Move::Up | Move::Left => -1,
            Move::Down | Move::Right => 1,
        }
    }

    /// Parse a direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Move::Up),
            "down" => Some(Move::Down),
            "left" => Some(Move::Left),
            "right" => Some(Move::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty presets, each mapping 1:1 to a board edge size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Board edge size played at this difficulty
    pub fn board_size(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }

    /// Invert the board-size mapping
    ///
    /// Boards outside [3,5] are constructible but not playable presets.
    pub fn for_board_size(size: usize) -> Result<Self, GameError> {
        match size {
            3 => Ok(Difficulty::Easy),
            4 => Ok(Difficulty::Medium),
            5 => Ok(Difficulty::Hard),
            _ => Err(GameError::UnsupportedBoardSize(size)),
        }
    }

    /// Parse a persisted level name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Persisted level name
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
