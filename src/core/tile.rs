//! Tile module - the identity-bearing cells of the puzzle
//!
//! A tile knows its number (0 is the blank), where it currently sits, and
//! where it belongs in the solved arrangement. When a placement flips its
//! on-target status it notifies its listeners; that is how the running
//! score stays consistent without rescanning the board.

use std::fmt;
use std::rc::Rc;

use crate::types::Pos;

/// Observer for a tile entering or leaving its target cell
///
/// Callbacks run synchronously, in registration order, after the tile's
/// position has been updated.
pub trait TileOnTargetListener<A = ()> {
    fn on_target_changed(&self, tile: &Tile<A>, on_target: bool);
}

/// One cell of the puzzle; carries an opaque artwork payload `A`
pub struct Tile<A = ()> {
    number: usize,
    pos: Option<Pos>,
    target: Option<Pos>,
    art: Option<A>,
    listeners: Vec<Rc<dyn TileOnTargetListener<A>>>,
}

impl<A> Tile<A> {
    pub(crate) fn new(number: usize) -> Self {
        Tile {
            number,
            pos: None,
            target: None,
            art: None,
            listeners: Vec::new(),
        }
    }

    /// Tile number; 0 denotes the blank
    pub fn number(&self) -> usize {
        self.number
    }

    /// Current position, `None` until first placed
    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    /// Home cell in the solved arrangement
    pub fn target(&self) -> Option<Pos> {
        self.target
    }

    /// Whether the tile currently sits on its home cell
    pub fn is_on_target(&self) -> bool {
        matches!((self.pos, self.target), (Some(p), Some(t)) if p == t)
    }

    /// Presentation artwork, if any has been loaded
    pub fn art(&self) -> Option<&A> {
        self.art.as_ref()
    }

    pub(crate) fn set_art(&mut self, art: Option<A>) {
        self.art = art;
    }

    /// Move the tile; notifies listeners when its on-target status flips
    pub(crate) fn place(&mut self, row: usize, col: usize) {
        let was = self.is_on_target();
        self.pos = Some(Pos::new(row, col));
        let now = self.is_on_target();
        if was != now {
            self.notify(now);
        }
    }

    /// Assign the home cell; same change detection as `place`
    pub(crate) fn set_target(&mut self, row: usize, col: usize) {
        let was = self.is_on_target();
        self.target = Some(Pos::new(row, col));
        let now = self.is_on_target();
        if was != now {
            self.notify(now);
        }
    }

    pub(crate) fn add_on_target_listener(&mut self, listener: Rc<dyn TileOnTargetListener<A>>) {
        self.listeners.push(listener);
    }

    fn notify(&self, on_target: bool) {
        for listener in &self.listeners {
            listener.on_target_changed(self, on_target);
        }
    }
}

impl<A> fmt::Debug for Tile<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("number", &self.number)
            .field("pos", &self.pos)
            .field("target", &self.target)
            .field("on_target", &self.is_on_target())
            .finish()
    }
}

impl<A> fmt::Display for Tile<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile {}", self.number)
    }
}
