//! Game module - one play session over a board
//!
//! The game wraps a board with difficulty, move counting, solved-state
//! aggregation, persistence, and the bookkeeping behind tile artwork. Its
//! counters stay consistent by listening to the board instead of
//! recounting it after every change.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::board::{Board, MoveListener};
use crate::core::tile::{Tile, TileOnTargetListener};
use crate::error::{GameError, ImageError};
use crate::image::{ImageId, ImageSource};
use crate::settings::{SettingsEditor, SettingsSource};
use crate::types::{
    Difficulty, BOARD_STATE_SETTING, DIFFICULTY_SETTING, IMAGE_ID_SETTING, MOVE_COUNT_SETTING,
};

/// Move and score counters, registered on the board as listeners
#[derive(Debug, Default)]
struct SessionCounters {
    moves: Cell<u32>,
    score: Cell<usize>,
}

impl<A> MoveListener<A> for SessionCounters {
    fn tile_moved(&self, _blank: &Tile<A>, _moved: &Tile<A>) {
        self.moves.set(self.moves.get() + 1);
    }
}

impl<A> TileOnTargetListener<A> for SessionCounters {
    fn on_target_changed(&self, _tile: &Tile<A>, on_target: bool) {
        let score = self.score.get();
        self.score.set(if on_target { score + 1 } else { score - 1 });
    }
}

/// One play session: difficulty, board, counters, persistence, artwork
pub struct Game<A = ()> {
    difficulty: Difficulty,
    board: Board<A>,
    counters: Rc<SessionCounters>,
    /// True once play has begun; a preview does not count.
    started: bool,
    rng: StdRng,
    selected_image: Option<ImageId>,
    tile_size: Option<(u32, u32)>,
    aspect_ratio: Option<f32>,
}

impl<A> Game<A> {
    /// Create an unstarted game at the given difficulty
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_os_rng())
    }

    /// Deterministic construction for reproducible shuffles
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, rng: StdRng) -> Self {
        Game {
            difficulty,
            board: Board::with_size(difficulty.board_size()),
            counters: Rc::new(SessionCounters::default()),
            started: false,
            rng,
            selected_image: None,
            tile_size: None,
            aspect_ratio: None,
        }
    }

    /// Reconstruct a game from persisted settings
    ///
    /// An unrecognized difficulty falls back to the default and is logged.
    /// The image identifier is read in its numeric form first, then as a
    /// token. Finishes by running [`Game::load`].
    pub fn restore(settings: &impl SettingsSource) -> Self {
        let difficulty = match settings.get_str(DIFFICULTY_SETTING) {
            Some(name) => Difficulty::from_str(&name).unwrap_or_else(|| {
                log::warn!("unknown difficulty {name:?}, using the default");
                Difficulty::default()
            }),
            None => Difficulty::default(),
        };
        let mut game = Game::new(difficulty);
        if let Some(id) = settings.get_int(IMAGE_ID_SETTING) {
            match u32::try_from(id) {
                Ok(id) => game.set_selected_image(ImageId::Builtin(id)),
                Err(_) => log::warn!("ignoring out-of-range image id {id}"),
            }
        } else if let Some(token) = settings.get_str(IMAGE_ID_SETTING) {
            game.set_selected_image(ImageId::Token(token));
        }
        game.load(settings);
        game
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The wrapped board
    pub fn board(&self) -> &Board<A> {
        &self.board
    }

    /// Mutable access for driving moves; counters stay wired as listeners
    pub fn board_mut(&mut self) -> &mut Board<A> {
        &mut self.board
    }

    pub fn move_count(&self) -> u32 {
        self.counters.moves.get()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether every tile sits on its home cell
    pub fn is_solved(&self) -> bool {
        self.counters.score.get() == self.board.tile_count()
    }

    /// Begin (or restart) play: reset the counter, shuffle, go
    ///
    /// Counter registration happens only on the first call for this
    /// instance; later calls re-shuffle without re-registering.
    pub fn start(&mut self) {
        self.counters.moves.set(0);
        self.board.place_tiles_random(&mut self.rng);
        self.attach_counters();
        self.started = true;
    }

    /// Show the solved arrangement before play begins
    pub fn preview(&mut self) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        self.board.place_tiles_on_target();
        Ok(())
    }

    /// Persist the session
    ///
    /// The difficulty is always written. The image identifier is written
    /// or removed depending on selection. Move count and layout are only
    /// present for a started game.
    pub fn save(&self, settings: &mut impl SettingsEditor) -> Result<(), GameError> {
        settings.put_str(DIFFICULTY_SETTING, self.difficulty.as_str());
        match &self.selected_image {
            Some(ImageId::Builtin(id)) => settings.put_int(IMAGE_ID_SETTING, *id as i64),
            Some(ImageId::Token(token)) => settings.put_str(IMAGE_ID_SETTING, token),
            None => settings.remove(IMAGE_ID_SETTING),
        }
        if self.started {
            let layout = self.board.tile_layout()?;
            settings.put_int(MOVE_COUNT_SETTING, self.counters.moves.get() as i64);
            settings.put_str(BOARD_STATE_SETTING, &layout);
        } else {
            settings.remove(MOVE_COUNT_SETTING);
            settings.remove(BOARD_STATE_SETTING);
        }
        Ok(())
    }

    /// Restore a previously saved session
    ///
    /// A missing layout key means "no saved game" and leaves the game
    /// untouched. A layout that fails to parse is logged and downgraded to
    /// a fresh shuffle, keeping the persisted move count.
    pub fn load(&mut self, settings: &impl SettingsSource) {
        let Some(layout) = settings.get_str(BOARD_STATE_SETTING) else {
            return;
        };
        let moves = settings.get_int(MOVE_COUNT_SETTING).unwrap_or(0);
        self.counters.moves.set(u32::try_from(moves).unwrap_or(0));
        if let Err(err) = self.board.place_tiles(&layout) {
            log::warn!("discarding saved board layout: {err}");
            self.board.place_tiles_random(&mut self.rng);
        }
        self.attach_counters();
        self.started = true;
    }

    /// Select the artwork image; drops any previously loaded artwork
    pub fn set_selected_image(&mut self, id: ImageId) {
        self.selected_image = Some(id);
        self.clear_images();
    }

    /// Clear the image selection and any loaded artwork
    pub fn reset_selected_image(&mut self) {
        self.selected_image = None;
        self.clear_images();
    }

    pub fn is_image_selected(&self) -> bool {
        self.selected_image.is_some()
    }

    pub fn selected_image(&self) -> Option<&ImageId> {
        self.selected_image.as_ref()
    }

    /// Record the pixel size of one tile, used when slicing artwork
    pub fn set_tile_size(&mut self, width: u32, height: u32) {
        self.tile_size = Some((width, height));
    }

    pub fn tile_size(&self) -> Option<(u32, u32)> {
        self.tile_size
    }

    /// Width-to-height ratio of the selected image
    pub fn image_aspect_ratio(&self) -> Result<f32, GameError> {
        self.aspect_ratio.ok_or(GameError::NoImageLoaded)
    }

    /// Ask the image source for the selected image's dimensions
    pub fn update_image_size<S>(&mut self, source: &mut S) -> Result<(), GameError>
    where
        S: ImageSource<Art = A>,
    {
        let id = self
            .selected_image
            .as_ref()
            .ok_or(GameError::NoImageSelected)?;
        let (width, height) = source.image_size(id)?;
        if height == 0 {
            return Err(ImageError::new("image reports zero height").into());
        }
        self.aspect_ratio = Some(width as f32 / height as f32);
        Ok(())
    }

    /// Load per-tile artwork from the selected image
    ///
    /// The source scales the image to tile size times board size and
    /// slices it row-major; each tile receives the slice at its home cell,
    /// so a solved board reassembles the picture. Fails without touching
    /// any state when a precondition or the source fails.
    pub fn load_image<S>(&mut self, source: &mut S) -> Result<(), GameError>
    where
        S: ImageSource<Art = A>,
    {
        let id = self
            .selected_image
            .as_ref()
            .ok_or(GameError::NoImageSelected)?;
        let (tile_w, tile_h) = self.tile_size.ok_or(GameError::TileSizeNotSet)?;
        let size = self.board.size();
        let slices = source.slice(id, size, tile_w, tile_h)?;
        if slices.len() != self.board.tile_count() {
            return Err(ImageError::new(format!(
                "expected {} slices, source produced {}",
                self.board.tile_count(),
                slices.len()
            ))
            .into());
        }
        let mut slices: Vec<Option<A>> = slices.into_iter().map(Some).collect();
        self.board.for_each_tile_mut(|tile| {
            if let Some(target) = tile.target() {
                let art = slices[target.row * size + target.col].take();
                tile.set_art(art);
            }
        });
        Ok(())
    }

    fn attach_counters(&mut self) {
        if self.started {
            return;
        }
        self.counters.score.set(self.board.score());
        let counters = self.counters.clone();
        self.board.add_move_listener(counters.clone());
        self.board.add_tile_on_target_listener(counters);
    }

    fn clear_images(&mut self) {
        self.aspect_ratio = None;
        self.board.for_each_tile_mut(|tile| tile.set_art(None));
    }
}

impl<A> Default for Game<A> {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl<A> fmt::Debug for Game<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("difficulty", &self.difficulty)
            .field("started", &self.started)
            .field("move_count", &self.counters.moves.get())
            .field("score", &self.counters.score.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Move;

    #[test]
    fn test_default_game_is_unstarted_medium() {
        let game: Game = Game::default();
        assert_eq!(game.difficulty(), Difficulty::Medium);
        assert!(!game.is_started());
        assert_eq!(game.move_count(), 0);
        assert!(!game.is_solved());
    }

    #[test]
    fn test_counters_follow_the_board() {
        let mut game: Game = Game::with_seed(Difficulty::Easy, 42);
        game.start();

        // force a known position; placement keeps the counters in sync
        game.board_mut().place_tiles("1,2,3,4,5,6,7,8,0").unwrap();
        assert!(game.is_solved());
        assert_eq!(game.move_count(), 0);

        game.board_mut().make_move(Move::Left).unwrap();
        assert_eq!(game.move_count(), 1);
        assert!(!game.is_solved());

        game.board_mut().make_move(Move::Right).unwrap();
        assert_eq!(game.move_count(), 2);
        assert!(game.is_solved());
    }

    #[test]
    fn test_solved_flag_requires_a_session() {
        let mut game: Game = Game::with_seed(Difficulty::Easy, 1);
        game.preview().unwrap();
        // the board shows the solved arrangement, but play never began
        assert_eq!(game.board().score(), 9);
        assert!(!game.is_solved());
    }
}
