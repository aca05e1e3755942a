//! Game tests - sessions, persistence, and the image pipeline

use npuzzle_core::core::Game;
use npuzzle_core::error::{GameError, ImageError};
use npuzzle_core::image::{ImageId, ImageSource};
use npuzzle_core::settings::{MemorySettings, SettingsEditor, SettingsSource};
use npuzzle_core::types::{Difficulty, Move};

/// Started 3x3 game forced onto the solved layout
fn solved_easy_game(seed: u64) -> Game {
    let mut game: Game = Game::with_seed(Difficulty::Easy, seed);
    game.start();
    game.board_mut().place_tiles("1,2,3,4,5,6,7,8,0").unwrap();
    game
}

#[test]
fn test_game_start_shuffles_into_a_playable_session() {
    let mut game: Game = Game::with_seed(Difficulty::Medium, 42);
    assert!(!game.is_started());

    game.start();
    assert!(game.is_started());
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.board().is_solvable().unwrap(), true);

    // every tile landed somewhere
    let mut numbers: Vec<usize> = game
        .board()
        .tile_layout()
        .unwrap()
        .split(',')
        .map(|t| t.parse().unwrap())
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (0..16).collect::<Vec<_>>());
}

#[test]
fn test_game_restart_does_not_double_count_moves() {
    let mut game = solved_easy_game(42);
    game.board_mut().make_move(Move::Left).unwrap();
    assert_eq!(game.move_count(), 1);

    // restarting resets the counter without re-registering it
    game.start();
    assert_eq!(game.move_count(), 0);
    game.board_mut().place_tiles("1,2,3,4,5,6,7,8,0").unwrap();
    game.board_mut().make_move(Move::Left).unwrap();
    assert_eq!(game.move_count(), 1);
}

#[test]
fn test_game_preview_is_refused_after_start() {
    let mut game: Game = Game::with_seed(Difficulty::Easy, 1);
    game.preview().unwrap();
    // the preview shows the solved arrangement without starting play
    assert_eq!(game.board().tile_layout().unwrap(), "1,2,3,4,5,6,7,8,0");
    assert!(!game.is_started());

    game.start();
    assert!(matches!(game.preview(), Err(GameError::AlreadyStarted)));
}

#[test]
fn test_game_save_unstarted_clears_stale_session_keys() {
    let mut settings = MemorySettings::new();
    settings.put_int("move_count", 9);
    settings.put_str("tiles", "1,2,3,4,5,6,7,8,0");

    let game: Game = Game::with_seed(Difficulty::Medium, 3);
    game.save(&mut settings).unwrap();

    assert_eq!(settings.get_str("difficulty").as_deref(), Some("MEDIUM"));
    assert!(!settings.contains_key("move_count"));
    assert!(!settings.contains_key("tiles"));
    assert!(!settings.contains_key("image_id"));
}

#[test]
fn test_game_save_load_round_trip() {
    let mut game = solved_easy_game(7);
    game.board_mut().make_move(Move::Left).unwrap();
    game.board_mut().make_move(Move::Right).unwrap();
    assert_eq!(game.move_count(), 2);

    let mut settings = MemorySettings::new();
    game.save(&mut settings).unwrap();
    assert_eq!(settings.get_str("difficulty").as_deref(), Some("EASY"));
    assert_eq!(settings.get_int("move_count"), Some(2));
    assert_eq!(
        settings.get_str("tiles").as_deref(),
        Some("1,2,3,4,5,6,7,8,0")
    );

    let restored: Game = Game::restore(&settings);
    assert_eq!(restored.difficulty(), Difficulty::Easy);
    assert!(restored.is_started());
    assert_eq!(restored.move_count(), 2);
    assert_eq!(restored.board().tile_layout().unwrap(), "1,2,3,4,5,6,7,8,0");
    assert!(restored.is_solved());
}

#[test]
fn test_game_restore_falls_back_on_unknown_difficulty() {
    let mut settings = MemorySettings::new();
    settings.put_str("difficulty", "NIGHTMARE");

    let game: Game = Game::restore(&settings);
    assert_eq!(game.difficulty(), Difficulty::Medium);
    assert!(!game.is_started());
}

#[test]
fn test_game_restore_without_a_saved_session_stays_unstarted() {
    let mut settings = MemorySettings::new();
    settings.put_str("difficulty", "HARD");

    let game: Game = Game::restore(&settings);
    assert_eq!(game.difficulty(), Difficulty::Hard);
    assert!(!game.is_started());
    assert_eq!(game.move_count(), 0);
    // no layout was loaded, the board is still unplaced
    assert!(game.board().tile_layout().is_err());
}

#[test]
fn test_game_load_downgrades_a_corrupt_layout_to_a_shuffle() {
    let mut settings = MemorySettings::new();
    settings.put_str("difficulty", "EASY");
    settings.put_int("move_count", 17);
    settings.put_str("tiles", "1,1,1");

    let game: Game = Game::restore(&settings);
    // the session survives: fresh shuffle, persisted move count kept
    assert!(game.is_started());
    assert_eq!(game.move_count(), 17);
    assert_eq!(game.board().is_solvable().unwrap(), true);

    let mut numbers: Vec<usize> = game
        .board()
        .tile_layout()
        .unwrap()
        .split(',')
        .map(|t| t.parse().unwrap())
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (0..9).collect::<Vec<_>>());
}

#[test]
fn test_game_load_clamps_a_negative_move_count() {
    let mut settings = MemorySettings::new();
    settings.put_str("difficulty", "EASY");
    settings.put_int("move_count", -5);
    settings.put_str("tiles", "1,2,3,4,5,6,7,8,0");

    let game: Game = Game::restore(&settings);
    assert!(game.is_started());
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.board().tile_layout().unwrap(), "1,2,3,4,5,6,7,8,0");
}

#[test]
fn test_game_persists_both_image_id_forms() {
    let mut settings = MemorySettings::new();

    let mut game: Game = Game::with_seed(Difficulty::Easy, 5);
    game.set_selected_image(ImageId::Builtin(3));
    game.save(&mut settings).unwrap();
    assert_eq!(settings.get_int("image_id"), Some(3));

    let restored: Game = Game::restore(&settings);
    assert_eq!(restored.selected_image(), Some(&ImageId::Builtin(3)));

    game.set_selected_image(ImageId::Token("sunset".to_string()));
    game.save(&mut settings).unwrap();
    assert_eq!(settings.get_str("image_id").as_deref(), Some("sunset"));

    let restored: Game = Game::restore(&settings);
    assert_eq!(
        restored.selected_image(),
        Some(&ImageId::Token("sunset".to_string()))
    );

    game.reset_selected_image();
    game.save(&mut settings).unwrap();
    assert!(!settings.contains_key("image_id"));
}

/// Image source producing labeled slices instead of real pixels
struct StubImages {
    dimensions: (u32, u32),
    slice_count: Option<usize>,
}

impl StubImages {
    fn new() -> Self {
        StubImages {
            dimensions: (400, 300),
            slice_count: None,
        }
    }
}

impl ImageSource for StubImages {
    type Art = String;

    fn image_size(&mut self, _id: &ImageId) -> Result<(u32, u32), ImageError> {
        Ok(self.dimensions)
    }

    fn slice(
        &mut self,
        _id: &ImageId,
        size: usize,
        _tile_w: u32,
        _tile_h: u32,
    ) -> Result<Vec<String>, ImageError> {
        let count = self.slice_count.unwrap_or(size * size);
        Ok((0..count).map(|i| format!("slice-{i}")).collect())
    }
}

#[test]
fn test_game_image_pipeline_preconditions() {
    let mut source = StubImages::new();
    let mut game: Game<String> = Game::with_seed(Difficulty::Easy, 2);

    // nothing works before an image is selected
    assert!(matches!(
        game.update_image_size(&mut source),
        Err(GameError::NoImageSelected)
    ));
    assert!(matches!(
        game.load_image(&mut source),
        Err(GameError::NoImageSelected)
    ));
    assert!(matches!(
        game.image_aspect_ratio(),
        Err(GameError::NoImageLoaded)
    ));

    game.set_selected_image(ImageId::Builtin(1));
    // artwork needs the tile pixel size
    assert!(matches!(
        game.load_image(&mut source),
        Err(GameError::TileSizeNotSet)
    ));
}

#[test]
fn test_game_image_slices_land_on_home_cells() {
    let mut source = StubImages::new();
    let mut game: Game<String> = Game::with_seed(Difficulty::Easy, 2);
    game.set_selected_image(ImageId::Builtin(1));
    game.set_tile_size(64, 64);

    game.update_image_size(&mut source).unwrap();
    assert_eq!(game.image_aspect_ratio().unwrap(), 400.0 / 300.0);

    game.load_image(&mut source).unwrap();
    // tile k shows the slice cut from its home cell k-1
    game.board().for_each_tile(|tile| {
        let expected = if tile.number() == 0 {
            "slice-8".to_string()
        } else {
            format!("slice-{}", tile.number() - 1)
        };
        assert_eq!(tile.art(), Some(&expected));
    });
}

#[test]
fn test_game_image_errors_are_their_own_kind() {
    let mut game: Game<String> = Game::with_seed(Difficulty::Easy, 2);
    game.set_selected_image(ImageId::Builtin(1));
    game.set_tile_size(64, 64);

    // a source that produces the wrong number of slices
    let mut bad_count = StubImages::new();
    bad_count.slice_count = Some(5);
    assert!(matches!(
        game.load_image(&mut bad_count),
        Err(GameError::Image(_))
    ));

    // a source that reports a degenerate height
    let mut flat = StubImages::new();
    flat.dimensions = (100, 0);
    assert!(matches!(
        game.update_image_size(&mut flat),
        Err(GameError::Image(_))
    ));
}

#[test]
fn test_game_changing_the_image_drops_loaded_artwork() {
    let mut source = StubImages::new();
    let mut game: Game<String> = Game::with_seed(Difficulty::Easy, 2);
    game.set_selected_image(ImageId::Builtin(1));
    game.set_tile_size(64, 64);
    game.update_image_size(&mut source).unwrap();
    game.load_image(&mut source).unwrap();

    game.set_selected_image(ImageId::Builtin(2));
    game.board().for_each_tile(|tile| assert_eq!(tile.art(), None));
    assert!(matches!(
        game.image_aspect_ratio(),
        Err(GameError::NoImageLoaded)
    ));
}
