//! Integration test: Save pipeline
//!
//! A settled mid-run game survives capture -> disk -> load -> restore, a
//! damaged file is rejected, and partial JSON blobs take the documented
//! defaults.

use std::fs;

use elemental_legend::board_logic::check_matches;
use elemental_legend::constants::{BOARD_COLS, BOARD_ROWS, PLAYER_STARTING_MAX_HP};
use elemental_legend::game_logic::submit_swap;
use elemental_legend::save_manager::SaveManager;
use elemental_legend::save_state::SaveData;
use elemental_legend::GameState;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn temp_manager(name: &str) -> SaveManager {
    let path = std::env::temp_dir().join(format!("elemental-legend-it-{}.dat", name));
    fs::remove_file(&path).ok();
    SaveManager::with_path(path)
}

#[test]
fn test_mid_run_game_survives_the_save_pipeline() {
    let mut rng = ChaCha8Rng::seed_from_u64(1001);
    let mut state = GameState::new(&mut rng);

    // Play some turns: try every adjacent swap until one matches
    let mut played = 0;
    'outer: for r in 0..BOARD_ROWS {
        for c in 0..BOARD_COLS {
            for (r2, c2) in [(r, c + 1), (r + 1, c)] {
                if r2 >= BOARD_ROWS || c2 >= BOARD_COLS {
                    continue;
                }
                if let Ok(report) = submit_swap(&mut state, (r, c), (r2, c2), &mut rng) {
                    if report.matched {
                        played += 1;
                        if played >= 2 {
                            break 'outer;
                        }
                    }
                }
            }
        }
    }
    // Whether or not a match was found for this seed, the board is settled
    assert!(state.board.is_settled());
    assert!(check_matches(&state.board).is_empty());

    let manager = temp_manager("midrun");
    let data = SaveData::capture(&state, 1_720_000_000);
    manager.save(&data).expect("save should succeed");

    let loaded = manager.load().expect("load should succeed");
    assert_eq!(loaded, data);
    assert_eq!(loaded.saved_at, 1_720_000_000);

    let restored = loaded.restore(&mut rng);
    assert_eq!(restored.board, state.board);
    assert_eq!(restored.combat.player_hp, state.combat.player_hp);
    assert_eq!(restored.combat.player_level, state.combat.player_level);
    assert_eq!(restored.combat.player_exp, state.combat.player_exp);
    assert_eq!(restored.combat.current_level, state.combat.current_level);
    assert_eq!(restored.combat.monster_hp, state.combat.monster_hp);
    assert_eq!(restored.currency, state.currency);

    fs::remove_file(manager.save_path()).ok();
}

#[test]
fn test_damaged_save_is_rejected_and_fresh_game_starts() {
    let mut rng = ChaCha8Rng::seed_from_u64(1002);
    let state = GameState::new(&mut rng);

    let manager = temp_manager("damaged");
    manager
        .save(&SaveData::capture(&state, 0))
        .expect("save should succeed");

    let mut bytes = fs::read(manager.save_path()).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(manager.save_path(), &bytes).unwrap();

    // The caller's fallback path: load fails, start fresh
    let state = match manager.load() {
        Ok(data) => data.restore(&mut rng),
        Err(_) => GameState::new(&mut rng),
    };
    assert_eq!(state.combat.player_hp, PLAYER_STARTING_MAX_HP);
    assert!(state.board.is_settled());

    fs::remove_file(manager.save_path()).ok();
}

#[test]
fn test_foreign_json_blob_loads_with_defaults() {
    // A blob in the external exchange format, missing most fields
    let json = r#"{
        "player_level": 9,
        "current_level": 12,
        "monster_max_hp": 6500,
        "monster_hp": 6500,
        "board": [[0, 1], [2, 3]]
    }"#;

    let data = SaveData::from_json(json).expect("partial blob must parse");
    assert_eq!(data.player_level, 9);
    assert_eq!(data.player_hp, PLAYER_STARTING_MAX_HP);

    let mut rng = ChaCha8Rng::seed_from_u64(1003);
    let restored = data.restore(&mut rng);

    // The 2x2 board fails validation and was regenerated at full size
    assert_eq!(restored.board.rows, BOARD_ROWS);
    assert_eq!(restored.board.cols, BOARD_COLS);
    assert!(restored.board.is_settled());
    assert!(check_matches(&restored.board).is_empty());

    // The numerics that were present survived
    assert_eq!(restored.combat.player_level, 9);
    assert_eq!(restored.combat.current_level, 12);
    assert_eq!(restored.combat.monster_max_hp, 6500);
}

#[test]
fn test_save_after_each_settled_turn_is_consistent() {
    let mut rng = ChaCha8Rng::seed_from_u64(1004);
    let mut state = GameState::new(&mut rng);

    // Capture, mutate through a real turn if one is available, capture again
    let before = SaveData::capture(&state, 1);

    let mut matched = false;
    'outer: for r in 0..BOARD_ROWS {
        for c in 0..BOARD_COLS - 1 {
            if let Ok(report) = submit_swap(&mut state, (r, c), (r, c + 1), &mut rng) {
                if report.matched {
                    matched = true;
                    break 'outer;
                }
            }
        }
    }

    let after = SaveData::capture(&state, 2);
    if !matched {
        assert_eq!(before.board, after.board, "reverted swaps must not leak");
    }

    // Either capture restores to a playable, settled game
    for data in [before, after] {
        let restored = data.restore(&mut rng);
        assert!(restored.board.is_settled());
        assert!(restored.combat.is_player_alive());
    }
}
