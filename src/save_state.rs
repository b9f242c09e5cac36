//! The plain save blob exchanged with the persistence collaborator.
//!
//! Every field carries a default so a partial blob (an older save, or a
//! hand-edited JSON export) loads cleanly, and `restore` repairs anything
//! that fails validation instead of crashing: a wrong-size or out-of-range
//! board is replaced by a freshly generated one, and non-positive required
//! numerics fall back to fresh-game values.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, ElementType};
use crate::board_logic::generate_board;
use crate::combat::{CombatState, MonsterStatus};
use crate::constants::*;
use crate::game_state::{GameState, TurnPhase};
use crate::progression::Currency;

fn default_player_hp() -> u32 {
    PLAYER_STARTING_MAX_HP
}

fn default_player_level() -> u32 {
    1
}

fn default_exp_to_next_level() -> u64 {
    STARTING_EXP_TO_NEXT_LEVEL
}

fn default_base_attack_power() -> u32 {
    PLAYER_STARTING_ATTACK
}

fn default_current_level() -> u32 {
    1
}

fn default_monster_hp() -> i64 {
    MONSTER_STARTING_MAX_HP
}

/// Snapshot of a settled game, captured after each resolution step so an
/// interruption never loses more than the in-flight animation. The board is
/// stored as element indices; monster status is transient and not saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub board: Vec<Vec<u8>>,
    #[serde(default = "default_player_hp")]
    pub player_hp: u32,
    #[serde(default = "default_player_hp")]
    pub player_max_hp: u32,
    #[serde(default = "default_player_level")]
    pub player_level: u32,
    #[serde(default)]
    pub player_exp: u64,
    #[serde(default = "default_exp_to_next_level")]
    pub exp_to_next_level: u64,
    #[serde(default = "default_base_attack_power")]
    pub base_attack_power: u32,
    #[serde(default = "default_current_level")]
    pub current_level: u32,
    #[serde(default = "default_monster_hp")]
    pub monster_hp: i64,
    #[serde(default = "default_monster_hp")]
    pub monster_max_hp: i64,
    #[serde(default)]
    pub currency: Currency,
    /// Unix timestamp of the capture.
    #[serde(default)]
    pub saved_at: i64,
}

impl SaveData {
    /// Project the running game into a save blob.
    pub fn capture(state: &GameState, saved_at: i64) -> Self {
        let board = state
            .board
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| tile.map(|e| e.index() as u8).unwrap_or(u8::MAX))
                    .collect()
            })
            .collect();

        Self {
            board,
            player_hp: state.combat.player_hp,
            player_max_hp: state.combat.player_max_hp,
            player_level: state.combat.player_level,
            player_exp: state.combat.player_exp,
            exp_to_next_level: state.combat.exp_to_next_level,
            base_attack_power: state.combat.base_attack_power,
            current_level: state.combat.current_level,
            monster_hp: state.combat.monster_hp,
            monster_max_hp: state.combat.monster_max_hp,
            currency: state.currency,
            saved_at,
        }
    }

    /// [`capture`](Self::capture) stamped with the current wall clock.
    pub fn capture_now(state: &GameState) -> Self {
        Self::capture(state, Utc::now().timestamp())
    }

    /// Rebuild a playable game, repairing invalid fields.
    pub fn restore<R: Rng>(&self, rng: &mut R) -> GameState {
        let board = self
            .restore_board()
            .unwrap_or_else(|| generate_board(rng));

        let player_max_hp = positive_u32(self.player_max_hp, PLAYER_STARTING_MAX_HP);
        let monster_max_hp = positive_i64(self.monster_max_hp, MONSTER_STARTING_MAX_HP);

        let combat = CombatState {
            player_hp: positive_u32(self.player_hp, player_max_hp).min(player_max_hp),
            player_max_hp,
            base_attack_power: positive_u32(self.base_attack_power, PLAYER_STARTING_ATTACK),
            player_level: positive_u32(self.player_level, 1),
            player_exp: self.player_exp,
            exp_to_next_level: positive_u64(self.exp_to_next_level, STARTING_EXP_TO_NEXT_LEVEL),
            current_level: positive_u32(self.current_level, 1),
            monster_hp: positive_i64(self.monster_hp, monster_max_hp).min(monster_max_hp),
            monster_max_hp,
            monster_status: MonsterStatus::new(),
        };

        GameState {
            board,
            combat,
            currency: self.currency,
            phase: TurnPhase::PlayerTurn,
        }
    }

    /// Parse the grid, rejecting wrong dimensions or unknown elements.
    fn restore_board(&self) -> Option<Board> {
        if self.board.len() != BOARD_ROWS {
            return None;
        }

        let mut board = Board::empty();
        for (r, row) in self.board.iter().enumerate() {
            if row.len() != BOARD_COLS {
                return None;
            }
            for (c, &index) in row.iter().enumerate() {
                board.grid[r][c] = Some(ElementType::from_index(index as usize)?);
            }
        }
        Some(board)
    }

    /// Parse a JSON blob; missing fields take their documented defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON export of this blob.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn positive_u32(value: u32, fallback: u32) -> u32 {
    if value == 0 {
        fallback
    } else {
        value
    }
}

fn positive_u64(value: u64, fallback: u64) -> u64 {
    if value == 0 {
        fallback
    } else {
        value
    }
}

fn positive_i64(value: i64, fallback: i64) -> i64 {
    if value <= 0 {
        fallback
    } else {
        value
    }
}
