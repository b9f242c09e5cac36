//! Combat state for one encounter: player numbers, monster numbers, and the
//! monster's elemental status effects.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Elemental modifiers on the monster. Multiplier and defense-down are
/// permanent for the encounter and never clamped; frozen lasts one attack,
/// burn ticks down at turn ends. All fields reset on encounter transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonsterStatus {
    pub frozen: bool,
    pub burning_turns_remaining: u32,
    pub burn_damage_per_turn: u32,
    pub damage_multiplier: f64,
    pub defense_down_accumulator: u32,
}

impl MonsterStatus {
    pub fn new() -> Self {
        Self {
            frozen: false,
            burning_turns_remaining: 0,
            burn_damage_per_turn: 0,
            damage_multiplier: 1.0,
            defense_down_accumulator: 0,
        }
    }

    pub fn is_burning(&self) -> bool {
        self.burning_turns_remaining > 0
    }
}

impl Default for MonsterStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// All combat and progression numbers for the running game.
///
/// `monster_hp` is signed: the resolver subtracts damage without clamping,
/// and projections clamp to 0 for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatState {
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub base_attack_power: u32,
    pub player_level: u32,
    pub player_exp: u64,
    pub exp_to_next_level: u64,
    /// Encounter index, starting at 1.
    pub current_level: u32,
    pub monster_hp: i64,
    pub monster_max_hp: i64,
    pub monster_status: MonsterStatus,
}

impl CombatState {
    pub fn new() -> Self {
        Self {
            player_hp: PLAYER_STARTING_MAX_HP,
            player_max_hp: PLAYER_STARTING_MAX_HP,
            base_attack_power: PLAYER_STARTING_ATTACK,
            player_level: 1,
            player_exp: 0,
            exp_to_next_level: STARTING_EXP_TO_NEXT_LEVEL,
            current_level: 1,
            monster_hp: MONSTER_STARTING_MAX_HP,
            monster_max_hp: MONSTER_STARTING_MAX_HP,
            monster_status: MonsterStatus::new(),
        }
    }

    pub fn is_player_alive(&self) -> bool {
        self.player_hp > 0
    }

    pub fn is_monster_alive(&self) -> bool {
        self.monster_hp > 0
    }

    /// Monster HP clamped for display; internal state may be negative.
    pub fn monster_hp_display(&self) -> i64 {
        self.monster_hp.max(0)
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new()
    }
}
