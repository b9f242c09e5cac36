//! Experience accumulation, level-ups, and encounter rewards.

use serde::{Deserialize, Serialize};

use crate::combat::CombatState;
use crate::constants::*;

/// Coin/diamond ledger. Coins are earned on victory; diamonds are carried
/// through saves for the out-of-scope shop collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub coins: u64,
    pub diamonds: u64,
}

/// Summary of an encounter's rewards, for the caller to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRewards {
    pub exp_gained: u64,
    pub coin_gained: u64,
    pub leveled_up: bool,
}

/// Apply experience and process any level-ups.
///
/// A single grant can cross several thresholds; each level adds fixed
/// max-HP and attack increments and grows the next threshold by 1.2
/// (floored). Returns whether at least one level-up occurred. Current HP is
/// untouched here; the victory transition restores it.
pub fn gain_exp(state: &mut CombatState, amount: u64) -> bool {
    state.player_exp += amount;

    let mut leveled_up = false;
    while state.player_exp >= state.exp_to_next_level {
        state.player_exp -= state.exp_to_next_level;
        state.player_level += 1;
        state.player_max_hp += MAX_HP_PER_LEVEL;
        state.base_attack_power += ATTACK_PER_LEVEL;
        state.exp_to_next_level = (state.exp_to_next_level as f64 * EXP_CURVE_GROWTH) as u64;
        leveled_up = true;
    }

    leveled_up
}

/// Rewards for clearing the given encounter: (exp, coins).
pub fn encounter_rewards(current_level: u32) -> (u64, u64) {
    let exp = ENCOUNTER_EXP_BASE + current_level as u64 * ENCOUNTER_EXP_PER_LEVEL;
    let coins = ENCOUNTER_COIN_BASE + current_level as u64 * ENCOUNTER_COIN_PER_LEVEL;
    (exp, coins)
}

/// Grant the just-cleared encounter's rewards. Called before the encounter
/// index advances, so rewards scale with the level that was beaten.
pub fn next_level(state: &mut CombatState, currency: &mut Currency) -> LevelRewards {
    let (exp_gained, coin_gained) = encounter_rewards(state.current_level);
    currency.coins += coin_gained;
    let leveled_up = gain_exp(state, exp_gained);

    LevelRewards {
        exp_gained,
        coin_gained,
        leveled_up,
    }
}
