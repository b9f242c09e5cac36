//! Combat resolution: match sets into damage and status changes, the
//! monster's counterattack, and end-of-turn status upkeep.

use crate::board::ElementType;
use crate::board_logic::MatchedTile;
use crate::combat::CombatState;
use crate::constants::*;

/// Outcome of resolving one match set, for UI consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectResult {
    /// Final damage dealt to the monster this resolution.
    pub damage: u32,
    /// Damage multiplier after any Thunder growth from this match set.
    pub damage_multiplier: f64,
    /// Matched tile counts indexed by [`ElementType::index`].
    pub element_counts: [u32; 4],
    pub froze_monster: bool,
    pub ignited_burn: bool,
    pub explosion_triggered: bool,
}

impl EffectResult {
    pub fn count(&self, element: ElementType) -> u32 {
        self.element_counts[element.index()]
    }
}

/// Result of the monster's counterattack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterAttack {
    pub damage: u32,
    pub was_frozen: bool,
}

/// One burn tick applied at end of turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnTick {
    pub damage: u32,
    pub turns_remaining: u32,
}

/// Resolve one match set against the combat state.
///
/// Thunder tiles permanently grow the damage multiplier, Poison tiles the
/// defense-down accumulator; both feed into this and every later
/// resolution of the encounter. Ice freezes the monster's next attack, Fire
/// ignites a burn with per-turn damage equal to half of this resolution's
/// damage. Damage is subtracted from `monster_hp` without clamping.
pub fn calculate_effect(matches: &[MatchedTile], state: &mut CombatState) -> EffectResult {
    let mut element_counts = [0u32; 4];
    for tile in matches {
        element_counts[tile.element.index()] += 1;
    }
    let thunder = element_counts[ElementType::Thunder.index()];
    let poison = element_counts[ElementType::Poison.index()];
    let fire = element_counts[ElementType::Fire.index()];
    let ice = element_counts[ElementType::Ice.index()];

    state.monster_status.damage_multiplier += thunder as f64 * THUNDER_MULTIPLIER_STEP;
    state.monster_status.defense_down_accumulator += poison * POISON_DEFENSE_DOWN_STEP;

    let match_count = matches.len() as u32;
    let mut base_damage =
        match_count * state.base_attack_power + state.monster_status.defense_down_accumulator;

    let explosion_triggered =
        state.player_level >= FIRE_EXPLOSION_MIN_LEVEL && fire >= FIRE_EXPLOSION_MIN_TILES;
    if explosion_triggered {
        base_damage += state.base_attack_power * FIRE_EXPLOSION_POWER_MULT;
    }

    let damage_multiplier = state.monster_status.damage_multiplier;
    let damage = (base_damage as f64 * damage_multiplier).floor() as u32;
    state.monster_hp -= damage as i64;

    let froze_monster = ice > 0;
    if froze_monster {
        state.monster_status.frozen = true;
    }

    let ignited_burn = fire > 0;
    if ignited_burn {
        // A new Fire match refreshes an active burn and re-bases its damage.
        state.monster_status.burning_turns_remaining = BURN_DURATION_TURNS;
        state.monster_status.burn_damage_per_turn = damage / 2;
    }

    EffectResult {
        damage,
        damage_multiplier,
        element_counts,
        froze_monster,
        ignited_burn,
        explosion_triggered,
    }
}

/// The monster's counterattack: level-scaled, halved (floor) while frozen.
/// Player HP saturates at 0 for storage.
pub fn monster_attack(state: &mut CombatState) -> MonsterAttack {
    let mut damage = MONSTER_BASE_ATTACK
        + state.current_level.saturating_sub(1) * MONSTER_ATTACK_PER_ENCOUNTER;
    let was_frozen = state.monster_status.frozen;
    if was_frozen {
        damage /= 2;
    }
    state.player_hp = state.player_hp.saturating_sub(damage);
    MonsterAttack { damage, was_frozen }
}

/// End-of-turn upkeep: frozen wears off, an active burn deals its per-turn
/// damage and counts down, zeroing the burn damage when exhausted.
pub fn end_of_turn(state: &mut CombatState) -> Option<BurnTick> {
    state.monster_status.frozen = false;

    if !state.monster_status.is_burning() {
        return None;
    }

    let damage = state.monster_status.burn_damage_per_turn;
    state.monster_hp -= damage as i64;
    state.monster_status.burning_turns_remaining -= 1;
    if state.monster_status.burning_turns_remaining == 0 {
        state.monster_status.burn_damage_per_turn = 0;
    }

    Some(BurnTick {
        damage,
        turns_remaining: state.monster_status.burning_turns_remaining,
    })
}
