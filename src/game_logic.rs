//! The turn state machine: one swap request walks
//! `PlayerTurn -> Resolving -> (cascade loop) -> MonsterTurn -> Outcome`
//! synchronously to the next resting phase and returns the full event
//! trace for the presentation layer to replay at its own pace.

use rand::Rng;
use thiserror::Error;

use crate::board::Position;
use crate::board_logic::{
    check_matches, clear_tiles, drop_and_fill, generate_board, swap_tiles, try_swap, MatchedTile,
    SwapError, TileMove,
};
use crate::combat::MonsterStatus;
use crate::combat_logic::{calculate_effect, end_of_turn, monster_attack, EffectResult};
use crate::constants::{MONSTER_HP_PER_ENCOUNTER, REVIVE_HP_RATIO};
use crate::game_state::{GameState, TurnPhase};
use crate::progression::{next_level, LevelRewards};

/// Everything that happened during one turn excursion, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// Swap produced no match and was logically reverted.
    SwapReverted { p1: Position, p2: Position },
    /// One cascade step: effect applied, tiles cleared, board refilled.
    MatchesResolved {
        step: u32,
        effect: EffectResult,
        cleared: Vec<MatchedTile>,
        moves: Vec<TileMove>,
    },
    MonsterAttacked { damage: u32, was_frozen: bool },
    BurnTicked { damage: u32, turns_remaining: u32 },
    /// Encounter won; the next encounter is already set up.
    MonsterDefeated {
        rewards: LevelRewards,
        next_encounter: u32,
        monster_max_hp: i64,
    },
    PlayerDefeated,
}

/// Outcome of a swap request.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Whether the swap produced at least one match.
    pub matched: bool,
    /// Resting phase after the excursion.
    pub phase: TurnPhase,
    pub events: Vec<TurnEvent>,
}

/// Rejected turn request. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error(transparent)]
    InvalidSwap(#[from] SwapError),
    #[error("encounter is over; revive or reset before swapping")]
    EncounterOver,
}

/// Handle a swap request from the input collaborator.
///
/// A no-match swap is logically reverted and the turn is not consumed.
/// A matching swap resolves all cascades, lets the monster act, and
/// settles into `PlayerTurn`, `Victory`, or `Defeat`.
pub fn submit_swap<R: Rng>(
    state: &mut GameState,
    p1: Position,
    p2: Position,
    rng: &mut R,
) -> Result<TurnReport, TurnError> {
    if state.phase != TurnPhase::PlayerTurn {
        return Err(TurnError::EncounterOver);
    }

    let mut events = Vec::new();
    let matches = try_swap(&mut state.board, p1, p2)?;

    if matches.is_empty() {
        swap_tiles(&mut state.board, p1, p2);
        events.push(TurnEvent::SwapReverted { p1, p2 });
        return Ok(TurnReport {
            matched: false,
            phase: state.phase,
            events,
        });
    }

    state.phase = TurnPhase::Resolving;
    resolve_cascades(state, matches, rng, &mut events);

    state.phase = TurnPhase::Outcome;
    if !state.combat.is_monster_alive() {
        finish_victory(state, rng, &mut events);
    } else {
        run_monster_turn(state, rng, &mut events);
    }

    Ok(TurnReport {
        matched: true,
        phase: state.phase,
        events,
    })
}

/// Resolve the current match set and every cascade that follows, until the
/// board settles with no match. Terminates in practice within a handful of
/// steps; each iteration leaves a settled board that must re-match to
/// continue.
fn resolve_cascades<R: Rng>(
    state: &mut GameState,
    first_matches: Vec<MatchedTile>,
    rng: &mut R,
    events: &mut Vec<TurnEvent>,
) {
    let mut matches = first_matches;
    let mut step = 0;

    while !matches.is_empty() {
        let effect = calculate_effect(&matches, &mut state.combat);
        clear_tiles(&mut state.board, &matches);
        let moves = drop_and_fill(&mut state.board, rng);
        events.push(TurnEvent::MatchesResolved {
            step,
            effect,
            cleared: matches,
            moves,
        });
        step += 1;
        matches = check_matches(&state.board);
    }
}

fn run_monster_turn<R: Rng>(state: &mut GameState, rng: &mut R, events: &mut Vec<TurnEvent>) {
    state.phase = TurnPhase::MonsterTurn;

    let attack = monster_attack(&mut state.combat);
    events.push(TurnEvent::MonsterAttacked {
        damage: attack.damage,
        was_frozen: attack.was_frozen,
    });

    if let Some(tick) = end_of_turn(&mut state.combat) {
        events.push(TurnEvent::BurnTicked {
            damage: tick.damage,
            turns_remaining: tick.turns_remaining,
        });
    }

    state.phase = TurnPhase::Outcome;
    if !state.combat.is_player_alive() {
        state.phase = TurnPhase::Defeat;
        events.push(TurnEvent::PlayerDefeated);
    } else if !state.combat.is_monster_alive() {
        // Burn finished the monster off after its attack
        finish_victory(state, rng, events);
    } else {
        state.phase = TurnPhase::PlayerTurn;
    }
}

/// Victory transition: grant rewards, scale and refill the monster, reset
/// its status, restore the player to full, and generate the next board.
/// The new encounter rests in `PlayerTurn`.
fn finish_victory<R: Rng>(state: &mut GameState, rng: &mut R, events: &mut Vec<TurnEvent>) {
    state.phase = TurnPhase::Victory;

    let rewards = next_level(&mut state.combat, &mut state.currency);
    state.combat.monster_max_hp += MONSTER_HP_PER_ENCOUNTER;
    state.combat.monster_hp = state.combat.monster_max_hp;
    state.combat.monster_status = MonsterStatus::new();
    state.combat.current_level += 1;
    state.combat.player_hp = state.combat.player_max_hp;
    state.board = generate_board(rng);

    events.push(TurnEvent::MonsterDefeated {
        rewards,
        next_encounter: state.combat.current_level,
        monster_max_hp: state.combat.monster_max_hp,
    });

    state.phase = TurnPhase::PlayerTurn;
}

/// Defeat choice (a): half-HP revive into the same encounter. The UI
/// collaborator calls this or [`reset_run`] after a `Defeat`.
pub fn revive_player(state: &mut GameState) {
    state.combat.player_hp = (state.combat.player_max_hp as f64 * REVIVE_HP_RATIO) as u32;
    state.phase = TurnPhase::PlayerTurn;
}

/// Defeat choice (b): throw the run away and start fresh.
pub fn reset_run<R: Rng>(state: &mut GameState, rng: &mut R) {
    *state = GameState::new(rng);
}
