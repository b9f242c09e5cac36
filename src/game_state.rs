//! The owning aggregate for one running game, plus the read-only render
//! projection handed to the presentation collaborator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, ElementType};
use crate::board_logic::generate_board;
use crate::combat::{CombatState, MonsterStatus};
use crate::progression::Currency;

/// Turn machine phases. Between engine calls the game rests in
/// `PlayerTurn`, `Victory`, or `Defeat`; the other phases are walked
/// through synchronously inside a swap excursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    PlayerTurn,
    Resolving,
    MonsterTurn,
    Outcome,
    Victory,
    Defeat,
}

/// Full game state. Exclusively owns its board and combat state; both are
/// replaced wholesale on encounter transitions, never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub combat: CombatState,
    pub currency: Currency,
    pub phase: TurnPhase,
}

impl GameState {
    /// Fresh game: generated board, starting combat numbers, empty purse.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            board: generate_board(rng),
            combat: CombatState::new(),
            currency: Currency::default(),
            phase: TurnPhase::PlayerTurn,
        }
    }

    /// Read-only projection for rendering, with monster HP display-clamped.
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            grid: self.board.grid.clone(),
            player_hp: self.combat.player_hp,
            player_max_hp: self.combat.player_max_hp,
            player_level: self.combat.player_level,
            player_exp: self.combat.player_exp,
            exp_to_next_level: self.combat.exp_to_next_level,
            base_attack_power: self.combat.base_attack_power,
            current_level: self.combat.current_level,
            monster_hp: self.combat.monster_hp_display(),
            monster_max_hp: self.combat.monster_max_hp,
            monster_status: self.combat.monster_status,
            coins: self.currency.coins,
            diamonds: self.currency.diamonds,
            phase: self.phase,
        }
    }
}

/// Everything the rendering collaborator needs after a state transition.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub grid: Vec<Vec<Option<ElementType>>>,
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub player_level: u32,
    pub player_exp: u64,
    pub exp_to_next_level: u64,
    pub base_attack_power: u32,
    pub current_level: u32,
    pub monster_hp: i64,
    pub monster_max_hp: i64,
    pub monster_status: MonsterStatus,
    pub coins: u64,
    pub diamonds: u64,
    pub phase: TurnPhase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_game_starts_in_player_turn() {
        let mut rng = StdRng::seed_from_u64(42);
        let state = GameState::new(&mut rng);

        assert_eq!(state.phase, TurnPhase::PlayerTurn);
        assert!(state.board.is_settled());
        assert_eq!(state.currency, Currency::default());
        assert_eq!(state.combat.current_level, 1);
    }

    #[test]
    fn test_render_snapshot_clamps_monster_hp() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = GameState::new(&mut rng);
        state.combat.monster_hp = -120;

        let snapshot = state.render_snapshot();
        assert_eq!(snapshot.monster_hp, 0);
        // Internal state keeps the overkill value
        assert_eq!(state.combat.monster_hp, -120);
    }

    #[test]
    fn test_render_snapshot_mirrors_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::new(&mut rng);
        let snapshot = state.render_snapshot();
        assert_eq!(snapshot.grid, state.board.grid);
    }
}
