//! Elemental Legend - Turn-Based Match-3 Combat Engine
//!
//! The player swaps adjacent elemental tiles on a 7x7 grid; runs of three
//! or more are cleared for damage and status effects against the current
//! monster, cascades resolve until the board settles, then the monster
//! strikes back. Victories scale the next encounter and feed experience
//! and coins into progression.
//!
//! The crate is the deterministic game-state engine only: rendering,
//! animation timing, and input handling belong to the calling
//! collaborators, which replay the returned event traces at their own
//! pace. All randomness is injected, so every run is reproducible.

pub mod board;
pub mod board_logic;
pub mod combat;
pub mod combat_logic;
pub mod constants;
pub mod game_logic;
pub mod game_state;
pub mod progression;
pub mod save_manager;
pub mod save_state;

pub use game_logic::{reset_run, revive_player, submit_swap, TurnError, TurnEvent, TurnReport};
pub use game_state::{GameState, RenderSnapshot, TurnPhase};
