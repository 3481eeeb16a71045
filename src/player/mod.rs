//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - AutoPlayer: random placement, random untried targets
//! - CliPlayer: Interactive command-line player

use rand::rngs::SmallRng;

use crate::core::{Board, BoardError, Coord, GameEngine, GameReport, Name};

/// What the local player does on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Attack(Coord),
    /// Send a chat line; the turn stays with us.
    Chat(String),
    Quit,
}

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Placing ships on the board and confirming the layout
/// - Choosing what to do on its turn
/// - Presenting what happens during the game
pub trait Player: Send {
    /// Place all ships onto the provided board.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Accept the placed board, or ask for it to be rebuilt.
    fn confirm_board(&mut self, _board: &Board) -> bool {
        true
    }

    /// Choose the next action. An attack on a cell already fired upon is
    /// refused through [`Player::handle_invalid_target`] and asked again.
    fn next_action(&mut self, rng: &mut SmallRng, engine: &GameEngine) -> Action;

    /// Inform the player of the result of its last shot.
    fn handle_attack_result(&mut self, _target: Coord, _hit: bool) {}

    /// Inform the player of an opponent shot against its board.
    fn handle_opponent_attack(&mut self, _target: Coord, _hit: bool) {}

    fn show_chat(&mut self, _from: &Name, _text: &str) {}

    fn handle_invalid_target(&mut self, _target: Coord) {}

    fn show_report(&mut self, _report: &GameReport) {}
}

pub mod auto;
pub use auto::AutoPlayer;

pub mod cli;
pub use cli::CliPlayer;
