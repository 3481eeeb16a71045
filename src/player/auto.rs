use log::debug;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;

use crate::core::{Board, BoardError, Coord, GameEngine, GameReport};

use super::{Action, Player};

/// Computer player: random placement, random shots at untried cells.
#[derive(Debug, Default)]
pub struct AutoPlayer;

impl AutoPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AutoPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        board.place_randomly(rng)
    }

    fn next_action(&mut self, rng: &mut SmallRng, engine: &GameEngine) -> Action {
        match Coord::all().filter(|c| engine.can_target(*c)).choose(rng) {
            Some(target) => Action::Attack(target),
            None => Action::Quit,
        }
    }

    fn handle_attack_result(&mut self, target: Coord, hit: bool) {
        debug!("shot at {}: {}", target, if hit { "hit" } else { "miss" });
    }

    fn show_report(&mut self, report: &GameReport) {
        debug!("game over: {:?}", report.outcome);
    }
}
