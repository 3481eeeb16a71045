use log::{info, warn};

use crate::core::board::Board;
use crate::core::commitment::{self, Digest};
use crate::core::common::{BoardError, Coord, Name};
use crate::entropy::{EntropyError, EntropySource};

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Final result from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Draw,
}

/// What a finished game looked like, handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: Outcome,
    /// Segments of our fleet the opponent struck.
    pub hits_taken: usize,
    /// Segments of the opponent's fleet we struck.
    pub hits_landed: usize,
    /// Whether the opponent's reveal matched the digest it committed to.
    pub commitment_verified: bool,
    pub opponent_name: Name,
}

/// Core game logic: the player's own board, the view of the opponent's,
/// and both commitments.
pub struct GameEngine {
    board: Board,
    opponent: Board,
    local_digest: Option<Digest>,
    opponent_digest: Option<Digest>,
}

impl GameEngine {
    /// Create a new engine with an empty own board and a hidden view of the
    /// opponent's.
    pub fn new(owner: Name, opponent: Name) -> Self {
        Self {
            board: Board::new(owner),
            opponent: Board::opponent_view(opponent),
            local_digest: None,
            opponent_digest: None,
        }
    }

    /// Mutable reference to the player's board for ship placement.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Immutable reference to the player's board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The view of the opponent's board.
    pub fn opponent(&self) -> &Board {
        &self.opponent
    }

    pub fn local_digest(&self) -> Option<&Digest> {
        self.local_digest.as_ref()
    }

    pub fn opponent_digest(&self) -> Option<&Digest> {
        self.opponent_digest.as_ref()
    }

    /// Throw away the current layout and start placement over.
    pub fn reset_board(&mut self) {
        self.board = Board::new(self.board.owner().clone());
    }

    /// Commit to the own board. Returns the digest to send in Ready.
    pub fn commit(&mut self, entropy: &mut dyn EntropySource) -> Result<Digest, EntropyError> {
        let digest = commitment::commit(&mut self.board, entropy)?;
        self.local_digest = Some(digest);
        Ok(digest)
    }

    /// Store the digest the opponent committed to.
    pub fn set_opponent_digest(&mut self, digest: Digest) {
        self.opponent_digest = Some(digest);
    }

    /// Handle an opponent shot on the player's board. Returns `true` on a hit.
    pub fn receive_attack(&mut self, coord: Coord) -> Result<bool, BoardError> {
        self.board.register_hit(coord)
    }

    /// Whether `coord` is a legal new target on the opponent's board.
    pub fn can_target(&self, coord: Coord) -> bool {
        coord.in_bounds() && !self.opponent.already_fired(coord)
    }

    /// Record the result of a shot made against the opponent.
    pub fn record_result(&mut self, coord: Coord, hit: bool) -> Result<(), BoardError> {
        self.opponent.record_shot(coord, hit)
    }

    /// Evaluate the current game status.
    pub fn status(&self) -> GameStatus {
        if self.board.all_hit() {
            GameStatus::Lost
        } else if self.opponent.all_hit() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// Outcome by hit counters: the side whose own board took fewer hits wins.
    pub fn outcome(&self) -> Outcome {
        let taken = self.board.hit_count();
        let landed = self.opponent.hit_count();
        match taken.cmp(&landed) {
            core::cmp::Ordering::Less => Outcome::Won,
            core::cmp::Ordering::Greater => Outcome::Lost,
            core::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Merge the opponent's revealed board and check it against the
    /// commitment received at the start.
    ///
    /// The check runs over the merged view, so a reveal that disagrees with
    /// the hit and miss answers given during play fails it as well. A failed
    /// check is reported, never fatal, and never changes the outcome.
    pub fn resolve(&mut self, revealed: &Board) -> GameReport {
        if !revealed.is_well_formed() {
            warn!(
                "revealed board of {} does not match its ship records",
                self.opponent.owner()
            );
        }
        self.opponent.merge_reveal(revealed);

        let commitment_verified = match (self.opponent.key(), self.opponent_digest.as_ref()) {
            (Some(key), Some(digest)) => commitment::verify(&self.opponent, key, digest),
            (None, _) => {
                warn!("{} revealed no key", self.opponent.owner());
                false
            }
            (_, None) => {
                warn!("no commitment was received from {}", self.opponent.owner());
                false
            }
        };
        if commitment_verified {
            info!("commitment of {} verified", self.opponent.owner());
        } else {
            warn!(
                "{} may have cheated: revealed board does not match the commitment",
                self.opponent.owner()
            );
        }

        GameReport {
            outcome: self.outcome(),
            hits_taken: self.board.hit_count(),
            hits_landed: self.opponent.hit_count(),
            commitment_verified,
            opponent_name: self.opponent.owner().clone(),
        }
    }
}
