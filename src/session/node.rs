use log::{debug, info, warn};
use rand::rngs::SmallRng;

use crate::core::{BoardError, Coord, GameEngine, GameReport, GameStatus, Name};
use crate::entropy::{seeded_rng, EntropySource};
use crate::player::{Action, Player};
use crate::protocol::{AttackKind, Message, ProtocolError, MAX_CHAT_BYTES};
use crate::session::handshake::Peer;
use crate::session::phase::{Disposition, Phase};
use crate::session::SessionError;
use crate::transport::Transport;

/// Which end of the handshake we were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Waits for the first shot.
    Host,
    /// Fires the first shot.
    Joiner,
}

impl Role {
    pub fn moves_first(self) -> bool {
        matches!(self, Role::Joiner)
    }
}

/// One game with one opponent, from placement to the final report.
pub struct Session {
    player: Box<dyn Player>,
    transport: Box<dyn Transport>,
    entropy: Box<dyn EntropySource>,
    role: Role,
    local_name: Name,
    opponent: Peer,
    engine: GameEngine,
    phase: Phase,
}

fn unexpected(msg: &Message, phase: Phase) -> SessionError {
    SessionError::Protocol(ProtocolError::Malformed(format!(
        "{} is not valid while {:?}",
        msg.kind(),
        phase
    )))
}

/// Cut `text` to the chat field at a char boundary.
fn chat_text(text: &str) -> String {
    let mut end = text.len().min(MAX_CHAT_BYTES);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

impl Session {
    pub fn new(
        player: Box<dyn Player>,
        transport: Box<dyn Transport>,
        entropy: Box<dyn EntropySource>,
        role: Role,
        local_name: Name,
        opponent: Peer,
    ) -> Self {
        let engine = GameEngine::new(local_name.clone(), opponent.name.clone());
        Self {
            player,
            transport,
            entropy,
            role,
            local_name,
            opponent,
            engine,
            phase: Phase::Setup,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn opponent(&self) -> &Peer {
        &self.opponent
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Play the game through and report how it went.
    ///
    /// Departures surface as [`SessionError::PeerQuit`] or
    /// [`SessionError::LocalQuit`]; [`SessionError::is_fatal`] tells them
    /// apart from real failures.
    pub async fn run(&mut self) -> Result<GameReport, SessionError> {
        let mut rng = seeded_rng(self.entropy.as_mut())?;
        self.setup(&mut rng)?;
        self.commit_exchange().await?;

        let mut my_turn = self.role.moves_first();
        while self.engine.status() == GameStatus::InProgress {
            if my_turn {
                self.attack(&mut rng).await?;
            } else {
                self.defend().await?;
            }
            my_turn = !my_turn;
        }

        self.finish().await
    }

    async fn send(&mut self, msg: &Message) -> Result<(), SessionError> {
        self.transport
            .send(msg)
            .await
            .map_err(SessionError::from_transport)?;
        Ok(())
    }

    /// Read until a message the current phase accepts arrives.
    async fn next_message(&mut self) -> Result<Message, SessionError> {
        loop {
            let msg = self
                .transport
                .recv()
                .await
                .map_err(SessionError::from_transport)?;
            match self.phase.dispose(msg.kind()) {
                Disposition::Accept => return Ok(msg),
                Disposition::Notice => {
                    if let Message::Chat { player_name, text } = &msg {
                        self.player.show_chat(player_name, text);
                    }
                }
                Disposition::Discard => {
                    warn!("discarding {} while {:?}", msg.kind(), self.phase);
                }
                Disposition::Depart => {
                    info!("{} quit the game", self.opponent.name);
                    self.phase = Phase::Finished;
                    return Err(SessionError::PeerQuit {
                        name: self.opponent.name.clone(),
                    });
                }
            }
        }
    }

    fn setup(&mut self, rng: &mut SmallRng) -> Result<(), SessionError> {
        self.phase = Phase::Setup;
        loop {
            self.engine.reset_board();
            self.player.place_ships(rng, self.engine.board_mut())?;
            if !self.engine.board().is_complete() {
                return Err(BoardError::UnableToPlaceShip.into());
            }
            if self.player.confirm_board(self.engine.board()) {
                return Ok(());
            }
            debug!("board rejected, placing again");
        }
    }

    async fn commit_exchange(&mut self) -> Result<(), SessionError> {
        let digest = self.engine.commit(self.entropy.as_mut())?;
        self.phase = Phase::CommitExchange;
        self.send(&Message::Ready { digest }).await?;
        match self.next_message().await? {
            Message::Ready { digest } => {
                debug!("{} committed to {}", self.opponent.name, digest);
                self.engine.set_opponent_digest(digest);
                Ok(())
            }
            other => Err(unexpected(&other, self.phase)),
        }
    }

    async fn attack(&mut self, rng: &mut SmallRng) -> Result<(), SessionError> {
        self.phase = Phase::AwaitingLocalMove;
        let target = loop {
            match self.player.next_action(rng, &self.engine) {
                Action::Attack(target) if self.engine.can_target(target) => break target,
                Action::Attack(target) => self.player.handle_invalid_target(target),
                Action::Chat(text) => {
                    let msg = Message::Chat {
                        player_name: self.local_name.clone(),
                        text: chat_text(&text),
                    };
                    self.send(&msg).await?;
                }
                Action::Quit => {
                    self.phase = Phase::Finished;
                    self.send(&Message::GameQuit).await?;
                    return Err(SessionError::LocalQuit);
                }
            }
        };

        self.send(&Message::GameAttack {
            attack: AttackKind::Normal,
            point: target,
        })
        .await?;
        self.phase = Phase::AwaitingResult { target };

        let (point, hit) = match self.next_message().await? {
            Message::GameHit { point } => (point, true),
            Message::GameFailed { point } => (point, false),
            other => return Err(unexpected(&other, self.phase)),
        };
        if point != target {
            return Err(ProtocolError::Malformed(format!(
                "answer for {} while waiting on {}",
                point, target
            ))
            .into());
        }
        self.engine.record_result(target, hit)?;
        self.player.handle_attack_result(target, hit);
        Ok(())
    }

    async fn defend(&mut self) -> Result<(), SessionError> {
        self.phase = Phase::WaitingForAttack;
        let point = match self.next_message().await? {
            Message::GameAttack { point, .. } => point,
            other => return Err(unexpected(&other, self.phase)),
        };
        if !point.in_bounds() {
            return Err(ProtocolError::Malformed(format!(
                "attack at {} is outside the grid",
                point
            ))
            .into());
        }
        let hit = self.engine.receive_attack(point)?;
        self.player.handle_opponent_attack(point, hit);
        let reply = if hit {
            Message::GameHit { point }
        } else {
            Message::GameFailed { point }
        };
        self.send(&reply).await
    }

    async fn finish(&mut self) -> Result<GameReport, SessionError> {
        self.phase = Phase::AwaitingReveal;
        self.send(&Message::GameFinished {
            board: self.engine.board().clone(),
        })
        .await?;
        let revealed = match self.next_message().await? {
            Message::GameFinished { board } => board,
            other => return Err(unexpected(&other, self.phase)),
        };
        self.phase = Phase::Finished;
        let report = self.engine.resolve(&revealed);
        info!(
            "game against {} over: {:?} ({} taken, {} landed)",
            report.opponent_name, report.outcome, report.hits_taken, report.hits_landed
        );
        self.player.show_report(&report);
        Ok(report)
    }
}
