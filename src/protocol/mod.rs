//! Messages exchanged between the two peers.

mod codec;

pub use codec::{decode_frame, encode_frame, ProtocolError, FRAME_SIZE};

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Board, Coord, Digest, Name, DATA_MAXLEN};

/// Current protocol version, carried in the first byte of every frame.
pub const PROTOCOL_VERSION: u8 = 5;

/// Longest chat text accepted, in bytes.
pub const MAX_CHAT_BYTES: usize = DATA_MAXLEN - 1;

/// Kind of shot. Only plain single-cell shots exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    Normal,
}

/// Messages exchanged between the peers. Variant order is the wire tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Ask a host which game it offers.
    RequestGames,
    /// Host's answer to [`Message::RequestGames`].
    GameAnnounce { game_name: Name, player_name: Name },
    /// Joiner asks to play.
    GameJoin { player_name: Name },
    /// Host accepts the joiner.
    GameJoined { game_name: Name, player_name: Name },
    /// Sender is leaving the game.
    GameQuit,
    Chat { player_name: Name, text: String },
    /// Board placed; carries the commitment to its layout.
    Ready { digest: Digest },
    GameAttack { attack: AttackKind, point: Coord },
    /// The shot at `point` struck a ship.
    GameHit { point: Coord },
    /// The shot at `point` landed in open water.
    GameFailed { point: Coord },
    /// Final reveal of the sender's board, key included.
    GameFinished { board: Board },
}

/// Fieldless mirror of [`Message`] for logging and dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    RequestGames,
    GameAnnounce,
    GameJoin,
    GameJoined,
    GameQuit,
    Chat,
    Ready,
    GameAttack,
    GameHit,
    GameFailed,
    GameFinished,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::RequestGames => MessageKind::RequestGames,
            Message::GameAnnounce { .. } => MessageKind::GameAnnounce,
            Message::GameJoin { .. } => MessageKind::GameJoin,
            Message::GameJoined { .. } => MessageKind::GameJoined,
            Message::GameQuit => MessageKind::GameQuit,
            Message::Chat { .. } => MessageKind::Chat,
            Message::Ready { .. } => MessageKind::Ready,
            Message::GameAttack { .. } => MessageKind::GameAttack,
            Message::GameHit { .. } => MessageKind::GameHit,
            Message::GameFailed { .. } => MessageKind::GameFailed,
            Message::GameFinished { .. } => MessageKind::GameFinished,
        }
    }

    /// Check field bounds that the types alone do not enforce.
    ///
    /// Names are bounded by [`Name`]; coordinates are left to the session,
    /// which knows whether an off-grid point is an error in context.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        match self {
            Message::Chat { text, .. } if text.len() > MAX_CHAT_BYTES => {
                Err(ProtocolError::Malformed(format!(
                    "chat text is {} bytes, at most {} allowed",
                    text.len(),
                    MAX_CHAT_BYTES
                )))
            }
            _ => Ok(()),
        }
    }
}
