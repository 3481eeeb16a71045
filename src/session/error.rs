use crate::core::{BoardError, Name};
use crate::entropy::EntropyError;
use crate::protocol::ProtocolError;

/// Why a session stopped before producing a report.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("{name} left the game")]
    PeerQuit { name: Name },
    #[error("game abandoned")]
    LocalQuit,
    #[error("board error: {0}")]
    Board(#[from] BoardError),
    #[error(transparent)]
    Entropy(#[from] EntropyError),
    #[error("transport error: {0}")]
    Transport(anyhow::Error),
}

impl SessionError {
    /// Classify a transport failure, lifting decoding errors out of `anyhow`.
    pub fn from_transport(err: anyhow::Error) -> Self {
        match err.downcast::<ProtocolError>() {
            Ok(e) => SessionError::Protocol(e),
            Err(e) => SessionError::Transport(e),
        }
    }

    /// Whether the session ended on an error rather than a departure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SessionError::PeerQuit { .. } | SessionError::LocalQuit)
    }
}
