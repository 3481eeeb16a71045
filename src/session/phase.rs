//! Session phases and what each does with an incoming message.

use crate::core::Coord;
use crate::protocol::MessageKind;

/// Where a session stands. Phases that read from the peer consult
/// [`Phase::dispose`] for every message they receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Placing and confirming ships; nothing is read.
    Setup,
    /// Our Ready is sent, waiting for the opponent's.
    CommitExchange,
    /// Our turn; the player is choosing what to do.
    AwaitingLocalMove,
    /// Their turn; waiting for a shot.
    WaitingForAttack,
    /// Our shot at `target` is out, waiting for the answer.
    AwaitingResult { target: Coord },
    /// Our board is revealed, waiting for theirs.
    AwaitingReveal,
    Finished,
}

/// What to do with a message that arrived in a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The message the phase is waiting for.
    Accept,
    /// Show it to the player and keep waiting.
    Notice,
    /// Log it and keep waiting.
    Discard,
    /// The peer left.
    Depart,
}

impl Phase {
    /// Whether this phase blocks on a message from the peer.
    pub fn reads(&self) -> bool {
        matches!(
            self,
            Phase::CommitExchange
                | Phase::WaitingForAttack
                | Phase::AwaitingResult { .. }
                | Phase::AwaitingReveal
        )
    }

    /// Disposition of `kind` in this phase. GameQuit departs in every
    /// reading phase, the commit exchange included, rather than being
    /// discarded there like other unexpected messages.
    pub fn dispose(&self, kind: MessageKind) -> Disposition {
        if !self.reads() {
            return Disposition::Discard;
        }
        let accepted = match self {
            Phase::CommitExchange => kind == MessageKind::Ready,
            Phase::WaitingForAttack => kind == MessageKind::GameAttack,
            Phase::AwaitingResult { .. } => {
                matches!(kind, MessageKind::GameHit | MessageKind::GameFailed)
            }
            Phase::AwaitingReveal => kind == MessageKind::GameFinished,
            _ => false,
        };
        match kind {
            _ if accepted => Disposition::Accept,
            MessageKind::Chat => Disposition::Notice,
            MessageKind::GameQuit => Disposition::Depart,
            _ => Disposition::Discard,
        }
    }
}
