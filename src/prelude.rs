//! Commonly used types and utilities for ease of import.

pub use crate::core::{Board, Coord, GameEngine, GameReport, GameStatus, Name, Orientation, Outcome};
pub use crate::entropy::{EntropySource, OsEntropy, SeededEntropy};
pub use crate::player::{Action, AutoPlayer, CliPlayer, Player};
pub use crate::session::{Peer, Role, Session, SessionError};
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
pub use crate::ui::render_fields;
