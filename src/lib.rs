//! Two-player networked battleship with committed boards.
//!
//! Each side commits to its ship layout with a keyed digest before the
//! first shot and reveals board and key after the last, so neither can
//! move ships mid-game without the other noticing.

pub mod core;
pub mod entropy;
mod logging;
pub mod player;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod ui;

pub use crate::core::*;
pub use entropy::{EntropyError, EntropySource, OsEntropy, SeededEntropy};
pub use logging::init_logging;
pub use player::{Action, AutoPlayer, CliPlayer, Player};
pub use protocol::{Message, MessageKind, ProtocolError, FRAME_SIZE, PROTOCOL_VERSION};
pub use session::{Role, Session, SessionError};
pub use transport::tcp::TcpTransport;
