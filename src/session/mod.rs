//! Session layer: the handshake that pairs two players and the state
//! machine that plays one game between them.

mod error;
pub mod handshake;
mod node;
pub mod phase;

pub use error::SessionError;
pub use handshake::{Announcement, Peer};
pub use node::{Role, Session};
pub use phase::{Disposition, Phase};
