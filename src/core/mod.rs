//! Core battleship game model.
//!
//! Pure game logic with no IO: the bitboard layers, board and ship
//! placement, the commitment scheme and the engine holding both boards.

pub mod bitboard;
pub mod board;
pub mod commitment;
pub mod common;
pub mod config;
pub mod game;
pub mod ship;

// Re-export commonly used types
pub use bitboard::{BitBoard, BitBoardError};
pub use board::{Board, BB};
pub use commitment::{Digest, SecretKey};
pub use common::{BoardError, Cell, Coord, Name};
pub use config::*;
pub use game::{GameEngine, GameReport, GameStatus, Outcome};
pub use ship::{Orientation, Ship};
