//! Common types for the board model: coordinates, cell states, bounded
//! names and board errors.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::bitboard::BitBoardError;
use crate::core::config::{BOARD_SIZE, NAME_MAXLEN};

/// A grid position, `x` is the column and `y` the row.
///
/// Values read off the wire are not validated on decode; callers check
/// [`Coord::in_bounds`] before touching a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Build a coordinate from signed components, `None` if off the grid.
    pub fn checked(x: i16, y: i16) -> Option<Self> {
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Row-major cell index.
    pub fn index(&self) -> usize {
        self.y as usize * BOARD_SIZE as usize + self.x as usize
    }

    /// The coordinate `dist` steps away along `(dx, dy)`, if still on the grid.
    pub fn step(self, (dx, dy): (i8, i8), dist: u8) -> Option<Self> {
        let dist = dist as i16;
        Self::checked(
            self.x as i16 + dx as i16 * dist,
            self.y as i16 + dy as i16 * dist,
        )
    }

    /// Every cell of the grid, row-major.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
    }
}

/// Rows are lettered from `A`, columns numbered from `1`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            write!(f, "{}{}", (b'A' + self.y) as char, self.x + 1)
        } else {
            write!(f, "({},{})", self.x, self.y)
        }
    }
}

/// Parses `A5` as well as `5A` (row letter and column digit in any order).
impl FromStr for Coord {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        let bad = || BoardError::BadCoordinate(s.trim().to_string());
        let (letter, digit) = match bytes {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_digit() => (*a, *b),
            [a, b] if a.is_ascii_digit() && b.is_ascii_alphabetic() => (*b, *a),
            _ => return Err(bad()),
        };
        let y = letter.to_ascii_uppercase().wrapping_sub(b'A');
        let x = digit.wrapping_sub(b'1');
        let coord = Coord::new(x, y);
        if coord.in_bounds() {
            Ok(coord)
        } else {
            Err(bad())
        }
    }
}

/// State of a single grid cell as seen by the board's holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Open water.
    Empty,
    /// Unhit segment of the ship with this index.
    Ship(u8),
    /// A ship segment that has been struck.
    Hit,
    /// A shot into open water.
    Miss,
    /// Opponent cell nobody has fired at and that has not been revealed.
    Unknown,
}

/// A player or game name, at most `NAME_MAXLEN - 1` bytes of UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Longest accepted name, in bytes.
    pub const MAX_BYTES: usize = NAME_MAXLEN - 1;

    /// Build a name, cutting it at the last char boundary that fits.
    pub fn truncated(name: &str) -> Self {
        let mut end = name.len().min(Self::MAX_BYTES);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        Self(name[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() > Self::MAX_BYTES {
            Err(BoardError::NameTooLong(value.len()))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    #[error("BitBoard error: {0}")]
    BitBoardError(#[from] BitBoardError),
    /// Specified ship index is out of range.
    #[error("Index is out of range")]
    InvalidIndex,
    /// Attempted to place a ship that is already placed.
    #[error("Ship is already placed on the board")]
    ShipAlreadyPlaced,
    /// Ship placement overlaps another ship.
    #[error("Ship placement overlaps with another ship")]
    ShipOverlaps,
    /// Ship would leave the grid.
    #[error("Ship placement is out of bounds")]
    ShipOutOfBounds,
    /// Random placement gave up.
    #[error("Unable to place ship")]
    UnableToPlaceShip,
    /// Coordinate lies outside the grid.
    #[error("Coordinate {0:?} is outside the grid")]
    OutOfBounds(Coord),
    /// A shot was already fired at this position.
    #[error("Already fired at {0}")]
    AlreadyFired(Coord),
    /// Text that does not name a cell.
    #[error("Invalid coordinate '{0}' (examples: A5, D3)")]
    BadCoordinate(String),
    #[error("Name is {0} bytes long, at most {max} allowed", max = Name::MAX_BYTES)]
    NameTooLong(usize),
}
