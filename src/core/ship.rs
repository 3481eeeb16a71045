//! Ship records and the cells they cover.

use serde::{Deserialize, Serialize};

use crate::core::board::BB;
use crate::core::common::{BoardError, Coord};

/// Direction a ship extends from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Rising to the right: each segment one column right, one row up.
    DiagonalUp,
    /// Falling to the right: each segment one column right, one row down.
    DiagonalDown,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Horizontal,
        Orientation::Vertical,
        Orientation::DiagonalUp,
        Orientation::DiagonalDown,
    ];

    /// Step `(dx, dy)` between consecutive segments.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
            Orientation::DiagonalUp => (1, -1),
            Orientation::DiagonalDown => (1, 1),
        }
    }
}

/// A ship of fixed size with a movable anchor and orientation.
///
/// The record itself is not bound to a board; [`Ship::cells`] reports
/// whether its current position fits on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    size: u8,
    orientation: Orientation,
    anchor: Coord,
}

impl Ship {
    pub fn new(size: u8, orientation: Orientation, anchor: Coord) -> Self {
        Self {
            size,
            orientation,
            anchor,
        }
    }

    /// Number of segments.
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_anchor(&mut self, anchor: Coord) {
        self.anchor = anchor;
    }

    /// Cells covered from the anchor outward, or `ShipOutOfBounds` if any
    /// segment leaves the grid.
    pub fn cells(&self) -> Result<Vec<Coord>, BoardError> {
        if !self.anchor.in_bounds() {
            return Err(BoardError::ShipOutOfBounds);
        }
        (0..self.size)
            .map(|i| {
                self.anchor
                    .step(self.orientation.delta(), i)
                    .ok_or(BoardError::ShipOutOfBounds)
            })
            .collect()
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> Result<BB, BoardError> {
        let cells = self.cells()?;
        Ok(BB::from_cells(
            cells.iter().map(|c| (c.y as usize, c.x as usize)),
        )?)
    }

    /// Whether any segment covers `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells()
            .map(|cells| cells.contains(&coord))
            .unwrap_or(false)
    }
}
