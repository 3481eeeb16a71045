//! Board state: ship placement, incoming shots, and the occupancy vector
//! the commitment scheme hashes.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::bitboard::BitBoard;
use crate::core::commitment::SecretKey;
use crate::core::common::{BoardError, Cell, Coord, Name};
use crate::core::config::{ship_size, BOARD_SIZE, CELL_COUNT, NUM_SHIPS, TOTAL_SHIP_CELLS};
use crate::core::ship::{Orientation, Ship};

/// Bitboard layer covering the whole grid.
pub type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Random placement draws this many candidates before giving up.
const MAX_RANDOM_ATTEMPTS: usize = 10_000;

/// One player's grid.
///
/// A board is either the holder's own (every ship known) or a view of the
/// opponent's, which starts hidden and only learns hits and misses until
/// the final reveal is merged in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    owner: Name,
    ships: [Option<Ship>; NUM_SHIPS],
    ship_map: BB,
    hits: BB,
    misses: BB,
    hidden: bool,
    key: Option<SecretKey>,
}

impl Board {
    /// Create an empty own board (no ships placed).
    pub fn new(owner: Name) -> Self {
        Self {
            owner,
            ships: [None; NUM_SHIPS],
            ship_map: BB::new(),
            hits: BB::new(),
            misses: BB::new(),
            hidden: false,
            key: None,
        }
    }

    /// Create a view of an opponent's board with every cell unknown.
    pub fn opponent_view(owner: Name) -> Self {
        Self {
            hidden: true,
            ..Self::new(owner)
        }
    }

    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Placed ships by index; `None` for ships not yet placed.
    pub fn ships(&self) -> &[Option<Ship>; NUM_SHIPS] {
        &self.ships
    }

    /// Occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }

    pub fn key(&self) -> Option<&SecretKey> {
        self.key.as_ref()
    }

    pub fn set_key(&mut self, key: SecretKey) {
        self.key = Some(key);
    }

    /// Returns `true` once every configured ship is on the board.
    pub fn is_complete(&self) -> bool {
        self.ships.iter().all(Option::is_some)
    }

    /// Bounds and overlap check for a candidate ship, yielding its mask.
    fn fit(&self, ship: &Ship) -> Result<BB, BoardError> {
        let mask = ship.mask()?;
        if !(self.ship_map & mask).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        Ok(mask)
    }

    /// Place ship `ship_index` at `anchor` with `orientation`.
    ///
    /// Either every segment lands or the board is left untouched.
    pub fn place(
        &mut self,
        ship_index: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let size = ship_size(ship_index).ok_or(BoardError::InvalidIndex)?;
        if self.ships[ship_index].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let ship = Ship::new(size, orientation, anchor);
        let mask = self.fit(&ship)?;
        self.ship_map = self.ship_map | mask;
        self.ships[ship_index] = Some(ship);
        Ok(())
    }

    /// Boolean face of [`Board::place`]: `false` leaves the board unchanged.
    pub fn validate_and_place(
        &mut self,
        ship_index: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> bool {
        match self.place(ship_index, anchor, orientation) {
            Ok(()) => true,
            Err(e) => {
                debug!(
                    "rejected ship {} at {} {:?}: {}",
                    ship_index, anchor, orientation, e
                );
                false
            }
        }
    }

    /// Returns a random anchor and orientation at which `ship_index` fits.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_index: usize,
    ) -> Result<(Coord, Orientation), BoardError> {
        let size = ship_size(ship_index).ok_or(BoardError::InvalidIndex)?;
        if self.ships[ship_index].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let anchor = Coord::new(
                rng.random_range(0..BOARD_SIZE),
                rng.random_range(0..BOARD_SIZE),
            );
            let orientation = Orientation::ALL[rng.random_range(0..Orientation::ALL.len())];
            if self.fit(&Ship::new(size, orientation, anchor)).is_ok() {
                return Ok((anchor, orientation));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Randomly place every ship that is not placed yet.
    pub fn place_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for i in 0..NUM_SHIPS {
            if self.ships[i].is_none() {
                let (anchor, orientation) = self.random_placement(rng, i)?;
                self.place(i, anchor, orientation)?;
            }
        }
        Ok(())
    }

    fn check(coord: Coord) -> Result<(usize, usize), BoardError> {
        if coord.in_bounds() {
            Ok((coord.y as usize, coord.x as usize))
        } else {
            Err(BoardError::OutOfBounds(coord))
        }
    }

    /// Apply an incoming shot to this (own) board. Returns `true` on a hit.
    ///
    /// A repeated shot keeps the cell as it was and does not count again.
    pub fn register_hit(&mut self, coord: Coord) -> Result<bool, BoardError> {
        let (r, c) = Self::check(coord)?;
        if self.hits.get(r, c)? {
            return Ok(true);
        }
        if self.misses.get(r, c)? {
            return Ok(false);
        }
        if self.ship_map.get(r, c)? {
            self.hits.set(r, c)?;
            Ok(true)
        } else {
            self.misses.set(r, c)?;
            Ok(false)
        }
    }

    /// Record the reported outcome of our own shot on an opponent view.
    pub fn record_shot(&mut self, coord: Coord, hit: bool) -> Result<(), BoardError> {
        let (r, c) = Self::check(coord)?;
        if self.already_fired(coord) {
            return Err(BoardError::AlreadyFired(coord));
        }
        if hit {
            self.hits.set(r, c)?;
        } else {
            self.misses.set(r, c)?;
        }
        Ok(())
    }

    /// Whether a shot has landed on `coord`, hit or miss.
    pub fn already_fired(&self, coord: Coord) -> bool {
        Self::check(coord)
            .map(|(r, c)| {
                self.hits.get(r, c).unwrap_or(false) || self.misses.get(r, c).unwrap_or(false)
            })
            .unwrap_or(false)
    }

    /// Number of ship segments struck.
    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    /// Returns `true` when every ship segment has been struck.
    pub fn all_hit(&self) -> bool {
        self.hit_count() >= TOTAL_SHIP_CELLS
    }

    /// Number of cells occupied by ships.
    pub fn ship_cells(&self) -> usize {
        self.ship_map.count_ones()
    }

    /// Index of the placed ship covering `coord`.
    pub fn ship_index_at(&self, coord: Coord) -> Option<u8> {
        self.ships
            .iter()
            .position(|s| s.is_some_and(|s| s.contains(coord)))
            .map(|i| i as u8)
    }

    /// State of `coord` as the holder sees it.
    ///
    /// Occupied cells of a malformed reveal that belong to no ship record
    /// show as open water; the commitment check still counts them.
    pub fn cell(&self, coord: Coord) -> Result<Cell, BoardError> {
        let (r, c) = Self::check(coord)?;
        if self.hits.get(r, c)? {
            return Ok(Cell::Hit);
        }
        if self.misses.get(r, c)? {
            return Ok(Cell::Miss);
        }
        if self.ship_map.get(r, c)? {
            if let Some(index) = self.ship_index_at(coord) {
                return Ok(Cell::Ship(index));
            }
        }
        Ok(if self.hidden { Cell::Unknown } else { Cell::Empty })
    }

    /// Row-major ship presence over the whole grid.
    pub fn occupancy_vector(&self) -> [bool; CELL_COUNT] {
        self.ship_map.to_row_major()
    }

    /// Whether the occupancy layer is exactly the union of the non-overlapping
    /// placed ships. Always true for boards built through [`Board::place`].
    pub fn is_well_formed(&self) -> bool {
        let mut union = BB::new();
        for ship in self.ships.iter().flatten() {
            match ship.mask() {
                Ok(mask) if (union & mask).is_empty() => union = union | mask,
                _ => return false,
            }
        }
        union == self.ship_map
    }

    /// Fold an opponent's revealed board into this view.
    ///
    /// Cells we already fired at keep the result the opponent reported at
    /// the time; every other cell takes the revealed layout. The revealed key
    /// is adopted so the commitment can be rechecked against this view.
    pub fn merge_reveal(&mut self, revealed: &Board) {
        let fired = self.hits | self.misses;
        self.ship_map = self.hits | (revealed.ship_map & !fired);
        self.ships = revealed.ships;
        self.key = revealed.key.clone();
        self.hidden = false;
    }
}
