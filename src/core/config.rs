//! Fixed game configuration shared by both peers.

/// Side length of the square grid.
pub const BOARD_SIZE: u8 = 9;
/// Number of cells on the grid.
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

pub const NUM_SHIPS: usize = 3;
/// Segment count of each ship, in placement order.
pub const SHIP_SIZES: [u8; NUM_SHIPS] = [2, 4, 6];

/// Total number of ship segments; a board whose hits reach this is beaten.
pub const TOTAL_SHIP_CELLS: usize = 2 + 4 + 6;

/// Width of a name field on the wire, including the terminator the
/// field always keeps, so usable names are one byte shorter.
pub const NAME_MAXLEN: usize = 16;
/// Width of the free-form data field on the wire.
pub const DATA_MAXLEN: usize = 128;

/// TCP port used when none is given.
pub const DEFAULT_PORT: u16 = 42339;

/// Size of the ship at `index`, if such a ship is configured.
pub fn ship_size(index: usize) -> Option<u8> {
    SHIP_SIZES.get(index).copied()
}
