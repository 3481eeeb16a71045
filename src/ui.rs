//! Text rendering of the two fields.

use std::fmt::Write;

use crate::core::{Board, Cell, Coord, BOARD_SIZE, TOTAL_SHIP_CELLS};

/// Symbol for one cell: `~` water, ship number, `X` hit, `x` miss, `?` unknown.
pub fn cell_symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '~',
        Cell::Ship(i) => char::from_digit(u32::from(i) + 1, 10).unwrap_or('#'),
        Cell::Hit => 'X',
        Cell::Miss => 'x',
        Cell::Unknown => '?',
    }
}

/// `row` -2 is the column numbers, -1 the rule, then the grid rows.
fn field_row(out: &mut String, board: &Board, row: i16) {
    let label = match row {
        -2 => "  ".to_string(),
        -1 => " +".to_string(),
        r => format!("{}|", (b'A' + r as u8) as char),
    };
    out.push_str(&label);
    for col in 0..BOARD_SIZE {
        match row {
            -2 => {
                let _ = write!(out, " {} ", col + 1);
            }
            -1 => out.push_str("---"),
            r => {
                let symbol = board
                    .cell(Coord::new(col, r as u8))
                    .map(cell_symbol)
                    .unwrap_or(' ');
                let _ = write!(out, " {} ", symbol);
            }
        }
    }
}

/// The own field, and the opponent view beside it when given, followed by
/// the hit tallies.
pub fn render_fields(own: &Board, opponent: Option<&Board>) -> String {
    let mut out = String::from("\n");
    for row in -2..BOARD_SIZE as i16 {
        field_row(&mut out, own, row);
        if let Some(opponent) = opponent {
            out.push_str("  |  ");
            field_row(&mut out, opponent, row);
        }
        out.push('\n');
    }
    out.push('\n');
    if let Some(opponent) = opponent {
        let _ = writeln!(
            out,
            "  ++ You: {}/{} hits",
            opponent.hit_count(),
            TOTAL_SHIP_CELLS
        );
        let _ = writeln!(
            out,
            "  ++ {}: {}/{} hits",
            opponent.owner(),
            own.hit_count(),
            TOTAL_SHIP_CELLS
        );
    }
    out
}
