#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use broadside::{Action, Board, BoardError, Coord, GameEngine, GameReport, Name, Orientation, Player};
use rand::rngs::SmallRng;

/// Ships along the top three rows: sizes 2, 4 and 6 anchored at column 0.
pub fn top_rows_layout() -> [(Coord, Orientation); 3] {
    [
        (Coord::new(0, 0), Orientation::Horizontal),
        (Coord::new(0, 1), Orientation::Horizontal),
        (Coord::new(0, 2), Orientation::Horizontal),
    ]
}

/// Cells covered by [`top_rows_layout`].
pub fn top_rows_cells() -> Vec<Coord> {
    let mut cells = Vec::new();
    for (row, size) in [(0u8, 2u8), (1, 4), (2, 6)] {
        for x in 0..size {
            cells.push(Coord::new(x, row));
        }
    }
    cells
}

/// Ships along the bottom rows, disjoint from [`top_rows_layout`].
pub fn bottom_rows_layout() -> [(Coord, Orientation); 3] {
    [
        (Coord::new(0, 6), Orientation::Horizontal),
        (Coord::new(0, 7), Orientation::Horizontal),
        (Coord::new(0, 8), Orientation::Horizontal),
    ]
}

/// Cells covered by [`bottom_rows_layout`].
pub fn bottom_rows_cells() -> Vec<Coord> {
    top_rows_cells()
        .into_iter()
        .map(|c| Coord::new(c.x, c.y + 6))
        .collect()
}

pub fn name(s: &str) -> Name {
    Name::truncated(s)
}

pub fn board_with(owner: &str, layout: &[(Coord, Orientation); 3]) -> Board {
    let mut board = Board::new(name(owner));
    for (i, (anchor, orientation)) in layout.iter().enumerate() {
        board.place(i, *anchor, *orientation).unwrap();
    }
    board
}

/// What a [`ScriptedPlayer`] saw during the game.
#[derive(Debug, Default)]
pub struct Transcript {
    pub results: Vec<(Coord, bool)>,
    pub incoming: Vec<(Coord, bool)>,
    pub chats: Vec<(String, String)>,
    pub invalid: Vec<Coord>,
    pub report: Option<GameReport>,
}

/// Player with a fixed layout and a fixed list of actions.
pub struct ScriptedPlayer {
    layout: [(Coord, Orientation); 3],
    actions: VecDeque<Action>,
    pub transcript: Arc<Mutex<Transcript>>,
}

impl ScriptedPlayer {
    pub fn new(layout: [(Coord, Orientation); 3], actions: Vec<Action>) -> Self {
        Self {
            layout,
            actions: actions.into(),
            transcript: Arc::new(Mutex::new(Transcript::default())),
        }
    }

    /// Attack each coordinate in turn.
    pub fn attacking(layout: [(Coord, Orientation); 3], targets: Vec<Coord>) -> Self {
        Self::new(layout, targets.into_iter().map(Action::Attack).collect())
    }
}

impl Player for ScriptedPlayer {
    fn place_ships(&mut self, _rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        for (i, (anchor, orientation)) in self.layout.iter().enumerate() {
            board.place(i, *anchor, *orientation)?;
        }
        Ok(())
    }

    fn next_action(&mut self, _rng: &mut SmallRng, _engine: &GameEngine) -> Action {
        self.actions.pop_front().unwrap_or(Action::Quit)
    }

    fn handle_attack_result(&mut self, target: Coord, hit: bool) {
        self.transcript.lock().unwrap().results.push((target, hit));
    }

    fn handle_opponent_attack(&mut self, target: Coord, hit: bool) {
        self.transcript.lock().unwrap().incoming.push((target, hit));
    }

    fn show_chat(&mut self, from: &Name, text: &str) {
        self.transcript
            .lock()
            .unwrap()
            .chats
            .push((from.to_string(), text.to_string()));
    }

    fn handle_invalid_target(&mut self, target: Coord) {
        self.transcript.lock().unwrap().invalid.push(target);
    }

    fn show_report(&mut self, report: &GameReport) {
        self.transcript.lock().unwrap().report = Some(report.clone());
    }
}

/// Open-water cells, row-major, avoiding `taken`.
pub fn water_cells(taken: &[Coord], count: usize) -> Vec<Coord> {
    Coord::all().filter(|c| !taken.contains(c)).take(count).collect()
}
