mod common;

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use broadside::{Action, Board, CliPlayer, Coord, GameEngine, GameReport, Outcome, Player};
use common::{board_with, name, top_rows_layout};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Output sink the test can read back after the player is done with it.
#[derive(Clone, Default)]
struct Screen(Arc<Mutex<Vec<u8>>>);

impl Screen {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Screen {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn player(input: &str) -> (CliPlayer, Screen) {
    let screen = Screen::default();
    let player = CliPlayer::with_io(Cursor::new(input.as_bytes().to_vec()), screen.clone());
    (player, screen)
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0)
}

#[test]
fn test_manual_placement() {
    let (mut p, screen) = player("m\nA1\nh\nB1\nh\nC1\nh\n");
    let mut board = Board::new(name("alice"));
    p.place_ships(&mut rng(), &mut board).unwrap();

    assert!(board.is_complete());
    assert_eq!(board.ship_map(), board_with("alice", &top_rows_layout()).ship_map());
    assert!(screen.text().contains("*** Ship 3 set."));
}

#[test]
fn test_manual_placement_retries() {
    let (mut p, screen) = player("m\nZZ\nA1\nh\nA1\nv\nB1\nh\nC1\nh\n");
    let mut board = Board::new(name("alice"));
    p.place_ships(&mut rng(), &mut board).unwrap();

    assert_eq!(board.ship_map(), board_with("alice", &top_rows_layout()).ship_map());
    let text = screen.text();
    assert!(text.contains("*** Please enter a coordinate!"));
    assert!(text.contains("*** Cannot set ship there!"));
}

#[test]
fn test_end_of_input_finishes_randomly() {
    let (mut p, _screen) = player("m\nE5\nd\nu\n");
    let mut board = Board::new(name("alice"));
    p.place_ships(&mut rng(), &mut board).unwrap();

    assert!(board.is_complete());
    assert!(board.is_well_formed());
    let first = board.ships()[0].unwrap();
    assert!(first.contains(Coord::new(4, 4)));
    assert!(first.contains(Coord::new(5, 3)));
}

#[test]
fn test_board_confirmation() {
    let board = board_with("alice", &top_rows_layout());
    let (mut p, _) = player("n\n");
    assert!(!p.confirm_board(&board));
    let (mut p, _) = player("\n");
    assert!(p.confirm_board(&board));
}

#[test]
fn test_attack_prompt() {
    let (mut p, screen) = player("\n?\nZ9\n/hello there\nD3\nquit\n");
    let engine = GameEngine::new(name("alice"), name("bob"));
    let mut rng = rng();

    assert_eq!(
        p.next_action(&mut rng, &engine),
        Action::Chat("hello there".to_string())
    );
    assert_eq!(p.next_action(&mut rng, &engine), Action::Attack(Coord::new(2, 3)));
    assert_eq!(p.next_action(&mut rng, &engine), Action::Quit);
    // end of input
    assert_eq!(p.next_action(&mut rng, &engine), Action::Quit);

    let text = screen.text();
    assert!(text.contains("Type 'quit' to abort the game."));
    assert!(text.contains("!!! "));
}

#[test]
fn test_quit_ignores_case() {
    let (mut p, screen) = player("QUIT\nQuit\n");
    let engine = GameEngine::new(name("alice"), name("bob"));
    let mut rng = rng();
    assert_eq!(p.next_action(&mut rng, &engine), Action::Quit);
    assert_eq!(p.next_action(&mut rng, &engine), Action::Quit);
    assert_eq!(screen.text().matches("You left the game.").count(), 2);
}

#[test]
fn test_report_flags_cheater() {
    let (mut p, screen) = player("");
    p.show_report(&GameReport {
        outcome: Outcome::Lost,
        hits_taken: 12,
        hits_landed: 7,
        commitment_verified: false,
        opponent_name: name("bob"),
    });
    let text = screen.text();
    assert!(text.contains("*** bob WON the game! ***"));
    assert!(text.contains("Cheater?"));
}
