use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use crate::core::{
    Board, BoardError, Coord, GameEngine, GameReport, Name, Orientation, Outcome, SHIP_SIZES,
};
use crate::ui::render_fields;

use super::{Action, Player};

/// Interactive player on a line-oriented terminal.
///
/// End of input during placement finishes the board randomly; at the
/// attack prompt it quits the game.
pub struct CliPlayer {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CliPlayer {
    /// A player on stdin and stdout.
    pub fn new() -> Self {
        Self::with_io(io::BufReader::new(io::stdin()), io::stdout())
    }

    pub fn with_io<R, W>(input: R, output: W) -> Self
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    /// Prompt and read one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}> ", prompt);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Ask until one of `choices` is typed; an empty answer takes the first.
    fn read_choice(&mut self, choices: &[char], prompt: &str) -> Option<char> {
        let listed: Vec<String> = choices
            .iter()
            .enumerate()
            .map(|(i, c)| if i == 0 { format!("[{}]", c) } else { c.to_string() })
            .collect();
        let prompt = format!("{} ({})?", prompt, listed.join(", "));
        loop {
            let line = self.read_line(&prompt)?;
            let mut chars = line.chars().map(|c| c.to_ascii_lowercase());
            match (chars.next(), chars.next()) {
                (None, _) => return choices.first().copied(),
                (Some(c), None) if choices.contains(&c) => return Some(c),
                _ => self.say("*** Invalid choice"),
            }
        }
    }

    fn read_orientation(&mut self) -> Option<Orientation> {
        self.say("*** Set direction (h=horizontal, v=vertical, d=diagonal)");
        Some(match self.read_choice(&['h', 'v', 'd'], "Direction")? {
            'v' => Orientation::Vertical,
            'd' => match self.read_choice(&['u', 'd'], "Diagonal up or down")? {
                'u' => Orientation::DiagonalUp,
                _ => Orientation::DiagonalDown,
            },
            _ => Orientation::Horizontal,
        })
    }

    fn place_manually(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        for (i, size) in SHIP_SIZES.iter().enumerate() {
            loop {
                let field = render_fields(board, None);
                self.say(&field);
                let prompt = format!("Ship ({}, Size {}) Position (e.g.: A5, B5)", i + 1, size);
                let Some(line) = self.read_line(&prompt) else {
                    return board.place_randomly(rng);
                };
                let anchor = match line.parse::<Coord>() {
                    Ok(c) => c,
                    Err(_) => {
                        self.say("*** Please enter a coordinate!");
                        continue;
                    }
                };
                let Some(orientation) = self.read_orientation() else {
                    return board.place_randomly(rng);
                };
                if board.validate_and_place(i, anchor, orientation) {
                    self.say(&format!("*** Ship {} set.", i + 1));
                    break;
                }
                self.say("*** Cannot set ship there!");
            }
        }
        Ok(())
    }

    fn print_help(&mut self) {
        self.say("*** You can enter the coordinate of your attack.");
        self.say("*** (Examples: A5, D6, ..)");
        self.say("*** Type /<message> to send a chat message.");
        self.say("*** Type 'quit' to abort the game.");
    }
}

impl Player for CliPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        match self.read_choice(&['r', 'm'], "Place ships randomly or manually") {
            Some('m') => self.place_manually(rng, board),
            _ => {
                self.say("*** Calculating random ship positions...");
                board.place_randomly(rng)
            }
        }
    }

    fn confirm_board(&mut self, board: &Board) -> bool {
        let field = render_fields(board, None);
        self.say(&field);
        !matches!(self.read_choice(&['y', 'n'], "Use this board"), Some('n'))
    }

    fn next_action(&mut self, _rng: &mut SmallRng, engine: &GameEngine) -> Action {
        let field = render_fields(engine.board(), Some(engine.opponent()));
        self.say(&field);
        loop {
            let Some(line) = self.read_line("Attack (? for help)") else {
                return Action::Quit;
            };
            match line.as_str() {
                "" => continue,
                "?" => self.print_help(),
                quit if quit.eq_ignore_ascii_case("quit") => {
                    self.say("You left the game.");
                    return Action::Quit;
                }
                chat if chat.starts_with('/') => return Action::Chat(chat[1..].to_string()),
                other => match other.parse::<Coord>() {
                    Ok(target) => return Action::Attack(target),
                    Err(e) => self.say(&format!("!!! {}, type '?' for help", e)),
                },
            }
        }
    }

    fn handle_attack_result(&mut self, target: Coord, hit: bool) {
        let result = if hit { "HIT!" } else { "FAILED" };
        self.say(&format!("*** Attacking enemy at {}... {}", target, result));
    }

    fn handle_opponent_attack(&mut self, target: Coord, hit: bool) {
        if hit {
            self.say(&format!("*** Enemy HITS YOU at {}!", target));
        } else {
            self.say(&format!("*** Enemy failed at {}!", target));
        }
    }

    fn show_chat(&mut self, from: &Name, text: &str) {
        self.say(&format!("--- <{}> {}", from, text));
    }

    fn handle_invalid_target(&mut self, _target: Coord) {
        self.say("*** You've already shot this area.");
    }

    fn show_report(&mut self, report: &GameReport) {
        self.say("*** Resolving...");
        let verdict = match report.outcome {
            Outcome::Won => "*** You WON the game! ***".to_string(),
            Outcome::Lost => format!("*** {} WON the game! ***", report.opponent_name),
            Outcome::Draw => "*** The game is a draw. ***".to_string(),
        };
        self.say(&verdict);
        self.say(&format!(
            "  ++ You: {} hits, {}: {} hits",
            report.hits_landed, report.opponent_name, report.hits_taken
        ));
        if !report.commitment_verified {
            self.say(&format!(
                "!!! {}'s revealed board does not match its commitment. Cheater?",
                report.opponent_name
            ));
        }
    }
}
