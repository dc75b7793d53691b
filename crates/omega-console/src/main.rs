//! Interactive console front end.
//!
//! A thin adapter over the engine: reads commands from stdin, prints
//! the ASCII board, and reports rejected moves. All rule logic lives
//! in the engine.

use omega_core::Square;
use omega_engine::Game;
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    let mut game = Game::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", game.to_ascii());
    println!("Commands: print | moves e1 | e1e4 | quit");

    loop {
        print!("{} > ", game.side_to_move());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line.eq_ignore_ascii_case("print") {
            println!("{}", game.to_ascii());
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("moves ") {
            match Square::from_algebraic(rest.trim()) {
                Ok(from) => {
                    let moves = game.legal_moves_from(from);
                    if moves.is_empty() {
                        println!("No moves");
                    } else {
                        let listed: Vec<String> =
                            moves.iter().map(ToString::to_string).collect();
                        println!("{}", listed.join(" "));
                    }
                }
                Err(e) => println!("Bad square: {}", e),
            }
            continue;
        }

        if game.try_move(line) {
            println!("{}", game.to_ascii());
        } else {
            println!("Illegal move");
        }
    }

    Ok(())
}
