/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use pie_chess::{Color, Game, Move, Square, BOARD_SIZE};

/// Play a game of chess in the terminal, one move per line.
///
/// Enter a move as `e2e4` or `e2 e4`. Enter `z` or `undo` to take back the last move, and `q` to quit.
/// Set `RUST_LOG=debug` to see every move made and undone.
#[derive(Debug, Parser)]
struct Cli {
    /// The FEN string of the starting position.
    #[arg(required = false)]
    fen: Option<String>,

    /// Print the board without colors.
    #[arg(long, default_value = "false")]
    plain: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::default(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_board(&game, !args.plain);

        let moves = game.get_valid_moves();
        if moves.is_empty() {
            if game.is_checkmate() {
                println!("Checkmate! {} wins.", game.side_to_move().opponent());
            } else {
                println!("{} has no valid moves.", game.side_to_move());
            }
        } else if game.is_in_check() {
            println!("{} is in check.", game.side_to_move());
        }

        print!("{} to move> ", game.side_to_move());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "q" | "quit" => break,
            "z" | "undo" => {
                if game.undo_move().is_none() {
                    println!("Nothing to undo.");
                }
                continue;
            }
            _ => {}
        }

        let uci: String = input.split_whitespace().collect();
        let mv = match Move::from_uci(&game, &uci) {
            Ok(mv) => mv,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if moves.contains(&mv) {
            println!("{}", mv.to_notation());
            game.make_move(mv);
        } else {
            println!("{uci:?} is not a valid move.");
        }
    }

    Ok(())
}

fn print_board(game: &Game, colored: bool) {
    if !colored {
        println!("\n{game}\n");
        return;
    }

    let light = (240, 217, 181);
    let dark = (181, 136, 99);
    let last = game.last_move();

    println!();
    for row in 0..BOARD_SIZE {
        print!("{} ", Square::new(row, 0).rank_char().to_string().red());

        for col in 0..BOARD_SIZE {
            let square = Square::new(row, col);
            let (r, g, b) = if (row + col) % 2 == 0 { light } else { dark };

            let cell = match game.piece_at(square) {
                Some(piece) => {
                    let text = format!(" {} ", piece.char());
                    match piece.color() {
                        Color::White => text.bold().white(),
                        Color::Black => text.bold().black(),
                    }
                }
                None => "   ".normal(),
            };

            let highlighted = last.is_some_and(|mv| mv.from() == square || mv.to() == square);
            if highlighted {
                print!("{}", cell.on_truecolor(205, 210, 106));
            } else {
                print!("{}", cell.on_truecolor(r, g, b));
            }
        }
        println!();
    }
    println!("   {}\n", " a  b  c  d  e  f  g  h".red());
}
