/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use log::info;

use pie_chess::{perft, splitperft, Game, Move};

/// Count the positions reachable from a starting position, one row per depth.
///
/// Set `RUST_LOG=debug` to see each setup move as it is applied.
#[derive(Debug, Parser)]
struct Cli {
    /// Deepest ply to count to.
    depth: usize,

    /// Starting position as a FEN string (placements and active color). Defaults to the standard start.
    #[arg(short, long)]
    fen: Option<String>,

    /// Moves to play before counting, like "e2e4 e7e5". Each one must be valid where it is played.
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Only count the final depth, printing the nodes beneath each root move.
    #[arg(short, long, default_value = "false")]
    split: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::default(),
    };

    for uci in args.moves.split_whitespace() {
        let mv = Move::from_uci(&game, uci)?;
        if !game.get_valid_moves().contains(&mv) {
            bail!("{uci:?} is not a valid move in {}", game.to_fen());
        }
        game.make_move(mv);
    }

    println!("{game}\n");
    println!("{}", status(&game));

    if args.split {
        let now = Instant::now();
        let nodes = splitperft(&game, args.depth);
        println!("\nperft({}) = {nodes} in {:.1?}", args.depth, now.elapsed());
        return Ok(());
    }

    println!("\n{:>5} {:>14} {:>10} {:>10}", "depth", "nodes", "time", "Mnps");
    let mut total = Duration::ZERO;
    for depth in 1..=args.depth {
        let now = Instant::now();
        let nodes = perft(&game, depth);
        let elapsed = now.elapsed();
        total += elapsed;

        let m_nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON) / 1_000_000.0;
        println!("{depth:>5} {nodes:>14} {:>10} {m_nps:>10.2}", format!("{elapsed:.1?}"));
    }
    info!("counted {} depth(s) in {total:.1?}", args.depth);

    Ok(())
}

/// One line describing whose turn it is and whether they are in trouble.
fn status(game: &Game) -> String {
    let side = game.side_to_move();
    let moves = game.get_valid_moves().len();

    if game.is_checkmate() {
        format!("{side} is checkmated")
    } else if moves == 0 {
        format!("{side} has no valid moves")
    } else if game.is_in_check() {
        format!("{side} to move, in check, {moves} valid move(s)")
    } else {
        format!("{side} to move, {moves} valid move(s)")
    }
}
