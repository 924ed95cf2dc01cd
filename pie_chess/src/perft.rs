/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::Game;

/// Counts the leaf nodes reachable from `game` in exactly `depth` plies.
///
/// Every move is made and then undone on a private copy of `game`, so this also exercises
/// [`Game::make_move`] and [`Game::undo_move`].
///
/// # Example
/// ```
/// # use pie_chess::*;
/// assert_eq!(perft(&Game::default(), 2), 400);
/// ```
pub fn perft(game: &Game, depth: usize) -> u64 {
    let mut game = game.clone();
    recursive_perft(&mut game, depth)
}

/// Like [`perft`], but prints the node count beneath each root move, in UCI notation.
///
/// Returns the total.
pub fn splitperft(game: &Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut game = game.clone();
    let mut total = 0;

    for mv in game.get_valid_moves() {
        game.make_move(mv);
        let nodes = recursive_perft(&mut game, depth - 1);
        game.undo_move();

        println!("{mv}: {nodes}");
        total += nodes;
    }

    total
}

fn recursive_perft(game: &mut Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.get_valid_moves();

    // Bulk counting
    if depth == 1 {
        return moves.len() as u64;
    }

    // Recursively accumulate the nodes from the remaining depths
    moves.into_iter().fold(0, |nodes, mv| {
        game.make_move(mv);
        let nodes = nodes + recursive_perft(game, depth - 1);
        game.undo_move();
        nodes
    })
}
