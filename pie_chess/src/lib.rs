/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use pie_chess_types::*;

/// Detection of checks and pins against a King.
mod attacks;
/// High-level abstraction of the game of chess: the board, whose turn it is, and the move log.
mod game;
/// Pseudo-legal move generation for each kind of piece.
mod movegen;
/// The [`Move`] value and its notation.
mod moves;
/// Utility function for performance testing.
mod perft;
/// A chessboard: which piece, if any, stands on each square.
mod position;

pub use attacks::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::attacks::*;
    pub use crate::game::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use pie_chess_types::*;
}
