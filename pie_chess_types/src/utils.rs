/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Maximum number of moves that can be generated from any position a game accepts.
///
/// A side has at most nine Queens (27 moves each), two Rooks (14), two Bishops (13), two Knights (8)
/// and a King (8). Reachable positions top out at 218, but a FEN may describe an unreachable one.
pub const MAX_NUM_MOVES: usize = 321;

/// Number of rows (ranks) and columns (files) on the board.
pub const BOARD_SIZE: u8 = 8;
