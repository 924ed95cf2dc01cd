/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    king_is_safe_after, Direction, Game, Move, Piece, PieceKind, Pins, Square, MAX_NUM_MOVES,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// Pseudo-legal generation for each kind of piece.
///
/// Every generator produces moves for the side to move from a single square. Pins are respected,
/// and King moves are fully legal, but moves of other pieces may still leave the King in check;
/// [`Game::get_valid_moves`] filters those out.
impl Game {
    /// Generates the moves of `piece` standing on `from`, dispatching on its kind.
    pub(crate) fn generate_moves_for(
        &self,
        piece: Piece,
        from: Square,
        pins: &Pins,
        moves: &mut MoveList,
    ) {
        match piece.kind() {
            PieceKind::Pawn => self.generate_pawn_moves(from, pins, moves),
            PieceKind::Knight => self.generate_knight_moves(from, pins, moves),
            PieceKind::Bishop => self.generate_bishop_moves(from, pins, moves),
            PieceKind::Rook => self.generate_rook_moves(from, pins, moves),
            PieceKind::Queen => self.generate_queen_moves(from, pins, moves),
            PieceKind::King => self.generate_king_moves(from, moves),
        }
    }

    /// Creates and appends a [`Move`] from `from` to `to` against the current board.
    #[inline(always)]
    fn serialize_move(&self, from: Square, to: Square, moves: &mut MoveList) {
        moves.push(Move::new(from, to, self.board()));
    }

    /// Generates the pushes and captures of the Pawn on `from`.
    ///
    /// A pinned Pawn keeps only the moves that run along its pin axis.
    pub(crate) fn generate_pawn_moves(&self, from: Square, pins: &Pins, moves: &mut MoveList) {
        let color = self.side_to_move();
        let board = self.board();
        let pin = pins.direction_for(from);
        let may_move = |direction: Direction| pin.map_or(true, |axis| axis.is_parallel_to(direction));

        let forward = color.forward();

        // A Pawn on the last row has nowhere to go; promotion is not supported
        if let Some(single) = from.offset(forward) {
            if !board.has(single) && may_move(forward) {
                self.serialize_move(from, single, moves);

                if from.row() == color.pawn_home_row() {
                    if let Some(double) = from.offset_by(forward, 2) {
                        if !board.has(double) {
                            self.serialize_move(from, double, moves);
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let diagonal = Direction::new(forward.dr(), side);
            let Some(to) = from.offset(diagonal) else {
                continue;
            };

            if board.is_enemy(to, color) && may_move(diagonal) {
                self.serialize_move(from, to, moves);
            }
        }
    }

    /// Generates the jumps of the Knight on `from`. A pinned Knight cannot move at all.
    pub(crate) fn generate_knight_moves(&self, from: Square, pins: &Pins, moves: &mut MoveList) {
        if pins.contains(from) {
            return;
        }

        let color = self.side_to_move();
        for jump in Direction::KNIGHT_JUMPS {
            let Some(to) = from.offset(jump) else {
                continue;
            };

            if self.board().is_enemy_or_empty(to, color) {
                self.serialize_move(from, to, moves);
            }
        }
    }

    /// Generates the diagonal slides of the Bishop on `from`.
    pub(crate) fn generate_bishop_moves(&self, from: Square, pins: &Pins, moves: &mut MoveList) {
        self.generate_sliding_moves(from, &Direction::DIAGONALS, pins, moves);
    }

    /// Generates the orthogonal slides of the Rook on `from`.
    pub(crate) fn generate_rook_moves(&self, from: Square, pins: &Pins, moves: &mut MoveList) {
        self.generate_sliding_moves(from, &Direction::ORTHOGONALS, pins, moves);
    }

    /// Generates the slides of the Queen on `from`: everything a Rook and a Bishop could do from there.
    pub(crate) fn generate_queen_moves(&self, from: Square, pins: &Pins, moves: &mut MoveList) {
        self.generate_rook_moves(from, pins, moves);
        self.generate_bishop_moves(from, pins, moves);
    }

    /// Slides from `from` along each of `directions` until reaching the edge of the board or another piece.
    ///
    /// Friendly pieces block, enemy pieces are captured. A pinned slider only considers directions parallel to its pin.
    fn generate_sliding_moves(
        &self,
        from: Square,
        directions: &[Direction],
        pins: &Pins,
        moves: &mut MoveList,
    ) {
        let color = self.side_to_move();
        let pin = pins.direction_for(from);

        for &direction in directions {
            if pin.is_some_and(|axis| !axis.is_parallel_to(direction)) {
                continue;
            }

            for to in from.ray(direction) {
                match self.board().color_at(to) {
                    None => self.serialize_move(from, to, moves),
                    Some(occupant) if occupant != color => {
                        self.serialize_move(from, to, moves);
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
    }

    /// Generates the steps of the King on `from`, keeping only those that do not walk into check.
    ///
    /// Each step is verified by simulating it on a copy of the board; see [`king_is_safe_after`].
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move();
        let board = self.board();

        for direction in Direction::ALL {
            let Some(to) = from.offset(direction) else {
                continue;
            };

            if board.is_friendly(to, color) {
                continue;
            }

            if king_is_safe_after(board, from, to, color) {
                self.serialize_move(from, to, moves);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{compute_check_info, Color};

    fn sq(uci: &str) -> Square {
        Square::from_uci(uci).unwrap()
    }

    /// Generates pseudo-legal moves for the piece on `from` with the position's real pins,
    /// returning the destinations.
    fn destinations(fen: &str, from: &str) -> HashSet<String> {
        let game = Game::from_fen(fen).unwrap();
        let from = sq(from);
        let color = game.side_to_move();
        let pins = compute_check_info(&game, game.king_square(color), color)
            .pins()
            .clone();
        let piece = game.piece_at(from).unwrap();

        let mut moves = MoveList::default();
        game.generate_moves_for(piece, from, &pins, &mut moves);
        moves.iter().map(|mv| mv.to().to_uci()).collect()
    }

    fn set(squares: &[&str]) -> HashSet<String> {
        squares.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn startpos_knight_and_pawn() {
        assert_eq!(destinations(crate::FEN_STARTPOS, "b1"), set(&["a3", "c3"]));
        assert_eq!(destinations(crate::FEN_STARTPOS, "e2"), set(&["e3", "e4"]));
        assert!(destinations(crate::FEN_STARTPOS, "a1").is_empty());
        assert!(destinations(crate::FEN_STARTPOS, "d1").is_empty());
    }

    #[test]
    fn black_pawns_push_down_the_board() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b";
        assert_eq!(destinations(fen, "d7"), set(&["d6", "d5"]));
    }

    #[test]
    fn pawn_double_push_needs_both_squares_empty() {
        assert_eq!(destinations("4k3/8/8/8/4n3/8/4P3/4K3 w", "e2"), set(&["e3"]));
        assert!(destinations("4k3/8/8/8/8/4n3/4P3/4K3 w", "e2").is_empty());
    }

    #[test]
    fn pawn_captures_on_both_edges() {
        // The b-pawn can capture onto the a-file, and the g-pawn onto the h-file
        assert_eq!(
            destinations("4k3/8/8/8/8/p7/1P6/4K3 w", "b2"),
            set(&["a3", "b3", "b4"])
        );
        assert_eq!(
            destinations("4k3/8/8/8/8/7p/6P1/4K3 w", "g2"),
            set(&["h3", "g3", "g4"])
        );
        // A pawn on the a-file does not wrap around to the h-file
        assert_eq!(destinations("4k3/8/8/8/8/7p/P7/4K3 w", "a2"), set(&["a3", "a4"]));
    }

    #[test]
    fn pawn_does_not_capture_forwards_or_friends() {
        assert!(destinations("4k3/8/8/8/8/3NpN2/4P3/4K3 w", "e2").is_empty());
    }

    #[test]
    fn pawn_on_last_row_has_no_moves() {
        assert!(destinations("P3k3/8/8/8/8/8/8/4K3 w", "a8").is_empty());
        assert!(destinations("4k3/8/8/8/8/8/8/p3K3 b", "a1").is_empty());
    }

    #[test]
    fn pinned_pawn_moves_along_the_pin() {
        // Pinned along the file: pushes only
        assert_eq!(
            destinations("4r2k/8/8/8/8/3p1p2/4P3/4K3 w", "e2"),
            set(&["e3", "e4"])
        );
        // Pinned along a diagonal: may only capture the pinner
        assert_eq!(destinations("7k/8/8/8/8/2b5/3P4/4K3 w", "d2"), set(&["c3"]));
        // Pinned along the rank: frozen
        assert!(destinations("7k/8/8/KP5r/8/8/8/8 w", "b5").is_empty());
    }

    #[test]
    fn rook_slides_until_blocked() {
        assert_eq!(
            destinations("4k3/8/8/3p4/8/8/3R2P1/4K3 w", "d2"),
            set(&["d1", "d3", "d4", "d5", "a2", "b2", "c2", "e2", "f2"])
        );
    }

    #[test]
    fn bishop_slides_until_blocked() {
        assert_eq!(
            destinations("4k3/8/8/8/8/4p3/3B4/4K3 w", "d2"),
            set(&["c1", "c3", "b4", "a5", "e3"])
        );
    }

    #[test]
    fn queen_is_rook_and_bishop() {
        let rook = destinations("4k3/8/8/8/3R4/8/8/7K w", "d4");
        let bishop = destinations("4k3/8/8/8/3B4/8/8/7K w", "d4");
        let queen = destinations("4k3/8/8/8/3Q4/8/8/7K w", "d4");
        assert_eq!(queen, rook.union(&bishop).cloned().collect());
        assert_eq!(queen.len(), 27);
    }

    #[test]
    fn pinned_sliders_stay_on_the_axis() {
        // Rook pinned on the file can still slide along it and capture the pinner
        assert_eq!(
            destinations("4r2k/8/8/8/8/8/4R3/4K3 w", "e2"),
            set(&["e3", "e4", "e5", "e6", "e7", "e8"])
        );
        // Rook pinned on a diagonal cannot move
        assert!(destinations("7k/8/8/b7/8/8/3R4/4K3 w", "d2").is_empty());
        // Queen pinned on a diagonal keeps only the diagonal
        assert_eq!(
            destinations("7k/8/8/b7/8/8/3Q4/4K3 w", "d2"),
            set(&["c3", "b4", "a5"])
        );
    }

    #[test]
    fn pinned_knight_is_frozen() {
        assert!(destinations("4r2k/8/8/8/8/8/4N3/4K3 w", "e2").is_empty());
    }

    #[test]
    fn king_avoids_attacked_squares() {
        // The rook on d8 covers the d-file; the King may not step onto it
        assert_eq!(
            destinations("3r3k/8/8/8/8/8/8/4K3 w", "e1"),
            set(&["e2", "f1", "f2"])
        );
        // The King may capture an undefended piece, but not a defended one
        assert_eq!(
            destinations("7k/8/8/8/8/8/3r4/4K3 w", "e1"),
            set(&["d2", "f1"])
        );
        assert_eq!(destinations("3r3k/8/8/8/8/8/3r4/4K3 w", "e1"), set(&["f1"]));
    }

    #[test]
    fn black_generators_use_black_pieces() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(
            destinations("4k3/8/8/8/8/8/8/4K3 b", "e8"),
            set(&["d8", "f8", "d7", "e7", "f7"])
        );
    }
}
