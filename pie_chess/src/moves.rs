/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use anyhow::{bail, Result};

use super::{Board, Direction, Piece, PieceKind, Square};

/// Represents a single ply: a piece moving from one square to another.
///
/// A [`Move`] snapshots the piece on its origin and the piece on its destination at the time it was
/// created, so that the capture can be restored when the move is undone.
///
/// Two moves are equal if they share an origin, a destination, and the kind of the piece being moved.
/// Moves built against different positions should not be compared.
#[derive(Clone, Copy, Eq)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Option<Piece>,
    captured: Option<Piece>,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`, reading the moved and captured pieces off of `board`.
    ///
    /// No validation is performed. If `from` is empty, the move carries no piece, and will never
    /// compare equal to a generated move.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::*;
    /// let board = Board::default();
    /// let mv = Move::new(Square::new(7, 1), Square::new(5, 2), &board);
    /// assert_eq!(mv.piece(), Some(Piece::new(Color::White, PieceKind::Knight)));
    /// assert_eq!(mv.captured(), None);
    /// ```
    #[inline(always)]
    pub fn new(from: Square, to: Square, board: &Board) -> Self {
        Self {
            from,
            to,
            piece: board.piece_at(from),
            captured: board.piece_at(to),
        }
    }

    /// Creates a [`Move`] from a string like `"e2e4"`, reading the pieces off of `board`.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::*;
    /// let game = Game::default();
    /// let mv = Move::from_uci(&game, "g1f3").unwrap();
    /// assert!(game.get_valid_moves().contains(&mv));
    /// assert!(Move::from_uci(&game, "g1").is_err());
    /// ```
    pub fn from_uci(board: &Board, uci: &str) -> Result<Self> {
        let uci = uci.trim();
        let (Some(from), Some(to)) = (uci.get(0..2), uci.get(2..)) else {
            bail!("Move must be two squares, like \"e2e4\". Found {uci:?}");
        };

        if to.len() != 2 {
            bail!("Move must be two squares, like \"e2e4\". Found {uci:?}");
        }

        Ok(Self::new(
            Square::from_uci(from)?,
            Square::from_uci(to)?,
            board,
        ))
    }

    /// The square this move starts on.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square this move ends on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece that stood on [`Move::from`] when this move was created.
    #[inline(always)]
    pub const fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// The piece that stood on [`Move::to`] when this move was created, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Returns `true` if this move lands on an occupied square.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if the piece being moved is a King.
    #[inline(always)]
    pub fn is_king_move(&self) -> bool {
        self.piece.is_some_and(|piece| piece.is_king())
    }

    /// Returns the [`PieceKind`] of the piece being moved, if there is one.
    #[inline(always)]
    pub fn kind(&self) -> Option<PieceKind> {
        self.piece.map(|piece| piece.kind())
    }

    /// The unit step from [`Move::from`] towards [`Move::to`].
    ///
    /// For moves that are not along a rank, file or diagonal (Knight jumps), this is only the sign of each axis.
    #[inline(always)]
    pub fn direction(&self) -> Direction {
        let dr = self.to.row() as i8 - self.from.row() as i8;
        let dc = self.to.col() as i8 - self.from.col() as i8;
        Direction::new(dr.signum(), dc.signum())
    }

    /// Renders this move as a human-readable log line.
    ///
    /// Quiet moves read `"wPe2 to e4"`, captures read `"wNc3 x bPd5"`.
    /// This is not algebraic notation.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::*;
    /// let board = Board::from_fen("4k3/8/8/3p4/8/2N5/8/4K3").unwrap();
    /// let capture = Move::from_uci(&board, "c3d5").unwrap();
    /// assert_eq!(capture.to_notation(), "wNc3 x bPd5");
    /// let quiet = Move::from_uci(&board, "c3b5").unwrap();
    /// assert_eq!(quiet.to_notation(), "wNc3 to b5");
    /// ```
    pub fn to_notation(&self) -> String {
        let piece = self.piece.map(|p| p.code()).unwrap_or_else(|| "--".into());

        match self.captured {
            Some(captured) => format!("{piece}{} x {}{}", self.from, captured.code(), self.to),
            None => format!("{piece}{} to {}", self.from, self.to),
        }
    }

    /// Converts this move to a string like `"e2e4"`.
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.kind() == other.kind()
    }
}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.kind().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.to_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn sq(uci: &str) -> Square {
        Square::from_uci(uci).unwrap()
    }

    #[test]
    fn snapshot_is_taken_at_construction() {
        let mut board = Board::default();
        let mv = Move::new(sq("d1"), sq("d7"), &board);

        board.clear(sq("d7"));

        assert_eq!(mv.piece(), Some(Piece::new(Color::White, PieceKind::Queen)));
        assert_eq!(mv.captured(), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert!(mv.is_capture());
    }

    #[test]
    fn equality_ignores_the_captured_piece() {
        let before = Board::from_fen("4k3/8/8/8/8/8/4p3/R3K3").unwrap();
        let after = Board::from_fen("4k3/8/8/8/8/8/p7/R3K3").unwrap();

        let quiet = Move::new(sq("a1"), sq("a2"), &before);
        let capture = Move::new(sq("a1"), sq("a2"), &after);
        assert_eq!(quiet, capture);
    }

    #[test]
    fn equality_includes_the_moved_kind() {
        let rook_board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let queen_board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3").unwrap();
        let empty_board = Board::new();

        let rook = Move::new(sq("a1"), sq("a5"), &rook_board);
        let queen = Move::new(sq("a1"), sq("a5"), &queen_board);
        let nothing = Move::new(sq("a1"), sq("a5"), &empty_board);

        assert_ne!(rook, queen);
        assert_ne!(rook, nothing);
        assert_eq!(nothing.to_notation(), "--a1 to a5");
    }

    #[test]
    fn direction_is_a_unit_step() {
        let board = Board::default();
        assert_eq!(Move::from_uci(&board, "e2e4").unwrap().direction(), Direction::NORTH);
        assert_eq!(Move::from_uci(&board, "c1h6").unwrap().direction(), Direction::NORTH_EAST);
        assert_eq!(Move::from_uci(&board, "b1a3").unwrap().direction(), Direction::NORTH_WEST);
    }

    #[test]
    fn uci_parsing() {
        let board = Board::default();
        let mv = Move::from_uci(&board, " e2e4 ").unwrap();
        assert_eq!(mv.to_uci(), "e2e4");
        assert_eq!(mv.to_string(), "e2e4");
        assert!(Move::from_uci(&board, "e2e").is_err());
        assert!(Move::from_uci(&board, "e2e4q").is_err());
        assert!(Move::from_uci(&board, "z2e4").is_err());
    }
}
