/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::{Color, Piece, PieceKind, Square, BOARD_SIZE, FEN_STARTPOS};

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of whose turn it is or of the moves played so far. If you need those, see [`Game`](crate::Game).
///
/// Internally this is a mailbox: one slot per [`Square`], holding the [`Piece`] on it, if any.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [None; Square::COUNT],
        }
    }

    /// Constructs a [`Board`] from the piece placements of a FEN string, ignoring any further fields.
    ///
    /// The first rank listed is row 0 (rank 8).
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        let Some(placements) = fen.split_whitespace().next() else {
            bail!("Invalid FEN string: FEN string must have piece placements.");
        };

        if placements.matches('/').count() != BOARD_SIZE as usize - 1 {
            bail!("Missing placements for all 8 ranks.");
        }

        for (row, placements) in placements.split('/').enumerate() {
            let mut col = 0;

            for piece_char in placements.chars() {
                if col >= BOARD_SIZE {
                    bail!("Too many squares in rank {:?} when parsing FEN.", placements);
                }

                if let Ok(piece) = Piece::from_uci(piece_char) {
                    board.place(piece, Square::new(row as u8, col));
                    col += 1;
                } else {
                    let Some(empty) = piece_char.to_digit(10) else {
                        bail!("Found non-piece, non-numeric char {piece_char:?} when parsing FEN.");
                    };
                    col += empty as u8;
                }
            }

            if col != BOARD_SIZE {
                bail!("Rank {placements:?} does not describe exactly 8 squares.");
            }
        }

        Ok(board)
    }

    /// Generates the piece placement field of a FEN string for this [`Board`].
    pub fn to_fen(&self) -> String {
        let mut placements: Vec<String> = Vec::with_capacity(BOARD_SIZE as usize);

        for row in 0..BOARD_SIZE {
            let mut rank = String::new();
            let mut empty_spaces = 0;

            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_at(Square::new(row, col)) {
                    if empty_spaces != 0 {
                        rank += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    rank.push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                rank += &empty_spaces.to_string();
            }
            placements.push(rank);
        }

        placements.join("/")
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::{Board, Square};
    /// let board = Board::default();
    /// assert_eq!(board.has(Square::new(7, 1)), true);
    /// ```
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::{Board, Color, PieceKind, Square};
    /// let board = Board::default();
    /// let piece = board.piece_at(Square::new(6, 0)).unwrap();
    /// assert_eq!(piece.kind(), PieceKind::Pawn);
    /// assert_eq!(piece.color(), Color::White);
    /// assert!(board.piece_at(Square::new(4, 4)).is_none());
    /// ```
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Places the provided [`Piece`] on the supplied [`Square`], replacing whatever stood there.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::{Board, Piece, PieceKind, Color, Square};
    /// let white_knight = Piece::new(Color::White, PieceKind::Knight);
    /// let mut board = Board::new();
    /// board.place(white_knight, Square::from_uci("c4").unwrap());
    /// assert_eq!(board.to_fen(), "8/8/8/8/2N5/8/8/8");
    /// ```
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.mailbox[square.index()] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()].take()
    }

    /// Clears the supplied [`Square`] of any pieces.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.take(square);
    }

    /// Returns `true` if `square` holds a piece of `color`.
    #[inline(always)]
    pub fn is_friendly(&self, square: Square, color: Color) -> bool {
        self.color_at(square) == Some(color)
    }

    /// Returns `true` if `square` holds a piece of the opponent of `color`.
    #[inline(always)]
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        self.color_at(square) == Some(color.opponent())
    }

    /// Returns `true` if `square` is empty or holds a piece of the opponent of `color`.
    #[inline(always)]
    pub fn is_enemy_or_empty(&self, square: Square, color: Color) -> bool {
        !self.is_friendly(square, color)
    }

    /// Iterates over every occupied square, row by row, along with the piece on it.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Finds every square holding `piece`.
    pub fn squares_of(&self, piece: Piece) -> impl Iterator<Item = Square> + '_ {
        self.iter()
            .filter(move |(_, p)| *p == piece)
            .map(|(square, _)| square)
    }

    /// Finds the square of the King of `color`, if there is one on the board.
    ///
    /// If there are several, the first one (scanning from row 0) is returned.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.squares_of(Piece::new(color, PieceKind::King)).next()
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index.index()]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.mailbox[index.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "{}|", Square::new(row, 0).rank_char())?;
            for col in 0..BOARD_SIZE {
                let occupant = self
                    .piece_at(Square::new(row, col))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                write!(f, " {occupant}")?;
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in 0..BOARD_SIZE {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", Square::new(0, col).file_char())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\nFEN: {}", self, self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_layout() {
        let board = Board::default();

        assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(board.iter().count(), 32);
        assert_eq!(board.king_square(Color::White), Some(Square::new(7, 4)));
        assert_eq!(board.king_square(Color::Black), Some(Square::new(0, 4)));
        assert_eq!(
            board.piece_at(Square::new(0, 3)),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
    }

    #[test]
    fn fen_round_trip() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8";
        assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/9").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/7").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/ppppppppp").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/7x").is_err());
    }

    #[test]
    fn take_and_place() {
        let mut board = Board::default();
        let b1 = Square::from_uci("b1").unwrap();
        let c3 = Square::from_uci("c3").unwrap();

        let knight = board.take(b1).unwrap();
        board.place(knight, c3);

        assert!(!board.has(b1));
        assert!(board.is_friendly(c3, Color::White));
        assert!(board.is_enemy(c3, Color::Black));
        assert!(board.is_enemy_or_empty(b1, Color::White));
        assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/8/2N5/PPPPPPPP/R1BQKBNR");
    }
}
