/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::Direction;

/// Represents the color of a player, piece, square, etc. within a chess board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns the opposite color.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Fetches the index of this color, for use in arrays of length [`Color::COUNT`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The direction a Pawn of this color pushes in.
    ///
    /// White starts at the bottom of the board (row 7) and moves towards row 0.
    #[inline(always)]
    pub const fn forward(&self) -> Direction {
        match self {
            Self::White => Direction::NORTH,
            Self::Black => Direction::SOUTH,
        }
    }

    /// The row on which Pawns of this color start the game, and from which they may push twice.
    #[inline(always)]
    pub const fn pawn_home_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Returns `'w'` or `'b'`, the prefix used in piece codes and FEN strings.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Parses a color from `'w'` or `'b'` (case-insensitive).
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'w' => Ok(Self::White),
            'b' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {c:?}"),
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Color must be a single character. Found {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// All six piece kinds, in ascending order of their discriminant.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Pawn,
            Self::Knight,
            Self::Bishop,
            Self::Rook,
            Self::Queen,
            Self::King,
        ]
    }

    /// Fetches the uppercase character of this kind, as used in piece codes (`"wN"`).
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::PieceKind;
    /// assert_eq!(PieceKind::Knight.char(), 'N');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Parses a kind from its character, ignoring case.
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'P' => Ok(Self::Pawn),
            'N' => Ok(Self::Knight),
            'B' => Ok(Self::Bishop),
            'R' => Ok(Self::Rook),
            'Q' => Ok(Self::Queen),
            'K' => Ok(Self::King),
            _ => bail!("Invalid piece kind character {c:?}. Expected one of [PNBRQK]"),
        }
    }

    /// Fetches the index of this kind, for use in arrays of length [`PieceKind::COUNT`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Number of pieces of this kind each side starts a game with.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::PieceKind;
    /// assert_eq!(PieceKind::Pawn.starting_count(), 8);
    /// assert_eq!(PieceKind::Queen.starting_count(), 1);
    /// ```
    #[inline(always)]
    pub const fn starting_count(&self) -> usize {
        match self {
            Self::Pawn => 8,
            Self::Knight | Self::Bishop | Self::Rook => 2,
            Self::Queen | Self::King => 1,
        }
    }

    /// Fetches a human-readable name of this kind.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents a chess piece on the game board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Creates a new [`Piece`] from the given [`Color`] and [`PieceKind`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Fetches the [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this piece is of the provided [`Color`].
    #[inline(always)]
    pub fn is(&self, color: Color) -> bool {
        self.color == color
    }

    /// Returns `true` if this piece is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns `true` if this piece is a Knight.
    #[inline(always)]
    pub const fn is_knight(&self) -> bool {
        matches!(self.kind, PieceKind::Knight)
    }

    /// Fetches the FEN character of this piece: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Queen).char(), 'Q');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Queen).char(), 'q');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind.char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Creates a [`Piece`] from a FEN character.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::{Color, Piece, PieceKind};
    /// let black_rook = Piece::from_uci('r').unwrap();
    /// assert_eq!(black_rook, Piece::new(Color::Black, PieceKind::Rook));
    /// assert!(Piece::from_uci('x').is_err());
    /// ```
    pub fn from_uci(c: char) -> Result<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, kind))
    }

    /// Fetches the two-character code of this piece, color first (`"wN"`, `"bP"`).
    ///
    /// This is the form used when rendering moves as notation.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Knight).code(), "wN");
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Pawn).code(), "bP");
    /// ```
    pub fn code(&self) -> String {
        format!("{}{}", self.color.char(), self.kind.char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_chars_round_trip_through_fen() {
        for c in "PNBRQKpnbrqk".chars() {
            assert_eq!(Piece::from_uci(c).unwrap().char(), c);
        }
    }

    #[test]
    fn pawns_push_towards_the_enemy() {
        assert_eq!(Color::White.forward(), Direction::NORTH);
        assert_eq!(Color::Black.forward(), Direction::SOUTH);
        assert_eq!(Color::White.pawn_home_row(), 6);
        assert_eq!(Color::Black.pawn_home_row(), 1);
    }

    #[test]
    fn starting_set_has_sixteen_pieces() {
        let total: usize = PieceKind::all().iter().map(PieceKind::starting_count).sum();
        assert_eq!(total, 16);

        for (i, kind) in PieceKind::all().into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn color_parsing() {
        assert_eq!("w".parse::<Color>().unwrap(), Color::White);
        assert_eq!("B".parse::<Color>().unwrap(), Color::Black);
        assert!("white".parse::<Color>().is_err());
        assert!(Color::from_char('x').is_err());
    }
}
