/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::BOARD_SIZE;

/// A single step across the board, expressed as a change in row and column.
///
/// Rows grow towards White's side of the board, so [`Direction::NORTH`] points towards row 0 (rank 8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Direction {
    dr: i8,
    dc: i8,
}

impl Direction {
    pub const NORTH: Self = Self::new(-1, 0);
    pub const SOUTH: Self = Self::new(1, 0);
    pub const WEST: Self = Self::new(0, -1);
    pub const EAST: Self = Self::new(0, 1);
    pub const NORTH_WEST: Self = Self::new(-1, -1);
    pub const NORTH_EAST: Self = Self::new(-1, 1);
    pub const SOUTH_WEST: Self = Self::new(1, -1);
    pub const SOUTH_EAST: Self = Self::new(1, 1);

    /// The four directions a Rook slides in.
    pub const ORTHOGONALS: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::WEST, Self::EAST];

    /// The four directions a Bishop slides in.
    pub const DIAGONALS: [Self; 4] = [
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
        Self::NORTH_EAST,
    ];

    /// All eight rays leaving a square; orthogonals first.
    pub const ALL: [Self; 8] = [
        Self::EAST,
        Self::WEST,
        Self::SOUTH,
        Self::NORTH,
        Self::NORTH_WEST,
        Self::NORTH_EAST,
        Self::SOUTH_WEST,
        Self::SOUTH_EAST,
    ];

    /// The eight jumps of a Knight. These are not rays.
    pub const KNIGHT_JUMPS: [Self; 8] = [
        Self::new(-1, 2),
        Self::new(-1, -2),
        Self::new(-2, -1),
        Self::new(-2, 1),
        Self::new(1, -2),
        Self::new(2, -1),
        Self::new(2, 1),
        Self::new(1, 2),
    ];

    /// Creates a new [`Direction`] from a row step and a column step.
    #[inline(always)]
    pub const fn new(dr: i8, dc: i8) -> Self {
        Self { dr, dc }
    }

    /// Change in row when taking one step in this direction.
    #[inline(always)]
    pub const fn dr(&self) -> i8 {
        self.dr
    }

    /// Change in column when taking one step in this direction.
    #[inline(always)]
    pub const fn dc(&self) -> i8 {
        self.dc
    }

    /// The direction pointing the opposite way.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::Direction;
    /// assert_eq!(Direction::NORTH_EAST.opposite(), Direction::SOUTH_WEST);
    /// ```
    #[inline(always)]
    pub const fn opposite(&self) -> Self {
        Self::new(-self.dr, -self.dc)
    }

    /// Returns `true` if this is one of the four Rook directions.
    #[inline(always)]
    pub const fn is_orthogonal(&self) -> bool {
        (self.dr == 0) != (self.dc == 0) && self.dr.abs() <= 1 && self.dc.abs() <= 1
    }

    /// Returns `true` if this is one of the four Bishop directions.
    #[inline(always)]
    pub const fn is_diagonal(&self) -> bool {
        self.dr.abs() == 1 && self.dc.abs() == 1
    }

    /// Returns `true` if `other` lies along the same line as `self`, pointing either way.
    ///
    /// A piece pinned along `self` may still move in any direction parallel to it.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::Direction;
    /// assert!(Direction::NORTH.is_parallel_to(Direction::SOUTH));
    /// assert!(!Direction::NORTH.is_parallel_to(Direction::NORTH_EAST));
    /// ```
    #[inline(always)]
    pub fn is_parallel_to(&self, other: Self) -> bool {
        *self == other || *self == other.opposite()
    }
}

/// Represents a single square on an `8x8` chess board, addressed by row and column.
///
/// Row 0 is rank 8 (Black's back rank), and row 7 is rank 1.
/// Column 0 is the A file, and column 7 is the H file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a new [`Square`] from a row and a column.
    ///
    /// Coordinates are not validated outside of debug builds; callers must keep them within `[0, 8)`.
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self { row, col }
    }

    /// Creates a new [`Square`], returning `None` if either coordinate falls off the board.
    #[inline(always)]
    pub const fn new_checked(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < BOARD_SIZE as i8 && col >= 0 && col < BOARD_SIZE as i8 {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Creates a new [`Square`] from an index in `[0, 64)`, laid out row by row.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::new(
                (index / BOARD_SIZE as usize) as u8,
                (index % BOARD_SIZE as usize) as u8,
            ))
        } else {
            None
        }
    }

    /// Fetches the row of this square.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Fetches the column of this square.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Fetches the index of this square, for use in arrays of length [`Square::COUNT`].
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Takes one step from this square in `direction`, returning `None` if that leaves the board.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::{Direction, Square};
    /// let a1 = Square::new(7, 0);
    /// assert_eq!(a1.offset(Direction::NORTH), Some(Square::new(6, 0)));
    /// assert_eq!(a1.offset(Direction::WEST), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, direction: Direction) -> Option<Self> {
        self.offset_by(direction, 1)
    }

    /// Takes `distance` steps from this square in `direction`, returning `None` if that leaves the board.
    #[inline(always)]
    pub const fn offset_by(&self, direction: Direction, distance: i8) -> Option<Self> {
        Self::new_checked(
            self.row as i8 + direction.dr() * distance,
            self.col as i8 + direction.dc() * distance,
        )
    }

    /// Iterates over the squares reached by repeatedly stepping in `direction`, excluding `self`.
    ///
    /// The iterator ends at the edge of the board.
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Self> {
        (1..BOARD_SIZE as i8).map_while(move |distance| self.offset_by(direction, distance))
    }

    /// Iterates over all 64 squares, row by row, starting at row 0.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }

    /// The file letter of this square, `'a'` through `'h'`.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// The rank digit of this square, `'1'` through `'8'`.
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    /// Parses a square from a string like `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use pie_chess_types::Square;
    /// assert_eq!(Square::from_uci("e2").unwrap(), Square::new(6, 4));
    /// assert_eq!(Square::from_uci("a8").unwrap(), Square::new(0, 0));
    /// assert!(Square::from_uci("i9").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut chars = uci.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be a file followed by a rank, like \"e4\". Found {uci:?}");
        };

        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("Invalid file {file:?} in square {uci:?}"),
        };
        let row = rank
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .map(|r| 8 - r as u8)
            .ok_or(anyhow!("Invalid rank {rank:?} in square {uci:?}"))?;

        Ok(Self::new(row, col))
    }

    /// Converts this square to a string like `"e4"`.
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for (i, square) in Square::iter().enumerate() {
            assert_eq!(square.index(), i);
            assert_eq!(Square::from_index(i), Some(square));
        }
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn rays_stop_at_the_edge() {
        let d4 = Square::from_uci("d4").unwrap();
        let north: Vec<_> = d4.ray(Direction::NORTH).map(|s| s.to_uci()).collect();
        assert_eq!(north, ["d5", "d6", "d7", "d8"]);

        let h1 = Square::from_uci("h1").unwrap();
        assert_eq!(h1.ray(Direction::SOUTH_EAST).count(), 0);
        assert_eq!(h1.ray(Direction::NORTH_WEST).count(), 7);
    }

    #[test]
    fn direction_classification() {
        assert!(Direction::ORTHOGONALS.iter().all(Direction::is_orthogonal));
        assert!(Direction::DIAGONALS.iter().all(Direction::is_diagonal));
        assert!(Direction::KNIGHT_JUMPS
            .iter()
            .all(|d| !d.is_orthogonal() && !d.is_diagonal()));
    }

    #[test]
    fn coordinates_map_to_files_and_ranks() {
        let square = Square::new(7, 1);
        assert_eq!(square.to_string(), "b1");
        assert_eq!(Square::new(0, 7).to_string(), "h8");
        assert_eq!("c6".parse::<Square>().unwrap(), Square::new(2, 2));
        assert!(Square::from_uci("e").is_err());
        assert!(Square::from_uci("e44").is_err());
    }
}
