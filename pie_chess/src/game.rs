/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::{anyhow, bail, Result};
use arrayvec::ArrayVec;
use log::{debug, trace};

use super::{
    compute_check_info, Board, CheckInfo, Color, Move, MoveList, Piece, PieceKind, Square,
    BOARD_SIZE, FEN_STARTPOS,
};

/// The authoritative state of a single game: the board, whose turn it is, where the Kings are, and every move played.
///
/// A [`Game`] is mutated in place by [`Game::make_move`] and [`Game::undo_move`]. Check and pin data
/// is never stored; it is recomputed from the board whenever moves are generated.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    /// Which piece, if any, stands on each square.
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// The square of each color's King, indexed by [`Color::index`].
    ///
    /// Always equal to the square holding that King on `self.board`.
    king_squares: [Square; Color::COUNT],

    /// Every move made so far, oldest first.
    history: Vec<Move>,
}

impl Game {
    /// Creates a new [`Game`] in the standard starting position, with White to move.
    pub fn new() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }

    /// Creates a new [`Game`] from a FEN string.
    ///
    /// Only the piece placements and the active color are read; the active color defaults to White.
    /// The board must hold exactly one King of each color, and no side may have more Pawns and
    /// promoted pieces combined than the eight Pawns it started with.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::*;
    /// let game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R b").unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert_eq!(game.king_square(Color::White), Square::new(7, 4));
    ///
    /// assert!(Game::from_fen("8/8/8/8/8/8/8/4K3 w").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let board = Board::from_fen(fen)?;

        let active_color = fen.split_whitespace().nth(1).unwrap_or("w");
        let side_to_move = Color::from_str(active_color)?;

        let mut king_squares = [Square::default(); Color::COUNT];
        for color in Color::all() {
            let mut kings = board.squares_of(Piece::new(color, PieceKind::King));
            let king = kings
                .next()
                .ok_or(anyhow!("Invalid FEN string: no King found for {color}"))?;

            if kings.next().is_some() {
                bail!("Invalid FEN string: more than one King found for {color}");
            }
            king_squares[color.index()] = king;

            validate_material(&board, color)?;
        }

        Ok(Self {
            board,
            side_to_move,
            king_squares,
            history: Vec::new(),
        })
    }

    /// Generates a FEN string of this [`Game`]: the piece placements and the active color.
    pub fn to_fen(&self) -> String {
        format!("{} {}", self.board.to_fen(), self.side_to_move)
    }

    /// Fetches the current [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Fetches the square of the King of `color`.
    #[inline(always)]
    pub const fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Fetches every move made so far, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Fetches the most recent move, if any have been made.
    #[inline(always)]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Applies the provided [`Move`]. No enforcement of legality.
    ///
    /// The moved piece snapshotted by `mv` is placed on its destination, its origin is cleared, the
    /// move is logged, and the turn passes to the other player. Only moves returned by
    /// [`Game::get_valid_moves`] on the current position should be supplied; anything else
    /// silently corrupts the game.
    pub fn make_move(&mut self, mv: Move) {
        let (from, to) = (mv.from(), mv.to());

        self.board.clear(from);
        self.board[to] = mv.piece();

        if let Some(king) = mv.piece().filter(Piece::is_king) {
            self.king_squares[king.color().index()] = to;
        }

        self.history.push(mv);
        self.toggle_side_to_move();

        debug!("Do: {}", mv.to_notation());
    }

    /// Takes back the most recent move, restoring any captured piece, and returns it.
    ///
    /// If no moves have been made, this does nothing and returns `None`.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::*;
    /// let mut game = Game::default();
    /// assert!(game.undo_move().is_none());
    ///
    /// let mv = Move::from_uci(&game, "e2e4").unwrap();
    /// game.make_move(mv);
    /// assert_eq!(game.undo_move(), Some(mv));
    /// assert_eq!(game, Game::default());
    /// ```
    pub fn undo_move(&mut self) -> Option<Move> {
        let Some(mv) = self.history.pop() else {
            debug!("Undo: no moves to take back");
            return None;
        };

        self.board[mv.from()] = mv.piece();
        self.board[mv.to()] = mv.captured();

        if let Some(king) = mv.piece().filter(Piece::is_king) {
            self.king_squares[king.color().index()] = mv.from();
        }

        self.toggle_side_to_move();

        debug!("Undo: {}", mv.to_notation());
        Some(mv)
    }

    /// Toggles the current player from White to Black (or vice versa).
    #[inline(always)]
    fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Computes the checks and pins against the side-to-move's King.
    #[inline(always)]
    pub fn check_info(&self) -> CheckInfo {
        let color = self.side_to_move();
        compute_check_info(&self.board, self.king_square(color), color)
    }

    /// Returns `true` if the side-to-move is currently in check.
    #[inline(always)]
    pub fn is_in_check(&self) -> bool {
        self.check_info().is_in_check()
    }

    /// Returns `true` if the side-to-move is in check and has no legal moves.
    ///
    /// A player with no legal moves who is not in check is *not* reported here; draws are not detected.
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.get_valid_moves().is_empty()
    }

    /// Generate all legal moves from the current position.
    ///
    /// - Not in check: every pin-respecting move of every piece.
    /// - In check from one piece: King moves, plus moves that capture the checker or block its ray.
    /// - In check from two or more pieces: King moves only.
    pub fn get_valid_moves(&self) -> MoveList {
        let info = self.check_info();
        let color = self.side_to_move();
        let king_square = self.king_square(color);

        let moves = match info.checks().as_slice() {
            [] => self.generate_all_moves(&info),

            [check] => {
                let mut moves = self.generate_all_moves(&info);

                // A Knight's check cannot be blocked; it must be captured
                let mut blocking_squares = ArrayVec::<Square, { BOARD_SIZE as usize }>::new();
                match check.ray {
                    None => blocking_squares.push(check.square),
                    Some(ray) => {
                        for square in king_square.ray(ray) {
                            blocking_squares.push(square);
                            if square == check.square {
                                break;
                            }
                        }
                    }
                }

                moves.retain(|mv| mv.is_king_move() || blocking_squares.contains(&mv.to()));
                moves
            }

            // If we're in double check, we can only move the King
            _ => {
                let mut moves = MoveList::default();
                self.generate_king_moves(king_square, &mut moves);
                moves
            }
        };

        trace!(
            "{color} to move: {} check(s), {} pin(s), {} valid move(s)",
            info.checks().len(),
            info.pins().len(),
            moves.len()
        );

        moves
    }

    /// Generate all legal moves that start on `square`.
    ///
    /// # Example
    /// ```
    /// # use pie_chess::*;
    /// let game = Game::default();
    /// let knight_moves = game.get_valid_moves_from(Square::from_uci("b1").unwrap());
    /// let destinations: Vec<_> = knight_moves.iter().map(|mv| mv.to().to_uci()).collect();
    /// assert_eq!(destinations, ["a3", "c3"]);
    /// ```
    pub fn get_valid_moves_from(&self, square: Square) -> MoveList {
        self.get_valid_moves()
            .into_iter()
            .filter(|mv| mv.from() == square)
            .collect()
    }

    /// Generate all pseudo-legal moves from the current position, ignoring checks.
    ///
    /// Pins are still respected, and King moves never walk into check.
    pub fn get_all_possible_moves(&self) -> MoveList {
        self.generate_all_moves(&self.check_info())
    }

    /// Scans the board and generates the moves of every piece belonging to the side-to-move.
    fn generate_all_moves(&self, info: &CheckInfo) -> MoveList {
        let color = self.side_to_move();
        let mut moves = MoveList::default();

        for (square, piece) in self.board.iter() {
            if piece.is(color) {
                self.generate_moves_for(piece, square, info.pins(), &mut moves);
            }
        }

        moves
    }
}

/// Rejects material that no game can reach: every piece beyond the starting set must be a promoted Pawn.
fn validate_material(board: &Board, color: Color) -> Result<()> {
    let mut counts = [0usize; PieceKind::COUNT];
    for (_, piece) in board.iter().filter(|(_, piece)| piece.is(color)) {
        counts[piece.kind().index()] += 1;
    }

    let pawns = counts[PieceKind::Pawn.index()];
    let promoted: usize = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ]
    .iter()
    .map(|kind| counts[kind.index()].saturating_sub(kind.starting_count()))
    .sum();

    if pawns + promoted > PieceKind::Pawn.starting_count() {
        bail!(
            "Invalid FEN string: {color} has {pawns} Pawn(s) and {promoted} promoted piece(s), more than 8 combined"
        );
    }

    Ok(())
}

impl Deref for Game {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.check_info();
        let squares = |squares: &mut dyn Iterator<Item = Square>| {
            squares.map(|s| s.to_uci()).collect::<Vec<_>>().join(" ")
        };

        writeln!(f, "{}\n", self.board)?;
        writeln!(f, "         FEN: {}", self.to_fen())?;
        writeln!(f, "        Side: {}", self.side_to_move())?;
        writeln!(
            f,
            "       Kings: {} {}",
            self.king_square(Color::White),
            self.king_square(Color::Black)
        )?;
        writeln!(
            f,
            "    Checkers: {}",
            squares(&mut info.checks().iter().map(|check| check.square))
        )?;
        writeln!(
            f,
            "      Pinned: {}",
            squares(&mut info.pins().iter().map(|pin| pin.square))
        )?;
        write!(
            f,
            "     History: {}",
            self.history
                .iter()
                .map(Move::to_uci)
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}
