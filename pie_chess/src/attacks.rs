/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use super::{Board, Color, Direction, PieceKind, Square};

/// A friendly piece that cannot leave the line between its King and an enemy slider.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pin {
    /// Where the pinned piece stands.
    pub square: Square,

    /// Direction from the King towards the pinned piece. The piece may move along this line, either way.
    pub direction: Direction,
}

/// An enemy piece giving check to the King.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Check {
    /// Where the checking piece stands.
    pub square: Square,

    /// Direction from the King towards the checker.
    ///
    /// `None` for a Knight, whose check travels along no ray and cannot be blocked.
    pub ray: Option<Direction>,
}

/// An immutable lookup of every pinned piece and the axis it is pinned along.
///
/// A King has eight rays, so there can be at most eight pins.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Pins(ArrayVec<Pin, 8>);

impl Pins {
    /// Fetches the pin axis of the piece at `square`, if it is pinned.
    #[inline(always)]
    pub fn direction_for(&self, square: Square) -> Option<Direction> {
        self.0
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }

    /// Returns `true` if the piece at `square` is pinned.
    #[inline(always)]
    pub fn contains(&self, square: Square) -> bool {
        self.direction_for(square).is_some()
    }

    /// Number of pinned pieces.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is pinned.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all pins.
    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.0.iter()
    }
}

/// A list of checks. Eight rays plus eight Knight jumps bound its length.
pub type CheckList = ArrayVec<Check, 16>;

/// The check and pin picture for one King, computed on demand and never stored across moves.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct CheckInfo {
    pins: Pins,
    checks: CheckList,
}

impl CheckInfo {
    /// Returns `true` if at least one enemy piece attacks the King.
    #[inline(always)]
    pub fn is_in_check(&self) -> bool {
        !self.checks.is_empty()
    }

    /// Returns `true` if more than one enemy piece attacks the King, so only the King may move.
    #[inline(always)]
    pub fn is_in_double_check(&self) -> bool {
        self.checks.len() > 1
    }

    /// Fetches the pins against the King.
    #[inline(always)]
    pub const fn pins(&self) -> &Pins {
        &self.pins
    }

    /// Fetches the checks against the King.
    #[inline(always)]
    pub const fn checks(&self) -> &CheckList {
        &self.checks
    }
}

/// Returns `true` if an enemy `kind` met at `distance` along `direction` from a `color` King attacks it.
fn attacks_along_ray(kind: PieceKind, direction: Direction, distance: usize, color: Color) -> bool {
    match kind {
        PieceKind::Rook => direction.is_orthogonal(),
        PieceKind::Bishop => direction.is_diagonal(),
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // Enemy pawns capture towards us, so they attack from one step ahead of the King on a diagonal
        PieceKind::Pawn => {
            distance == 1 && direction.is_diagonal() && direction.dr() == color.forward().dr()
        }
        PieceKind::Knight => false,
    }
}

/// Computes the checks and pins against the `color` King standing on `king_square`.
///
/// Each of the eight rays leaving the King is walked outward. The first friendly piece becomes a pin
/// candidate; a second friendly piece closes the ray. The first enemy piece either attacks along this
/// ray (a check, or a pin if a candidate is pending) or closes the ray. Friendly Kings are skipped,
/// so a King can be tested on a square it does not occupy. Knights are tested separately.
///
/// # Example
/// ```
/// # use pie_chess::*;
/// let board = Board::from_fen("4r3/8/8/8/8/8/4B3/4K3").unwrap();
/// let info = compute_check_info(&board, Square::new(7, 4), Color::White);
/// assert!(!info.is_in_check());
/// assert_eq!(info.pins().direction_for(Square::new(6, 4)), Some(Direction::NORTH));
/// ```
pub fn compute_check_info(board: &Board, king_square: Square, color: Color) -> CheckInfo {
    let mut info = CheckInfo::default();

    for direction in Direction::ALL {
        let mut pin_candidate = None;

        for (distance, square) in king_square.ray(direction).enumerate() {
            let Some(piece) = board.piece_at(square) else {
                continue;
            };

            if piece.is(color) {
                if piece.is_king() {
                    continue;
                }

                if pin_candidate.is_some() {
                    // Two friendly pieces in a row; nothing on this ray can be pinned
                    break;
                }
                pin_candidate = Some(square);
                continue;
            }

            if attacks_along_ray(piece.kind(), direction, distance + 1, color) {
                match pin_candidate {
                    None => info.checks.push(Check {
                        square,
                        ray: Some(direction),
                    }),
                    Some(pinned) => info.pins.0.push(Pin {
                        square: pinned,
                        direction,
                    }),
                }
            }

            // The first enemy piece always closes the ray
            break;
        }
    }

    for jump in Direction::KNIGHT_JUMPS {
        let Some(square) = king_square.offset(jump) else {
            continue;
        };

        if board
            .piece_at(square)
            .is_some_and(|piece| piece.is(color.opponent()) && piece.is_knight())
        {
            info.checks.push(Check { square, ray: None });
        }
    }

    info
}

/// Returns `true` if the `color` King on `from` would not be in check after stepping to `to`.
///
/// The step is simulated on a copy of `board`; the caller's board is untouched.
///
/// # Example
/// ```
/// # use pie_chess::*;
/// let board = Board::from_fen("4r3/8/8/8/8/8/8/4K3").unwrap();
/// let e1 = Square::new(7, 4);
/// assert!(!king_is_safe_after(&board, e1, Square::new(6, 4), Color::White));
/// assert!(king_is_safe_after(&board, e1, Square::new(6, 3), Color::White));
/// ```
pub fn king_is_safe_after(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let mut simulated = *board;
    if let Some(king) = simulated.take(from) {
        simulated.place(king, to);
    }

    !compute_check_info(&simulated, to, color).is_in_check()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(uci: &str) -> Square {
        Square::from_uci(uci).unwrap()
    }

    fn info_for(fen: &str, color: Color) -> CheckInfo {
        let board = Board::from_fen(fen).unwrap();
        let king = board.king_square(color).unwrap();
        compute_check_info(&board, king, color)
    }

    #[test]
    fn startpos_is_quiet() {
        for color in Color::all() {
            let info = info_for(crate::FEN_STARTPOS, color);
            assert!(!info.is_in_check());
            assert!(info.pins().is_empty());
        }
    }

    #[test]
    fn rook_check_along_file() {
        let info = info_for("4r3/8/8/8/8/8/8/4K3", Color::White);
        assert!(info.is_in_check());
        assert!(!info.is_in_double_check());
        assert_eq!(
            info.checks().as_slice(),
            &[Check {
                square: sq("e8"),
                ray: Some(Direction::NORTH)
            }]
        );
    }

    #[test]
    fn rook_does_not_attack_diagonally() {
        let info = info_for("8/8/8/8/8/2r5/8/4K3", Color::White);
        assert!(!info.is_in_check());
    }

    #[test]
    fn knight_check_has_no_ray() {
        let info = info_for("4k3/8/8/8/8/3n4/8/4K3", Color::White);
        assert_eq!(
            info.checks().as_slice(),
            &[Check {
                square: sq("d3"),
                ray: None
            }]
        );
    }

    #[test]
    fn pawns_only_check_forwards() {
        // A black pawn on d2 attacks e1, one on d1's rank beside the King does not
        let checked = info_for("4k3/8/8/8/8/8/3p4/4K3", Color::White);
        assert!(checked.is_in_check());

        let beside = info_for("4k3/8/8/8/8/8/8/3pK3", Color::White);
        assert!(!beside.is_in_check());

        // A white pawn on d4 has already passed a black King on e3
        let passed = info_for("8/8/8/8/3P4/4k3/8/K7", Color::Black);
        assert!(!passed.is_in_check());

        // White pawns capture towards row 0, so one on d2 attacks e3
        let white_attacker = info_for("8/8/8/8/8/4k3/3P4/K7", Color::Black);
        assert!(white_attacker.is_in_check());
    }

    #[test]
    fn distant_pawn_closes_the_ray() {
        let info = info_for("8/8/8/b7/8/2p5/8/4K3", Color::White);
        assert!(!info.is_in_check());
    }

    #[test]
    fn bishop_pin() {
        let info = info_for("7k/8/8/b7/8/8/3N4/4K3", Color::White);
        assert!(!info.is_in_check());
        assert_eq!(
            info.pins().direction_for(sq("d2")),
            Some(Direction::NORTH_WEST)
        );
        assert_eq!(info.pins().len(), 1);
    }

    #[test]
    fn two_friendly_pieces_break_the_pin() {
        let info = info_for("4r2k/8/8/8/4N3/8/4B3/4K3", Color::White);
        assert!(info.pins().is_empty());
        assert!(!info.is_in_check());
    }

    #[test]
    fn non_attacking_enemy_does_not_pin() {
        // A bishop on an orthogonal ray pins nothing
        let info = info_for("4b2k/8/8/8/8/8/4R3/4K3", Color::White);
        assert!(info.pins().is_empty());
    }

    #[test]
    fn double_check() {
        let info = info_for("4r2k/8/8/8/8/5n2/8/4K3", Color::White);
        assert!(info.is_in_check());
        assert!(info.is_in_double_check());
        assert_eq!(info.checks().len(), 2);
    }

    #[test]
    fn adjacent_king_gives_check() {
        let board = Board::from_fen("8/8/8/8/8/8/3k4/4K3").unwrap();
        let info = compute_check_info(&board, sq("e1"), Color::White);
        assert!(info.is_in_check());
    }

    #[test]
    fn king_cannot_retreat_along_the_checking_ray() {
        let board = Board::from_fen("8/8/8/8/4r3/8/4K3/8").unwrap();
        let e2 = sq("e2");
        assert!(!king_is_safe_after(&board, e2, sq("e1"), Color::White));
        assert!(king_is_safe_after(&board, e2, sq("d1"), Color::White));
        // Simulation leaves the original board untouched
        assert_eq!(board.king_square(Color::White), Some(e2));
    }

    #[test]
    fn king_can_capture_an_undefended_checker() {
        let board = Board::from_fen("7k/8/8/8/8/8/4r3/4K3").unwrap();
        assert!(king_is_safe_after(&board, sq("e1"), sq("e2"), Color::White));

        let defended = Board::from_fen("7k/8/8/8/4r3/8/4r3/4K3").unwrap();
        assert!(!king_is_safe_after(&defended, sq("e1"), sq("e2"), Color::White));
    }
}
