//! Board storage.

use omega_core::{Piece, Square};
use thiserror::Error;

/// Errors from board writes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid square: {0}")]
    InvalidSquare(Square),
}

/// Side length of the backing array: the 10×10 grid plus one slot of
/// padding on every edge, so the four wizard corners index uniformly.
const SPAN: usize = 12;

/// A total mapping from every valid [`Square`] to an optional [`Piece`].
///
/// The board owns no turn or rights state. `clone()` produces a fully
/// independent board, so speculative mutation never aliases the
/// original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; SPAN * SPAN],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Board {
            squares: [None; SPAN * SPAN],
        }
    }

    #[inline]
    fn slot(sq: Square) -> usize {
        debug_assert!(sq.is_valid());
        (sq.y() + 1) as usize * SPAN + (sq.x() + 1) as usize
    }

    /// Returns the piece on `sq`, or `None` if the square is empty or
    /// the coordinate is not a valid square.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if !sq.is_valid() {
            return None;
        }
        self.squares[Self::slot(sq)]
    }

    /// Places `piece` on `sq` (or clears it with `None`).
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Result<(), BoardError> {
        if !sq.is_valid() {
            return Err(BoardError::InvalidSquare(sq));
        }
        self.squares[Self::slot(sq)] = piece;
        Ok(())
    }

    /// Relocates whatever occupies `from` to `to`, overwriting any
    /// piece at `to` and clearing `from`. No legality checking; both
    /// squares must already be known valid.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.squares[Self::slot(from)].take();
        self.squares[Self::slot(to)] = piece;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omega_core::{Color, PieceKind};

    fn rook(color: Color) -> Piece {
        Piece::new(PieceKind::Rook, color)
    }

    #[test]
    fn get_invalid_square_is_empty() {
        let board = Board::new();
        assert_eq!(board.get(Square::new(-1, 0)), None);
        assert_eq!(board.get(Square::new(10, 3)), None);
        assert_eq!(board.get(Square::new(-2, -2)), None);
    }

    #[test]
    fn set_invalid_square_fails() {
        let mut board = Board::new();
        let off = Square::new(10, 0);
        assert_eq!(
            board.set(off, Some(rook(Color::White))),
            Err(BoardError::InvalidSquare(off))
        );
    }

    #[test]
    fn set_and_get_wizard_square() {
        let mut board = Board::new();
        board.set(Square::W3, Some(rook(Color::Black))).unwrap();
        assert_eq!(board.get(Square::W3), Some(rook(Color::Black)));
        assert_eq!(board.get(Square::W1), None);
    }

    #[test]
    fn move_piece_relocates_and_overwrites() {
        let mut board = Board::new();
        let a0 = Square::new(0, 0);
        let a5 = Square::new(0, 5);
        board.set(a0, Some(rook(Color::White))).unwrap();
        board.set(a5, Some(rook(Color::Black))).unwrap();

        board.move_piece(a0, a5);
        assert_eq!(board.get(a0), None);
        assert_eq!(board.get(a5), Some(rook(Color::White)));
    }

    #[test]
    fn clone_is_independent() {
        let mut board = Board::new();
        let e4 = Square::new(4, 4);
        board.set(e4, Some(rook(Color::White))).unwrap();

        let mut copy = board.clone();
        copy.set(e4, None).unwrap();
        assert_eq!(board.get(e4), Some(rook(Color::White)));
        assert_eq!(copy.get(e4), None);
    }
}
