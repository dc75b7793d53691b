//! Move representation.
//!
//! A move records every square it touches. Moves are produced only by
//! the engine's move generation; callers never construct them ad hoc.

use crate::Square;
use std::fmt;

/// One of the four move shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// A relocation, with or without capture at the destination.
    Normal { from: Square, to: Square },
    /// A pawn reaching its promotion rank. The replacement piece is
    /// always a queen.
    Promotion { from: Square, to: Square },
    /// An en-passant capture: the pawn lands on a skipped square and
    /// the captured pawn is removed from `captured`.
    EnPassant {
        from: Square,
        to: Square,
        captured: Square,
    },
    /// Castling relocates both king and rook.
    Castling {
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
}

impl Move {
    /// Returns the source square (the king's, for castling).
    #[inline]
    pub const fn from(self) -> Square {
        match self {
            Move::Normal { from, .. }
            | Move::Promotion { from, .. }
            | Move::EnPassant { from, .. } => from,
            Move::Castling { king_from, .. } => king_from,
        }
    }

    /// Returns the destination square (the king's, for castling).
    #[inline]
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. }
            | Move::Promotion { to, .. }
            | Move::EnPassant { to, .. } => to,
            Move::Castling { king_to, .. } => king_to,
        }
    }
}

impl fmt::Display for Move {
    /// Formats as the four-character source+destination text, e.g. "e1e4".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let e1 = Square::new(4, 1);
        let e4 = Square::new(4, 4);
        let m = Move::Normal { from: e1, to: e4 };
        assert_eq!(m.from(), e1);
        assert_eq!(m.to(), e4);

        let castle = Move::Castling {
            king_from: Square::new(5, 0),
            king_to: Square::new(7, 0),
            rook_from: Square::new(8, 0),
            rook_to: Square::new(6, 0),
        };
        assert_eq!(castle.from(), Square::new(5, 0));
        assert_eq!(castle.to(), Square::new(7, 0));
    }

    #[test]
    fn display_is_square_pair() {
        let m = Move::Normal {
            from: Square::new(4, 1),
            to: Square::new(4, 4),
        };
        assert_eq!(m.to_string(), "e1e4");

        let ep = Move::EnPassant {
            from: Square::new(3, 4),
            to: Square::new(4, 3),
            captured: Square::new(4, 4),
        };
        assert_eq!(ep.to_string(), "d4e3");
    }
}
