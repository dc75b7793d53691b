//! Pseudo-legal move generation and attack detection.
//!
//! Each piece kind is a fixed table of offsets or a ray cast; the
//! legality filter in [`Game`](crate::Game) removes moves that would
//! leave the mover's own king attacked.

use crate::{Board, Game};
use omega_core::{Color, Move, Piece, PieceKind, Square};

/// The eight knight leaps.
const KNIGHT_LEAPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// Champion leaps: unit orthogonal steps, two-square orthogonal jumps,
/// and two-square diagonal jumps.
const CHAMPION_LEAPS: [(i8, i8); 12] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (2, 0),
    (-2, 0),
    (0, 2),
    (0, -2),
    (2, 2),
    (2, -2),
    (-2, 2),
    (-2, -2),
];

/// Wizard leaps: unit diagonals plus the long (1,3)-pattern jumps.
/// Destinations are additionally parity-filtered.
const WIZARD_LEAPS: [(i8, i8); 12] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 3),
    (3, 1),
    (-1, 3),
    (-3, 1),
    (1, -3),
    (3, -1),
    (-1, -3),
    (-3, -1),
];

const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Original rook square on the kingside wing (file i).
pub(crate) const fn kingside_rook_square(color: Color) -> Square {
    Square::new(8, color.back_rank())
}

/// Original rook square on the queenside wing (file b).
pub(crate) const fn queenside_rook_square(color: Color) -> Square {
    Square::new(1, color.back_rank())
}

/// Generates the pseudo-legal moves of the piece on `from`, if any.
pub(crate) fn pseudo_moves_from(game: &Game, from: Square) -> Vec<Move> {
    let Some(piece) = game.board.get(from) else {
        return Vec::new();
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(game, from, piece.color),
        PieceKind::Knight => leaper_moves(&game.board, from, piece.color, &KNIGHT_LEAPS),
        PieceKind::Champion => leaper_moves(&game.board, from, piece.color, &CHAMPION_LEAPS),
        PieceKind::Wizard => wizard_moves(&game.board, from, piece.color),
        PieceKind::Bishop => ray_moves(&game.board, from, piece.color, &DIAGONAL_DIRS),
        PieceKind::Rook => ray_moves(&game.board, from, piece.color, &ORTHOGONAL_DIRS),
        PieceKind::Queen => ray_moves(&game.board, from, piece.color, &ALL_DIRS),
        PieceKind::King => king_moves(game, from, piece.color),
    }
}

fn pawn_moves(game: &Game, from: Square, color: Color) -> Vec<Move> {
    let board = &game.board;
    let mut moves = Vec::new();
    let dir = color.pawn_direction();

    let forward = from.offset(0, dir);
    if forward.is_valid() && board.get(forward).is_none() {
        moves.push(pawn_advance(from, forward, color));

        // From the home rank the pawn may advance two or even three
        // squares, provided every square on the way is empty.
        if from.y() == color.home_rank() {
            let double = from.offset(0, 2 * dir);
            if double.is_valid() && board.get(double).is_none() {
                moves.push(Move::Normal { from, to: double });

                let triple = from.offset(0, 3 * dir);
                if triple.is_valid() && board.get(triple).is_none() {
                    moves.push(Move::Normal { from, to: triple });
                }
            }
        }
    }

    for dx in [-1, 1] {
        let diag = from.offset(dx, dir);
        if !diag.is_valid() {
            continue;
        }
        match board.get(diag) {
            Some(target) if target.color != color => {
                moves.push(pawn_advance(from, diag, color));
            }
            Some(_) => {}
            None => {
                // The diagonal is empty, but capturing onto it is
                // allowed if it is one of the squares the last
                // multi-square advance skipped; the captured pawn sits
                // on its landing square.
                if let Some(window) = &game.en_passant {
                    if window.skipped.contains(&diag) {
                        moves.push(Move::EnPassant {
                            from,
                            to: diag,
                            captured: window.pawn,
                        });
                    }
                }
            }
        }
    }

    moves
}

fn pawn_advance(from: Square, to: Square, color: Color) -> Move {
    if to.y() == color.promotion_rank() {
        Move::Promotion { from, to }
    } else {
        Move::Normal { from, to }
    }
}

fn leaper_moves(board: &Board, from: Square, color: Color, leaps: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dx, dy) in leaps {
        let to = from.offset(dx, dy);
        if !to.is_valid() {
            continue;
        }
        match board.get(to) {
            Some(occupant) if occupant.color == color => {}
            _ => moves.push(Move::Normal { from, to }),
        }
    }
    moves
}

fn wizard_moves(board: &Board, from: Square, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dx, dy) in &WIZARD_LEAPS {
        let to = from.offset(dx, dy);
        if !to.is_valid() {
            continue;
        }
        // Wizards are color-bound: only destinations on the same
        // checkerboard parity as the current square.
        if to.parity() != from.parity() {
            continue;
        }
        match board.get(to) {
            Some(occupant) if occupant.color == color => {}
            _ => moves.push(Move::Normal { from, to }),
        }
    }
    moves
}

fn ray_moves(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dx, dy) in dirs {
        let mut to = from.offset(dx, dy);
        while to.is_valid() {
            match board.get(to) {
                None => moves.push(Move::Normal { from, to }),
                Some(occupant) => {
                    if occupant.color != color {
                        moves.push(Move::Normal { from, to });
                    }
                    break;
                }
            }
            to = to.offset(dx, dy);
        }
    }
    moves
}

fn king_moves(game: &Game, from: Square, color: Color) -> Vec<Move> {
    let mut moves = leaper_moves(&game.board, from, color, &ALL_DIRS);
    moves.extend(castling_moves(game, from, color));
    moves
}

/// Castling candidates. The king moves two squares toward the rook and
/// the rook lands on the square the king crossed. Kingside: king f→h,
/// rook i→g. Queenside: king f→d, rook b→e, with the c-file square
/// also required empty.
fn castling_moves(game: &Game, from: Square, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let back = color.back_rank();
    let king_home = Square::new(5, back);

    if from != king_home || is_in_check(&game.board, color) {
        return moves;
    }
    let enemy = color.opposite();

    if game.castling.can_castle_kingside(color) {
        let g = Square::new(6, back);
        let h = Square::new(7, back);
        let rook = kingside_rook_square(color);
        if game.board.get(g).is_none()
            && game.board.get(h).is_none()
            && !is_square_attacked(&game.board, g, enemy)
            && !is_square_attacked(&game.board, h, enemy)
            && is_own_rook(&game.board, rook, color)
        {
            moves.push(Move::Castling {
                king_from: from,
                king_to: h,
                rook_from: rook,
                rook_to: g,
            });
        }
    }

    if game.castling.can_castle_queenside(color) {
        let e = Square::new(4, back);
        let d = Square::new(3, back);
        let c = Square::new(2, back);
        let rook = queenside_rook_square(color);
        if game.board.get(e).is_none()
            && game.board.get(d).is_none()
            && game.board.get(c).is_none()
            && !is_square_attacked(&game.board, e, enemy)
            && !is_square_attacked(&game.board, d, enemy)
            && is_own_rook(&game.board, rook, color)
        {
            moves.push(Move::Castling {
                king_from: from,
                king_to: d,
                rook_from: rook,
                rook_to: e,
            });
        }
    }

    moves
}

fn is_own_rook(board: &Board, sq: Square, color: Color) -> bool {
    board.get(sq) == Some(Piece::new(PieceKind::Rook, color))
}

/// Returns true if `by` holds a piece whose attack set covers `target`.
pub(crate) fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    Square::ALL.iter().any(|&from| match board.get(from) {
        Some(piece) if piece.color == by => {
            attack_squares(board, from, piece).contains(&target)
        }
        _ => false,
    })
}

/// The squares a piece threatens, which for pawns, kings, and sliders
/// differs from where it may move: a pawn threatens both forward
/// diagonals even when empty, a king threatens all eight neighbors
/// regardless of occupant, and a slider's rays include the first
/// blocking square of either color. The leapers reuse their move
/// destinations.
fn attack_squares(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            [(-1, dir), (1, dir)]
                .iter()
                .map(|&(dx, dy)| from.offset(dx, dy))
                .filter(|sq| sq.is_valid())
                .collect()
        }
        PieceKind::King => ALL_DIRS
            .iter()
            .map(|&(dx, dy)| from.offset(dx, dy))
            .filter(|sq| sq.is_valid())
            .collect(),
        PieceKind::Bishop => ray_attacks(board, from, &DIAGONAL_DIRS),
        PieceKind::Rook => ray_attacks(board, from, &ORTHOGONAL_DIRS),
        PieceKind::Queen => ray_attacks(board, from, &ALL_DIRS),
        PieceKind::Knight => leaper_moves(board, from, piece.color, &KNIGHT_LEAPS)
            .into_iter()
            .map(Move::to)
            .collect(),
        PieceKind::Champion => leaper_moves(board, from, piece.color, &CHAMPION_LEAPS)
            .into_iter()
            .map(Move::to)
            .collect(),
        PieceKind::Wizard => wizard_moves(board, from, piece.color)
            .into_iter()
            .map(Move::to)
            .collect(),
    }
}

fn ray_attacks(board: &Board, from: Square, dirs: &[(i8, i8)]) -> Vec<Square> {
    let mut squares = Vec::new();
    for &(dx, dy) in dirs {
        let mut sq = from.offset(dx, dy);
        while sq.is_valid() {
            squares.push(sq);
            if board.get(sq).is_some() {
                break;
            }
            sq = sq.offset(dx, dy);
        }
    }
    squares
}

/// Locates the king of `color`, if present.
pub(crate) fn find_king(board: &Board, color: Color) -> Option<Square> {
    Square::ALL
        .iter()
        .copied()
        .find(|&sq| board.get(sq) == Some(Piece::new(PieceKind::King, color)))
}

/// Returns true if the king of `color` is attacked. A position with no
/// king is treated as not in check.
pub(crate) fn is_in_check(board: &Board, color: Color) -> bool {
    match find_king(board, color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}
