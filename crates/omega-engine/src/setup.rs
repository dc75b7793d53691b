//! Initial position.

use crate::Board;
use omega_core::{Color, Piece, PieceKind, Square};

/// Back-rank layout for files a-j.
const BACK_RANK: [PieceKind; 10] = [
    PieceKind::Champion,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Champion,
];

fn place(board: &mut Board, sq: Square, kind: PieceKind, color: Color) {
    board
        .set(sq, Some(Piece::new(kind, color)))
        .expect("starting squares are valid");
}

/// Builds the starting array: champions and the classical back rank on
/// ranks 0/9, pawns on ranks 1/8, wizards on the four off-grid corners.
pub(crate) fn starting_board() -> Board {
    let mut board = Board::new();

    for (x, &kind) in BACK_RANK.iter().enumerate() {
        let x = x as i8;
        place(&mut board, Square::new(x, 0), kind, Color::White);
        place(&mut board, Square::new(x, 9), kind, Color::Black);
        place(&mut board, Square::new(x, 1), PieceKind::Pawn, Color::White);
        place(&mut board, Square::new(x, 8), PieceKind::Pawn, Color::Black);
    }

    place(&mut board, Square::W1, PieceKind::Wizard, Color::White);
    place(&mut board, Square::W2, PieceKind::Wizard, Color::White);
    place(&mut board, Square::W3, PieceKind::Wizard, Color::Black);
    place(&mut board, Square::W4, PieceKind::Wizard, Color::Black);

    board
}
