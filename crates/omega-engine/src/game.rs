//! Game state and the rule engine.

use crate::movegen::{
    self, kingside_rook_square, pseudo_moves_from, queenside_rook_square,
};
use crate::{render, setup, Board};
use omega_core::{Color, Move, Piece, PieceKind, Square};

/// The four independent castling-rights flags.
///
/// Each flag only ever transitions from set to cleared; nothing
/// restores a right once it is revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Returns true if the given side may still castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side may still castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Revokes both rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Revokes the kingside right for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Revokes the queenside right for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }
}

/// Record of the most recent qualifying multi-square pawn advance.
///
/// Armed only by a 2- or 3-square straight advance from the home rank
/// and cleared at the start of every applied move, so the capture it
/// enables is available for exactly one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnPassantWindow {
    /// Landing square of the pawn that just advanced.
    pub pawn: Square,
    /// The one or two squares it skipped, in stepping order.
    pub skipped: Vec<Square>,
}

/// The rule engine: a board plus side to move, castling rights, and
/// the en-passant window.
///
/// A game is created once via [`Game::new`] and mutated exclusively
/// through [`Game::try_move`]. Legality checks run on disposable
/// clones that are discarded afterwards, so `Clone` here is the deep
/// copy the legality filter relies on.
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<EnPassantWindow>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game with the fixed starting array.
    pub fn new() -> Self {
        Game {
            board: setup::starting_board(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the castling rights.
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the en-passant window, if armed.
    pub fn en_passant(&self) -> Option<&EnPassantWindow> {
        self.en_passant.as_ref()
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        movegen::is_in_check(&self.board, color)
    }

    /// Returns the legal moves of the piece on `from`.
    ///
    /// Empty if the square is empty or holds a piece that does not
    /// belong to the side to move. Each pseudo-legal candidate is
    /// applied to a disposable clone and kept only if the mover's own
    /// king is not attacked afterwards.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        match self.board.get(from) {
            Some(piece) if piece.color == self.side_to_move => {}
            _ => return Vec::new(),
        }

        pseudo_moves_from(self, from)
            .into_iter()
            .filter(|&m| self.keeps_own_king_safe(m))
            .collect()
    }

    /// Returns every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        Square::ALL
            .iter()
            .flat_map(|&sq| self.legal_moves_from(sq))
            .collect()
    }

    /// Returns true if the side to move has at least one legal move.
    ///
    /// The engine encodes no terminal state; callers interpret a
    /// `false` here as mate or stalemate themselves.
    pub fn has_legal_move(&self) -> bool {
        Square::ALL
            .iter()
            .any(|&sq| !self.legal_moves_from(sq).is_empty())
    }

    /// Parses a four-character move text ("e1e4", internal spaces
    /// ignored, case-insensitive), matches it against the legal moves
    /// of the source square by destination, and applies it.
    ///
    /// Returns false for unparseable or illegal submissions; rejecting
    /// input is expected traffic, not an error.
    pub fn try_move(&mut self, text: &str) -> bool {
        let Some(m) = self.find_legal_move(text) else {
            return false;
        };
        self.apply_move(m);
        self.side_to_move = self.side_to_move.opposite();
        true
    }

    /// Returns the textual board rendering.
    pub fn to_ascii(&self) -> String {
        render::ascii_board(&self.board)
    }

    fn find_legal_move(&self, text: &str) -> Option<Move> {
        let cleaned: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.len() != 4 {
            return None;
        }
        let from = Square::from_algebraic(&cleaned[0..2].iter().collect::<String>()).ok()?;
        let to = Square::from_algebraic(&cleaned[2..4].iter().collect::<String>()).ok()?;
        self.legal_moves_from(from).into_iter().find(|m| m.to() == to)
    }

    fn keeps_own_king_safe(&self, m: Move) -> bool {
        let mut probe = self.clone();
        probe.apply_move(m);
        !probe.is_in_check(self.side_to_move)
    }

    /// Applies a generated move to the board and derived state.
    ///
    /// Shared by the committed path and the legality probe; only the
    /// committed path additionally flips the side to move.
    fn apply_move(&mut self, m: Move) {
        let moving = self.board.get(m.from());

        self.en_passant = None;
        self.update_castling_rights(m);

        match m {
            Move::Castling {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => {
                self.board.move_piece(king_from, king_to);
                self.board.move_piece(rook_from, rook_to);
            }
            Move::EnPassant { from, to, captured } => {
                self.board.move_piece(from, to);
                self.board
                    .set(captured, None)
                    .expect("generated moves reference valid squares");
            }
            Move::Promotion { from, to } => {
                self.board.move_piece(from, to);
                if let Some(pawn) = moving {
                    self.board
                        .set(to, Some(Piece::new(PieceKind::Queen, pawn.color)))
                        .expect("generated moves reference valid squares");
                }
            }
            Move::Normal { from, to } => self.board.move_piece(from, to),
        }

        if let Some(piece) = moving {
            if piece.kind == PieceKind::Pawn {
                self.rearm_en_passant(piece.color, m.from(), m.to());
            }
        }
    }

    /// A straight 2- or 3-square advance from the home rank re-arms
    /// the window with the squares it skipped.
    fn rearm_en_passant(&mut self, color: Color, from: Square, to: Square) {
        let steps = (to.y() - from.y()).abs();
        if from.x() != to.x() || from.y() != color.home_rank() || !(steps == 2 || steps == 3) {
            return;
        }
        let dir = color.pawn_direction();
        let skipped = (1..steps).map(|i| from.offset(0, dir * i)).collect();
        self.en_passant = Some(EnPassantWindow { pawn: to, skipped });
    }

    /// Castling-rights bookkeeping, done by inspecting the occupants
    /// of the move's squares before the board mutates: a king move
    /// revokes both wings, a rook move from its original square
    /// revokes that wing, and a rook captured on its original square
    /// revokes that wing for the rook's owner.
    fn update_castling_rights(&mut self, m: Move) {
        let moving = self.board.get(m.from());
        let captured = self.board.get(m.to());

        if let Some(piece) = moving {
            match piece.kind {
                PieceKind::King => self.castling.remove_color(piece.color),
                PieceKind::Rook => {
                    if m.from() == queenside_rook_square(piece.color) {
                        self.castling.remove_queenside(piece.color);
                    }
                    if m.from() == kingside_rook_square(piece.color) {
                        self.castling.remove_kingside(piece.color);
                    }
                }
                _ => {}
            }
        }

        if let Some(piece) = captured {
            if piece.kind == PieceKind::Rook {
                if m.to() == queenside_rook_square(piece.color) {
                    self.castling.remove_queenside(piece.color);
                }
                if m.to() == kingside_rook_square(piece.color) {
                    self.castling.remove_kingside(piece.color);
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// An empty board with all rights set and White to move, for
    /// hand-built positions.
    pub(crate) fn bare_game() -> Game {
        Game {
            board: Board::new(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    pub(crate) fn put(game: &mut Game, sq: &str, kind: PieceKind, color: Color) {
        game.board
            .set(
                Square::from_algebraic(sq).unwrap(),
                Some(Piece::new(kind, color)),
            )
            .unwrap();
    }

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).unwrap()
    }

    fn castling_position() -> Game {
        let mut game = bare_game();
        put(&mut game, "f0", PieceKind::King, Color::White);
        put(&mut game, "i0", PieceKind::Rook, Color::White);
        put(&mut game, "b0", PieceKind::Rook, Color::White);
        put(&mut game, "f9", PieceKind::King, Color::Black);
        game
    }

    fn kingside_castle(game: &Game) -> Option<Move> {
        game.legal_moves_from(sq("f0"))
            .into_iter()
            .find(|m| matches!(m, Move::Castling { king_to, .. } if *king_to == sq("h0")))
    }

    fn queenside_castle(game: &Game) -> Option<Move> {
        game.legal_moves_from(sq("f0"))
            .into_iter()
            .find(|m| matches!(m, Move::Castling { king_to, .. } if *king_to == sq("d0")))
    }

    #[test]
    fn kingside_castling_relocates_king_and_rook() {
        let mut game = castling_position();
        let castle = kingside_castle(&game).expect("castling should be offered");
        assert_eq!(
            castle,
            Move::Castling {
                king_from: sq("f0"),
                king_to: sq("h0"),
                rook_from: sq("i0"),
                rook_to: sq("g0"),
            }
        );

        assert!(game.try_move("f0h0"));
        assert_eq!(
            game.board.get(sq("h0")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            game.board.get(sq("g0")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(game.board.get(sq("f0")), None);
        assert_eq!(game.board.get(sq("i0")), None);
        assert!(!game.castling.can_castle_kingside(Color::White));
        assert!(!game.castling.can_castle_queenside(Color::White));
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn queenside_castling_relocates_king_and_rook() {
        let mut game = castling_position();
        assert!(queenside_castle(&game).is_some());

        assert!(game.try_move("f0d0"));
        assert_eq!(
            game.board.get(sq("d0")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            game.board.get(sq("e0")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(game.board.get(sq("b0")), None);
    }

    #[test]
    fn castling_rejected_while_in_check() {
        let mut game = castling_position();
        put(&mut game, "f5", PieceKind::Rook, Color::Black);
        assert!(game.is_in_check(Color::White));
        assert!(kingside_castle(&game).is_none());
        assert!(queenside_castle(&game).is_none());
    }

    #[test]
    fn castling_rejected_when_crossed_square_attacked() {
        let mut game = castling_position();
        put(&mut game, "g5", PieceKind::Rook, Color::Black);
        assert!(kingside_castle(&game).is_none());

        let mut game = castling_position();
        put(&mut game, "h5", PieceKind::Rook, Color::Black);
        assert!(kingside_castle(&game).is_none());

        let mut game = castling_position();
        put(&mut game, "d5", PieceKind::Rook, Color::Black);
        assert!(queenside_castle(&game).is_none());
    }

    #[test]
    fn queenside_castling_ignores_attack_on_c_file() {
        // c0 must be empty but is not one of the squares the king
        // crosses, so an attack on it does not bar castling.
        let mut game = castling_position();
        put(&mut game, "c5", PieceKind::Rook, Color::Black);
        assert!(queenside_castle(&game).is_some());
    }

    #[test]
    fn castling_rejected_when_blocked() {
        let mut game = castling_position();
        put(&mut game, "g0", PieceKind::Knight, Color::White);
        assert!(kingside_castle(&game).is_none());

        let mut game = castling_position();
        put(&mut game, "c0", PieceKind::Knight, Color::White);
        assert!(queenside_castle(&game).is_none());
    }

    #[test]
    fn castling_rejected_without_rook() {
        let mut game = castling_position();
        game.board.set(sq("i0"), None).unwrap();
        assert!(kingside_castle(&game).is_none());

        // A non-rook piece on the rook square does not qualify either.
        let mut game = castling_position();
        put(&mut game, "i0", PieceKind::Champion, Color::White);
        assert!(kingside_castle(&game).is_none());
    }

    #[test]
    fn king_move_revokes_both_rights() {
        let mut game = castling_position();
        assert!(game.try_move("f0g0"));
        assert!(game.try_move("f9e9"));
        assert!(game.try_move("g0f0"));
        assert!(game.try_move("e9f9"));
        // The position is back to the start, but the rights are gone.
        assert!(!game.castling.can_castle_kingside(Color::White));
        assert!(!game.castling.can_castle_queenside(Color::White));
        assert!(kingside_castle(&game).is_none());
    }

    #[test]
    fn rook_move_revokes_one_wing() {
        let mut game = castling_position();
        assert!(game.try_move("i0i5"));
        assert!(!game.castling.can_castle_kingside(Color::White));
        assert!(game.castling.can_castle_queenside(Color::White));
    }

    #[test]
    fn rook_capture_revokes_owners_right() {
        let mut game = castling_position();
        put(&mut game, "i5", PieceKind::Rook, Color::Black);
        game.side_to_move = Color::Black;

        assert!(game.try_move("i5i0"));
        assert!(!game.castling.can_castle_kingside(Color::White));
        assert!(game.castling.can_castle_queenside(Color::White));
    }

    #[test]
    fn promotion_always_yields_a_queen() {
        let mut game = bare_game();
        put(&mut game, "f0", PieceKind::King, Color::White);
        put(&mut game, "f9", PieceKind::King, Color::Black);
        put(&mut game, "b8", PieceKind::Pawn, Color::White);
        put(&mut game, "c9", PieceKind::Knight, Color::Black);

        let moves = game.legal_moves_from(sq("b8"));
        assert!(moves
            .iter()
            .all(|m| matches!(m, Move::Promotion { .. })));

        // Capture-promotion onto c9 also yields a queen.
        assert!(game.try_move("b8c9"));
        assert_eq!(
            game.board.get(sq("c9")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn pinned_piece_has_no_legal_moves() {
        let mut game = bare_game();
        put(&mut game, "f0", PieceKind::King, Color::White);
        put(&mut game, "f2", PieceKind::Bishop, Color::White);
        put(&mut game, "f7", PieceKind::Rook, Color::Black);
        put(&mut game, "a9", PieceKind::King, Color::Black);

        // The bishop has pseudo-legal moves but every one of them
        // exposes the king on the f-file.
        assert!(game.legal_moves_from(sq("f2")).is_empty());
    }

    #[test]
    fn moves_of_the_wrong_side_are_empty() {
        let game = Game::new();
        assert!(game.legal_moves_from(sq("e8")).is_empty());
        assert!(game.legal_moves_from(sq("w3")).is_empty());
    }

    #[test]
    fn try_move_rejects_malformed_text() {
        let mut game = Game::new();
        assert!(!game.try_move(""));
        assert!(!game.try_move("e1"));
        assert!(!game.try_move("e1e4x"));
        assert!(!game.try_move("zz99"));
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn try_move_accepts_spaces_and_case() {
        let mut game = Game::new();
        assert!(game.try_move("E1 E4"));
        assert_eq!(
            game.board.get(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn try_move_rejects_illegal_destination() {
        let mut game = Game::new();
        assert!(!game.try_move("e1e5"));
        assert!(!game.try_move("e1d2"));
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let game = Game::new();
        let mut copy = game.clone();
        assert!(copy.try_move("e1e4"));

        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(
            game.board.get(sq("e1")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(game.board.get(sq("e4")), None);
        assert!(game.en_passant.is_none());
        assert!(copy.en_passant.is_some());
    }

    #[test]
    fn triple_advance_arms_window_with_both_skipped_squares() {
        let mut game = Game::new();
        assert!(game.try_move("e1e4"));

        let window = game.en_passant.as_ref().expect("window should be armed");
        assert_eq!(window.pawn, sq("e4"));
        assert_eq!(window.skipped, vec![sq("e2"), sq("e3")]);
    }

    #[test]
    fn double_advance_arms_window_with_one_skipped_square() {
        let mut game = Game::new();
        assert!(game.try_move("e1e3"));

        let window = game.en_passant.as_ref().expect("window should be armed");
        assert_eq!(window.pawn, sq("e3"));
        assert_eq!(window.skipped, vec![sq("e2")]);
    }

    #[test]
    fn single_advance_does_not_arm_window() {
        let mut game = Game::new();
        assert!(game.try_move("e1e2"));
        assert!(game.en_passant.is_none());
    }
}
