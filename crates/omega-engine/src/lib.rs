//! Rules engine for a 10×10 chess variant with four off-grid wizard
//! squares, Champion and Wizard pieces, multi-square first pawn moves,
//! and a widened en-passant window.
//!
//! This crate provides:
//! - [`Board`] - total mapping from valid squares to optional pieces
//! - [`Game`] - full rule state: board, side to move, castling rights,
//!   and the en-passant window
//! - Legal move generation and move application
//!
//! # Architecture
//!
//! The engine is the sole entry point for rule questions. Callers query
//! [`Game::legal_moves_from`] or submit [`Game::try_move`]; internally
//! this drives pseudo-legal generation, speculative application on a
//! cloned game, and attack-detection scans. The engine performs no I/O.
//!
//! # Example
//!
//! ```
//! use omega_core::Square;
//! use omega_engine::Game;
//!
//! let mut game = Game::new();
//! let hints = game.legal_moves_from(Square::from_algebraic("e1").unwrap());
//! assert_eq!(hints.len(), 3); // one-, two-, and three-square advances
//! assert!(game.try_move("e1e4"));
//! ```

mod board;
mod game;
mod movegen;
mod render;
mod setup;

pub use board::{Board, BoardError};
pub use game::{CastlingRights, EnPassantWindow, Game};
