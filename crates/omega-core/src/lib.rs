//! Core types for the 10×10 wizard-squares chess variant.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`], [`PieceKind`], and [`Color`] for piece representation
//! - [`Square`] for board coordinates, including the four off-grid
//!   wizard squares
//! - [`Move`] for move representation

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{Square, SquareError};
