// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules engine. It models the board, tracks the full state of a
//! game, maintains an incremental index of attacked squares, and generates
//! exactly the legal moves of any position.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod attacks;
mod board;
mod castling;
pub mod fen;
pub mod geometry;
mod movegen;
mod moves;
mod perft;
mod squareset;
mod state;
mod types;

pub use attacks::AttackMap;
pub use board::{Board, Path};
pub use castling::{CastlingRights, Side};
pub use geometry::Offset;
pub use movegen::{MoveGenerator, MoveVec};
pub use moves::Move;
pub use perft::perft;
pub use squareset::{SquareSet, SquareSetIter};
pub use state::{FenError, GameState, Setup, SetupError};
pub use types::{Color, File, Piece, PieceKind, Rank, Square};
