// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The board proper: sixty-four slots, each empty or holding a piece. The
//! board knows nothing about whose turn it is or what moves are legal; it
//! only answers questions about occupancy and lines of sight.

use std::fmt;

use arrayvec::ArrayVec;

use crate::geometry::Offset;
use crate::types::{Color, Piece, PieceKind, Square, TableIndex, FILES, RANKS, SQUARES};

/// The squares a ray crosses, in walk order. A ray from a corner touches at
/// most seven squares.
pub type Path = ArrayVec<Square, 8>;

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    pub fn from_squares(squares: [Option<Piece>; 64]) -> Board {
        Board { squares }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// Places a piece on a square, returning whatever stood there before.
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square.as_index()].replace(piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()].take()
    }

    /// The square the given color's king stands on. Panics if the board has
    /// no such king; boards reachable through `GameState` always have one.
    pub fn king_square(&self, color: Color) -> Square {
        let king = Piece::new(PieceKind::King, color);
        for &square in &SQUARES {
            if self.get(square) == Some(king) {
                return square;
            }
        }
        panic!("board has no {:?} king", color);
    }

    /// Walks from `from` one step at a time along `direction`, collecting
    /// empty squares. The walk stops at the board edge or at the first
    /// occupied square, which is included only if `include_blocker` is set.
    pub fn get_path(&self, from: Square, direction: Offset, include_blocker: bool) -> Path {
        let mut path = Path::new();
        let mut cursor = from;
        while let Some(next) = cursor.offset_by(direction) {
            if self.get(next).is_some() {
                if include_blocker {
                    path.push(next);
                }
                break;
            }
            path.push(next);
            cursor = next;
        }
        path
    }

    /// Iterates over every occupied square and the piece standing on it, in
    /// ascending square order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        SQUARES
            .iter()
            .filter_map(move |&square| self.get(square).map(|piece| (square, piece)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                match self.get(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f, "| {}", rank)?;
        }
        for _ in &FILES {
            write!(f, "---")?;
        }
        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }
        writeln!(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
