// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move representation. A move records the piece that moves, where it goes,
//! and any special effect it carries: a capture, a castle, a promotion, or an
//! en passant capture.
//!
//! Two moves are the same move when they agree on piece, origin, destination,
//! and promotion. Promoting to a knight and promoting to a queen from the
//! same square are four distinct moves; equality, ordering, and hashing all
//! observe that distinction.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::castling::{self, Side};
use crate::types::{Color, Piece, PieceKind, Square};

#[derive(Copy, Clone, Debug)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub capture: Option<PieceKind>,
    pub castle: Option<Side>,
    pub promotion: Option<PieceKind>,
    pub en_passant: bool,
}

impl Move {
    pub fn quiet(piece: Piece, from: Square, to: Square) -> Move {
        Move {
            piece,
            from,
            to,
            capture: None,
            castle: None,
            promotion: None,
            en_passant: false,
        }
    }

    pub fn capture(piece: Piece, from: Square, to: Square, captured: PieceKind) -> Move {
        Move {
            capture: Some(captured),
            ..Move::quiet(piece, from, to)
        }
    }

    /// An en passant capture. The captured pawn is not on `to`; it sits one
    /// rank behind it.
    pub fn en_passant(color: Color, from: Square, to: Square) -> Move {
        Move {
            capture: Some(PieceKind::Pawn),
            en_passant: true,
            ..Move::quiet(Piece::new(PieceKind::Pawn, color), from, to)
        }
    }

    pub fn castle(color: Color, side: Side) -> Move {
        Move {
            castle: Some(side),
            ..Move::quiet(
                Piece::new(PieceKind::King, color),
                castling::king_home(color),
                castling::king_destination(color, side),
            )
        }
    }

    pub fn promotion(color: Color, from: Square, to: Square, promoted: PieceKind) -> Move {
        Move {
            promotion: Some(promoted),
            ..Move::quiet(Piece::new(PieceKind::Pawn, color), from, to)
        }
    }

    pub fn promotion_capture(
        color: Color,
        from: Square,
        to: Square,
        captured: PieceKind,
        promoted: PieceKind,
    ) -> Move {
        Move {
            capture: Some(captured),
            promotion: Some(promoted),
            ..Move::quiet(Piece::new(PieceKind::Pawn, color), from, to)
        }
    }

    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && self.from.file() == self.to.file()
            && (self.from.rank() as i8 - self.to.rank() as i8).abs() == 2
    }

    fn identity(&self) -> (Piece, Square, Square, Option<PieceKind>) {
        (self.piece, self.from, self.to, self.promotion)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Move {}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Move) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Move {
    fn cmp(&self, other: &Move) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promoted) = self.promotion {
            write!(f, "{}", promoted)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::castling::Side;
    use crate::types::{Color, Piece, PieceKind, Square};

    #[test]
    fn promotion_variants_are_distinct() {
        let knight = Move::promotion(Color::White, Square::E7, Square::E8, PieceKind::Knight);
        let queen = Move::promotion(Color::White, Square::E7, Square::E8, PieceKind::Queen);
        assert_ne!(knight, queen);
        assert!(knight < queen);
    }

    #[test]
    fn capture_flag_does_not_affect_identity() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let quiet = Move::quiet(pawn, Square::E4, Square::D5);
        let capture = Move::capture(pawn, Square::E4, Square::D5, PieceKind::Knight);
        assert_eq!(quiet, capture);
    }

    #[test]
    fn castle_squares() {
        let short = Move::castle(Color::White, Side::Kingside);
        assert_eq!(short.from, Square::E1);
        assert_eq!(short.to, Square::G1);
        let long = Move::castle(Color::Black, Side::Queenside);
        assert_eq!(long.from, Square::E8);
        assert_eq!(long.to, Square::C8);
    }

    #[test]
    fn double_push_detection() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        assert!(Move::quiet(pawn, Square::E2, Square::E4).is_double_pawn_push());
        assert!(!Move::quiet(pawn, Square::E2, Square::E3).is_double_pawn_push());
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert!(!Move::quiet(knight, Square::B1, Square::B3).is_double_pawn_push());
    }

    #[test]
    fn display_appends_promotion() {
        assert_eq!(
            Move::quiet(
                Piece::new(PieceKind::Pawn, Color::White),
                Square::E2,
                Square::E4
            )
            .to_string(),
            "e2e4"
        );
        assert_eq!(
            Move::promotion(Color::Black, Square::A2, Square::A1, PieceKind::Rook).to_string(),
            "a2a1r"
        );
    }
}
