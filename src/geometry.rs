// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board geometry: file/rank displacement vectors and the per-piece movement
//! tables built from them. White moves toward higher ranks, so a positive
//! `rank` component means "forward" for White and "backward" for Black.

use std::ops;

use crate::types::{Color, PieceKind};

/// A displacement on the board, measured in files and ranks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub file: i8,
    pub rank: i8,
}

impl Offset {
    pub const fn new(file: i8, rank: i8) -> Offset {
        Offset { file, rank }
    }

    /// True if this offset moves along a rank or a file.
    pub fn is_lateral(self) -> bool {
        (self.file == 0) != (self.rank == 0)
    }

    /// True if this offset moves along a diagonal.
    pub fn is_diagonal(self) -> bool {
        self.file != 0 && self.file.abs() == self.rank.abs()
    }

    /// Reduces a lateral or diagonal offset to a single step in the same
    /// direction. Offsets that lie along no ray have no direction.
    pub fn normalize(self) -> Option<Offset> {
        if !self.is_lateral() && !self.is_diagonal() {
            return None;
        }
        let length = self.file.abs().max(self.rank.abs());
        Some(Offset::new(self.file / length, self.rank / length))
    }
}

impl ops::Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.file, -self.rank)
    }
}

impl ops::Mul<i8> for Offset {
    type Output = Offset;

    fn mul(self, rhs: i8) -> Offset {
        Offset::new(self.file * rhs, self.rank * rhs)
    }
}

pub static KNIGHT_JUMPS: [Offset; 8] = [
    Offset::new(1, 2),
    Offset::new(2, 1),
    Offset::new(2, -1),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(-1, 2),
];

pub static BISHOP_RAYS: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, -1),
    Offset::new(-1, 1),
];

pub static ROOK_RAYS: [Offset; 4] = [
    Offset::new(0, 1),
    Offset::new(1, 0),
    Offset::new(0, -1),
    Offset::new(-1, 0),
];

/// The eight single-step directions, shared by queens and kings.
pub static ROYAL_RAYS: [Offset; 8] = [
    Offset::new(0, 1),
    Offset::new(1, 1),
    Offset::new(1, 0),
    Offset::new(1, -1),
    Offset::new(0, -1),
    Offset::new(-1, -1),
    Offset::new(-1, 0),
    Offset::new(-1, 1),
];

/// One rank toward the opponent.
pub fn forward(color: Color) -> Offset {
    match color {
        Color::White => Offset::new(0, 1),
        Color::Black => Offset::new(0, -1),
    }
}

/// One rank away from the opponent.
pub fn backward(color: Color) -> Offset {
    -forward(color)
}

/// The two diagonal steps a pawn of the given color attacks along.
pub fn pawn_captures(color: Color) -> [Offset; 2] {
    let rank = forward(color).rank;
    [Offset::new(-1, rank), Offset::new(1, rank)]
}

/// The rays a sliding piece moves along, or `None` for non-sliders.
pub fn slider_rays(kind: PieceKind) -> Option<&'static [Offset]> {
    match kind {
        PieceKind::Bishop => Some(&BISHOP_RAYS),
        PieceKind::Rook => Some(&ROOK_RAYS),
        PieceKind::Queen => Some(&ROYAL_RAYS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lateral_and_diagonal_are_exclusive() {
        assert!(Offset::new(0, 3).is_lateral());
        assert!(!Offset::new(0, 3).is_diagonal());
        assert!(Offset::new(-2, -2).is_diagonal());
        assert!(!Offset::new(-2, -2).is_lateral());
        assert!(!Offset::new(1, 2).is_lateral());
        assert!(!Offset::new(1, 2).is_diagonal());
    }

    #[test]
    fn normalize_reduces_to_unit_step() {
        assert_eq!(Offset::new(0, 5).normalize(), Some(Offset::new(0, 1)));
        assert_eq!(Offset::new(-4, 0).normalize(), Some(Offset::new(-1, 0)));
        assert_eq!(Offset::new(3, -3).normalize(), Some(Offset::new(1, -1)));
    }

    #[test]
    fn normalize_rejects_knight_offsets() {
        assert_eq!(Offset::new(1, 2).normalize(), None);
        assert_eq!(Offset::new(-2, 1).normalize(), None);
        assert_eq!(Offset::new(4, 2).normalize(), None);
    }

    #[test]
    fn pawn_captures_point_forward() {
        assert_eq!(
            pawn_captures(Color::White),
            [Offset::new(-1, 1), Offset::new(1, 1)]
        );
        assert_eq!(
            pawn_captures(Color::Black),
            [Offset::new(-1, -1), Offset::new(1, -1)]
        );
    }
}
