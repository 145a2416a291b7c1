// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Castling rights and the fixed geometry of the castle move. Rights only
//! ever shrink over the course of a game; there is deliberately no way to
//! grant a right back once it is gone.

use crate::types::{Color, File, Rank, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Kingside,
    Queenside,
}

pub static SIDES: [Side; 2] = [Side::Kingside, Side::Queenside];

bitflags! {
    struct Rights: u8 {
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE = 0b0000_0010;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    rights: Rights,
}

impl CastlingRights {
    pub fn all() -> CastlingRights {
        CastlingRights {
            rights: Rights::all(),
        }
    }

    pub fn none() -> CastlingRights {
        CastlingRights {
            rights: Rights::empty(),
        }
    }

    pub fn get(&self, color: Color, side: Side) -> bool {
        self.rights.contains(CastlingRights::flag(color, side))
    }

    pub fn remove(&mut self, color: Color, side: Side) {
        self.rights.remove(CastlingRights::flag(color, side));
    }

    pub fn remove_both(&mut self, color: Color) {
        self.remove(color, Side::Kingside);
        self.remove(color, Side::Queenside);
    }

    /// Adds a right. Only for position setup; rights never return during play.
    pub(crate) fn grant(&mut self, color: Color, side: Side) {
        self.rights.insert(CastlingRights::flag(color, side));
    }

    fn flag(color: Color, side: Side) -> Rights {
        match (color, side) {
            (Color::White, Side::Kingside) => Rights::WHITE_KINGSIDE,
            (Color::White, Side::Queenside) => Rights::WHITE_QUEENSIDE,
            (Color::Black, Side::Kingside) => Rights::BLACK_KINGSIDE,
            (Color::Black, Side::Queenside) => Rights::BLACK_QUEENSIDE,
        }
    }
}

pub fn home_rank(color: Color) -> Rank {
    match color {
        Color::White => Rank::One,
        Color::Black => Rank::Eight,
    }
}

pub fn king_home(color: Color) -> Square {
    Square::of(home_rank(color), File::E)
}

pub fn rook_home(color: Color, side: Side) -> Square {
    let file = match side {
        Side::Kingside => File::H,
        Side::Queenside => File::A,
    };
    Square::of(home_rank(color), file)
}

/// Where the king lands when castling.
pub fn king_destination(color: Color, side: Side) -> Square {
    let file = match side {
        Side::Kingside => File::G,
        Side::Queenside => File::C,
    };
    Square::of(home_rank(color), file)
}

/// Where the rook lands when castling. This is also the square the king
/// passes through on its way.
pub fn rook_destination(color: Color, side: Side) -> Square {
    let file = match side {
        Side::Kingside => File::F,
        Side::Queenside => File::D,
    };
    Square::of(home_rank(color), file)
}

/// The files strictly between the king and the rook, which must all be empty
/// for the castle to be playable. Callers pair these with `home_rank`.
pub fn between_files(side: Side) -> &'static [File] {
    match side {
        Side::Kingside => &KINGSIDE_BETWEEN,
        Side::Queenside => &QUEENSIDE_BETWEEN,
    }
}

static KINGSIDE_BETWEEN: [File; 2] = [File::F, File::G];
static QUEENSIDE_BETWEEN: [File; 3] = [File::B, File::C, File::D];
