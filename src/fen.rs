// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Forsyth-Edwards Notation. Parsing yields an unvalidated `Setup`; whether
//! the described position is actually playable is `GameState::new`'s call,
//! not ours.

use std::convert::TryFrom;
use std::fmt::Write;

use crate::castling::{CastlingRights, Side};
use crate::state::{GameState, Setup};
use crate::types::{Color, File, Piece, Rank, Square, TableIndex, FILES, RANKS};

pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

pub fn parse<S: AsRef<str>>(fen: S) -> Result<Setup, FenParseError> {
    use std::iter::Peekable;
    use std::str::Chars;

    type Stream<'a> = Peekable<Chars<'a>>;

    fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), FenParseError> {
        match iter.next() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(FenParseError::UnexpectedChar(c)),
            None => Err(FenParseError::UnexpectedEnd),
        }
    }

    fn advance(iter: &mut Stream<'_>) -> Result<(), FenParseError> {
        let _ = iter.next();
        Ok(())
    }

    fn peek(iter: &mut Stream<'_>) -> Result<char, FenParseError> {
        if let Some(c) = iter.peek() {
            Ok(*c)
        } else {
            Err(FenParseError::UnexpectedEnd)
        }
    }

    fn eat_side_to_move(iter: &mut Stream<'_>) -> Result<Color, FenParseError> {
        let side = match peek(iter)? {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return Err(FenParseError::InvalidSideToMove),
        };

        advance(iter)?;
        Ok(side)
    }

    fn eat_castling(iter: &mut Stream<'_>) -> Result<CastlingRights, FenParseError> {
        if peek(iter)? == '-' {
            advance(iter)?;
            return Ok(CastlingRights::none());
        }

        let mut rights = CastlingRights::none();
        for _ in 0..4 {
            match peek(iter)? {
                'K' => rights.grant(Color::White, Side::Kingside),
                'Q' => rights.grant(Color::White, Side::Queenside),
                'k' => rights.grant(Color::Black, Side::Kingside),
                'q' => rights.grant(Color::Black, Side::Queenside),
                ' ' => break,
                _ => return Err(FenParseError::InvalidCastle),
            }

            advance(iter)?;
        }

        Ok(rights)
    }

    fn eat_en_passant(iter: &mut Stream<'_>) -> Result<Option<Square>, FenParseError> {
        let c = peek(iter)?;
        if c == '-' {
            advance(iter)?;
            return Ok(None);
        }

        if let Ok(file) = File::try_from(c) {
            advance(iter)?;
            let rank_c = peek(iter)?;
            if let Ok(rank) = Rank::try_from(rank_c) {
                advance(iter)?;
                Ok(Some(Square::of(rank, file)))
            } else {
                Err(FenParseError::InvalidEnPassant)
            }
        } else {
            Err(FenParseError::InvalidEnPassant)
        }
    }

    fn eat_halfmove(iter: &mut Stream<'_>) -> Result<u32, FenParseError> {
        let mut buf = String::new();
        loop {
            let c = peek(iter)?;
            if !c.is_digit(10) {
                break;
            }

            buf.push(c);
            advance(iter)?;
        }

        if buf.is_empty() {
            return Err(FenParseError::EmptyHalfmove);
        }

        buf.parse::<u32>().map_err(|_| FenParseError::InvalidHalfmove)
    }

    fn eat_fullmove(iter: &mut Stream<'_>) -> Result<u32, FenParseError> {
        let mut buf = String::new();
        for ch in iter {
            if !ch.is_digit(10) {
                if buf.is_empty() {
                    return Err(FenParseError::EmptyFullmove);
                }

                break;
            }

            buf.push(ch);
        }

        if buf.is_empty() {
            return Err(FenParseError::EmptyFullmove);
        }

        buf.parse::<u32>().map_err(|_| FenParseError::InvalidFullmove)
    }

    let mut squares = [None; 64];
    let str_ref = fen.as_ref();
    let iter = &mut str_ref.chars().peekable();
    for &rank in RANKS.iter().rev() {
        let mut file = File::A as usize;
        while file <= File::H as usize {
            let c = peek(iter)?;
            // digits 1 through 8 indicate empty squares.
            if c.is_digit(10) {
                if c < '1' || c > '8' {
                    return Err(FenParseError::InvalidDigit);
                }

                let value = c as usize - 48;
                file += value;
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                advance(iter)?;
                continue;
            }

            // if it's not a digit, it represents a piece.
            let piece = if let Ok(piece) = Piece::try_from(c) {
                piece
            } else {
                return Err(FenParseError::UnknownPiece);
            };

            let square = Square::of(rank, File::from_index(file));
            squares[square.as_index()] = Some(piece);
            advance(iter)?;
            file += 1;
        }

        if rank != Rank::One {
            eat(iter, '/')?;
        }
    }

    eat(iter, ' ')?;
    let turn = eat_side_to_move(iter)?;
    eat(iter, ' ')?;
    let castling = eat_castling(iter)?;
    eat(iter, ' ')?;
    let en_passant = eat_en_passant(iter)?;
    eat(iter, ' ')?;
    let halfmove_clock = eat_halfmove(iter)?;
    eat(iter, ' ')?;
    let fullmove_number = eat_fullmove(iter)?;
    Ok(Setup {
        squares,
        turn,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

pub fn encode(state: &GameState) -> String {
    let mut buf = String::new();
    for &rank in RANKS.iter().rev() {
        let mut empty_squares = 0;
        for &file in &FILES {
            let square = Square::of(rank, file);
            if let Some(piece) = state.board().get(square) {
                if empty_squares != 0 {
                    write!(&mut buf, "{}", empty_squares).unwrap();
                }
                write!(&mut buf, "{}", piece).unwrap();
                empty_squares = 0;
            } else {
                empty_squares += 1;
            }
        }

        if empty_squares != 0 {
            write!(&mut buf, "{}", empty_squares).unwrap();
        }

        if rank != Rank::One {
            buf.push('/');
        }
    }

    buf.push(' ');
    match state.side_to_move() {
        Color::White => buf.push('w'),
        Color::Black => buf.push('b'),
    }
    buf.push(' ');
    let castling = state.castling();
    let mut any_rights = false;
    if castling.get(Color::White, Side::Kingside) {
        buf.push('K');
        any_rights = true;
    }
    if castling.get(Color::White, Side::Queenside) {
        buf.push('Q');
        any_rights = true;
    }
    if castling.get(Color::Black, Side::Kingside) {
        buf.push('k');
        any_rights = true;
    }
    if castling.get(Color::Black, Side::Queenside) {
        buf.push('q');
        any_rights = true;
    }
    if !any_rights {
        buf.push('-');
    }
    buf.push(' ');
    if let Some(ep_square) = state.en_passant_square() {
        write!(&mut buf, "{}", ep_square).unwrap();
    } else {
        buf.push('-');
    }
    buf.push(' ');
    write!(
        &mut buf,
        "{} {}",
        state.halfmove_clock(),
        state.fullmove_number()
    )
    .unwrap();
    buf
}

#[cfg(test)]
mod tests {
    use super::{parse, FenParseError, START_POSITION};
    use crate::state::{GameState, Setup};
    use crate::types::{Color, Piece, PieceKind, Square, TableIndex};

    #[test]
    fn start_position_parses_to_default_setup() {
        assert_eq!(parse(START_POSITION).unwrap(), Setup::default());
    }

    #[test]
    fn fen_round_trips() {
        let fens = [
            START_POSITION,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 b - - 13 37",
        ];
        for &fen in &fens {
            let state = GameState::from_fen(fen).unwrap();
            assert_eq!(state.to_fen(), fen);
        }
    }

    #[test]
    fn parses_pieces_and_fields() {
        let setup = parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(
            setup.squares[Square::E4.as_index()],
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(setup.squares[Square::E2.as_index()], None);
        assert_eq!(setup.turn, Color::Black);
        assert_eq!(setup.en_passant, Some(Square::E3));
    }

    #[test]
    fn empty_string_is_unexpected_end() {
        assert_eq!(parse("").unwrap_err(), FenParseError::UnexpectedEnd);
    }

    #[test]
    fn unknown_piece() {
        assert_eq!(parse("z7/8/8/8/8/8/8/8 w - - 0 1").unwrap_err(), FenParseError::UnknownPiece);
    }

    #[test]
    fn invalid_digit() {
        assert_eq!(parse("9/8/8/8/8/8/8/8 w - - 0 1").unwrap_err(), FenParseError::InvalidDigit);
    }

    #[test]
    fn file_sum_overflow() {
        assert_eq!(
            parse("54/8/8/8/8/8/8/8 w - - 0 1").unwrap_err(),
            FenParseError::FileDoesNotSumToEight
        );
    }

    #[test]
    fn invalid_side_to_move() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 c - - 0 1").unwrap_err(),
            FenParseError::InvalidSideToMove
        );
    }

    #[test]
    fn invalid_castle() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w x - 0 1").unwrap_err(),
            FenParseError::InvalidCastle
        );
    }

    #[test]
    fn invalid_en_passant() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w KQkq x 0 1").unwrap_err(),
            FenParseError::InvalidEnPassant
        );
    }

    #[test]
    fn empty_halfmove() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w KQkq - x 1").unwrap_err(),
            FenParseError::EmptyHalfmove
        );
    }

    #[test]
    fn empty_fullmove() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w KQkq - 0 ").unwrap_err(),
            FenParseError::EmptyFullmove
        );
    }
}
