// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The full state of a game in progress: the board, whose turn it is, the
//! castling rights, the en passant target, the clocks, and the attack index
//! kept in lockstep with all of them.

use std::fmt;

use crate::attacks::{self, AttackMap};
use crate::board::Board;
use crate::castling::{self, CastlingRights, SIDES};
use crate::fen::{self, FenParseError};
use crate::geometry;
use crate::movegen::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Rank, Square, TableIndex, COLORS, FILES};

/// A position description that has not yet been validated. `GameState::new`
/// is the only way to turn one into a playable position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setup {
    pub squares: [Option<Piece>; 64],
    pub turn: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for Setup {
    /// The standard starting position.
    fn default() -> Setup {
        static BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut squares = [None; 64];
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            squares[Square::of(Rank::One, file).as_index()] =
                Some(Piece::new(kind, Color::White));
            squares[Square::of(Rank::Two, file).as_index()] =
                Some(Piece::new(PieceKind::Pawn, Color::White));
            squares[Square::of(Rank::Seven, file).as_index()] =
                Some(Piece::new(PieceKind::Pawn, Color::Black));
            squares[Square::of(Rank::Eight, file).as_index()] =
                Some(Piece::new(kind, Color::Black));
        }
        Setup {
            squares,
            turn: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    MissingKing(Color),
    TooManyKings(Color),
    PawnOnBackRank(Square),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetupError::MissingKing(color) => write!(f, "no {:?} king on the board", color),
            SetupError::TooManyKings(color) => {
                write!(f, "more than one {:?} king on the board", color)
            }
            SetupError::PawnOnBackRank(sq) => write!(f, "pawn on back rank square {}", sq),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FenError {
    Parse(FenParseError),
    Position(SetupError),
}

impl From<FenParseError> for FenError {
    fn from(err: FenParseError) -> FenError {
        FenError::Parse(err)
    }
}

impl From<SetupError> for FenError {
    fn from(err: SetupError) -> FenError {
        FenError::Position(err)
    }
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenError::Parse(err) => write!(f, "invalid FEN: {:?}", err),
            FenError::Position(err) => write!(f, "illegal position: {}", err),
        }
    }
}

#[derive(Clone)]
pub struct GameState {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    attacks: AttackMap,
}

impl GameState {
    /// Validates a setup and builds the position, computing the attack index
    /// for it.
    pub fn new(setup: Setup) -> Result<GameState, SetupError> {
        for &color in &COLORS {
            let king = Piece::new(PieceKind::King, color);
            let count = setup.squares.iter().filter(|&&p| p == Some(king)).count();
            if count == 0 {
                return Err(SetupError::MissingKing(color));
            }
            if count > 1 {
                return Err(SetupError::TooManyKings(color));
            }
        }
        for &file in &FILES {
            for &rank in &[Rank::One, Rank::Eight] {
                let sq = Square::of(rank, file);
                if let Some(piece) = setup.squares[sq.as_index()] {
                    if piece.kind == PieceKind::Pawn {
                        return Err(SetupError::PawnOnBackRank(sq));
                    }
                }
            }
        }

        let board = Board::from_squares(setup.squares);
        let attacks = AttackMap::new(&board);
        debug!("new game state, {} to move", setup.turn);
        Ok(GameState {
            board,
            turn: setup.turn,
            castling: setup.castling,
            en_passant: setup.en_passant,
            halfmove_clock: setup.halfmove_clock,
            fullmove_number: setup.fullmove_number,
            attacks,
        })
    }

    /// A new game from the standard starting position.
    pub fn new_game() -> GameState {
        GameState::new(Setup::default()).expect("the starting position is a valid setup")
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<GameState, FenError> {
        let setup = fen::parse(fen)?;
        Ok(GameState::new(setup)?)
    }

    pub fn to_fen(&self) -> String {
        fen::encode(self)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.turn
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn attack_map(&self) -> &AttackMap {
        &self.attacks
    }

    pub fn is_check(&self, color: Color) -> bool {
        let king_sq = self.board.king_square(color);
        self.attacks.attacked(king_sq, color.toggle())
    }

    pub fn legal_moves(&self) -> MoveVec {
        MoveGenerator::new().legal_moves(self)
    }

    /// Plays a move. The move must have come from `legal_moves` on this
    /// position; playing anything else leaves the state corrupt.
    pub fn apply_move(&mut self, mov: Move) {
        debug_assert_eq!(mov.piece.color, self.turn);
        trace!("applying move {}", mov);
        let mover = self.turn;

        self.board.remove(mov.from);
        let landed = Piece::new(mov.promotion.unwrap_or(mov.piece.kind), mover);
        self.board.put(mov.to, landed);

        if let Some(side) = mov.castle {
            let rook = self
                .board
                .remove(castling::rook_home(mover, side))
                .expect("castling with no rook on its home square");
            self.board.put(castling::rook_destination(mover, side), rook);
        }
        if mov.en_passant {
            self.board.remove(attacks::en_passant_victim(mov));
        }

        if mov.is_capture() || mov.piece.kind == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.en_passant = if mov.is_double_pawn_push() {
            mov.from.offset_by(geometry::forward(mover))
        } else {
            None
        };

        if mov.piece.kind == PieceKind::King {
            self.castling.remove_both(mover);
        }
        if mov.piece.kind == PieceKind::Rook {
            for &side in &SIDES {
                if mov.from == castling::rook_home(mover, side) {
                    self.castling.remove(mover, side);
                }
            }
        }
        if mov.capture == Some(PieceKind::Rook) {
            let enemy = mover.toggle();
            for &side in &SIDES {
                if mov.to == castling::rook_home(enemy, side) {
                    self.castling.remove(enemy, side);
                }
            }
        }

        if mover == Color::Black {
            self.fullmove_number += 1;
        }
        self.turn = mover.toggle();
        self.attacks.apply_move(&self.board, mov);
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", self.turn)
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GameState({})", self.to_fen())
    }
}
