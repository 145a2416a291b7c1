// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Legal move generation. Candidate moves are generated per piece and then
//! filtered against check, pins, and the en passant discovered-check trap, so
//! every move that comes out of the generator can be played as-is.

use arrayvec::ArrayVec;

use crate::attacks;
use crate::board::Board;
use crate::castling::{self, Side, SIDES};
use crate::geometry;
use crate::moves::Move;
use crate::squareset::SquareSet;
use crate::state::GameState;
use crate::types::{Color, Piece, PieceKind, Rank, Square, PROMOTION_KINDS};

/// No legal position has more than 256 legal moves.
pub type MoveVec = ArrayVec<Move, 256>;

// Candidates for a single piece. A queen in an open center tops out at 27;
// a pawn one step from promotion at 12.
type CandidateVec = ArrayVec<Move, 32>;

pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    pub fn legal_moves(&self, state: &GameState) -> MoveVec {
        let mut moves = MoveVec::new();
        self.generate(state, &mut moves);
        moves
    }

    pub fn generate(&self, state: &GameState, moves: &mut MoveVec) {
        let color = state.side_to_move();
        let enemy = color.toggle();
        let board = state.board();
        let king_sq = board.king_square(color);
        let checkers = state.attack_map().attackers(king_sq, enemy);

        self.king_moves(state, king_sq, checkers, moves);

        // In double check only the king may move.
        if checkers.len() > 1 {
            return;
        }
        let check = checkers.first().map(|checker_sq| {
            (checker_sq, check_restriction(board, king_sq, checker_sq))
        });

        for (sq, piece) in board.occupied() {
            if piece.color != color || piece.kind == PieceKind::King {
                continue;
            }
            let pin = pin_line(board, king_sq, sq, color);
            let mut candidates = CandidateVec::new();
            self.piece_candidates(state, sq, piece, &mut candidates);
            for mov in candidates {
                if let Some((checker_sq, restriction)) = check {
                    if !resolves_check(mov, checker_sq, restriction) {
                        continue;
                    }
                }
                if let Some(line) = pin {
                    if !line.contains(mov.to) {
                        continue;
                    }
                }
                if mov.en_passant && en_passant_exposes_king(board, king_sq, mov) {
                    continue;
                }
                moves.push(mov);
            }
        }
    }

    fn king_moves(
        &self,
        state: &GameState,
        king_sq: Square,
        checkers: SquareSet,
        moves: &mut MoveVec,
    ) {
        let color = state.side_to_move();
        let enemy = color.toggle();
        let board = state.board();
        let king = Piece::new(PieceKind::King, color);

        // The attack map stops sliding rays at the king, so the square
        // directly behind him along a checking ray looks safe even though
        // stepping there keeps him in the checker's line.
        let mut shadow = SquareSet::none();
        for checker_sq in checkers {
            let checker = board
                .get(checker_sq)
                .expect("checking piece is not on the board");
            if !checker.is_sliding() {
                continue;
            }
            let ray = king_sq
                .offset_from(checker_sq)
                .normalize()
                .expect("sliding check is not along a ray");
            if let Some(prolongation) = king_sq.offset_by(ray) {
                shadow.insert(prolongation);
            }
        }

        for target in attacks::king_attacks(king_sq) {
            if state.attack_map().attacked(target, enemy) || shadow.contains(target) {
                continue;
            }
            match board.get(target) {
                Some(occupant) if occupant.color == color => continue,
                Some(occupant) => moves.push(Move::capture(king, king_sq, target, occupant.kind)),
                None => moves.push(Move::quiet(king, king_sq, target)),
            }
        }

        if !checkers.is_empty() {
            return;
        }
        for &side in &SIDES {
            if self.castle_is_legal(state, color, side) {
                moves.push(Move::castle(color, side));
            }
        }
    }

    fn castle_is_legal(&self, state: &GameState, color: Color, side: Side) -> bool {
        if !state.castling().get(color, side) {
            return false;
        }
        let board = state.board();
        let home = castling::home_rank(color);
        for &file in castling::between_files(side) {
            if board.get(Square::of(home, file)).is_some() {
                return false;
            }
        }
        // The king may not castle through or into an attacked square. The
        // square he passes through is the rook's destination.
        let enemy = color.toggle();
        let through = castling::rook_destination(color, side);
        let destination = castling::king_destination(color, side);
        !state.attack_map().attacked(through, enemy)
            && !state.attack_map().attacked(destination, enemy)
    }

    fn piece_candidates(
        &self,
        state: &GameState,
        sq: Square,
        piece: Piece,
        out: &mut CandidateVec,
    ) {
        match piece.kind {
            PieceKind::Pawn => self.pawn_candidates(state, sq, piece.color, out),
            PieceKind::Knight => {
                self.step_candidates(state.board(), sq, piece, attacks::knight_attacks(sq), out)
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                self.slider_candidates(state.board(), sq, piece, out)
            }
            PieceKind::King => unreachable!("king moves are generated separately"),
        }
    }

    fn step_candidates(
        &self,
        board: &Board,
        sq: Square,
        piece: Piece,
        targets: SquareSet,
        out: &mut CandidateVec,
    ) {
        for target in targets {
            match board.get(target) {
                Some(occupant) if occupant.color == piece.color => {}
                Some(occupant) => out.push(Move::capture(piece, sq, target, occupant.kind)),
                None => out.push(Move::quiet(piece, sq, target)),
            }
        }
    }

    fn slider_candidates(
        &self,
        board: &Board,
        sq: Square,
        piece: Piece,
        out: &mut CandidateVec,
    ) {
        let rays = geometry::slider_rays(piece.kind).unwrap();
        for &ray in rays {
            for target in board.get_path(sq, ray, true) {
                match board.get(target) {
                    Some(occupant) if occupant.color == piece.color => {}
                    Some(occupant) => out.push(Move::capture(piece, sq, target, occupant.kind)),
                    None => out.push(Move::quiet(piece, sq, target)),
                }
            }
        }
    }

    fn pawn_candidates(
        &self,
        state: &GameState,
        sq: Square,
        color: Color,
        out: &mut CandidateVec,
    ) {
        let board = state.board();
        let pawn = Piece::new(PieceKind::Pawn, color);
        let forward = geometry::forward(color);
        let (start_rank, promotion_rank) = match color {
            Color::White => (Rank::Two, Rank::Eight),
            Color::Black => (Rank::Seven, Rank::One),
        };

        if let Some(one) = sq.offset_by(forward) {
            if board.get(one).is_none() {
                if one.rank() == promotion_rank {
                    for &promoted in &PROMOTION_KINDS {
                        out.push(Move::promotion(color, sq, one, promoted));
                    }
                } else {
                    out.push(Move::quiet(pawn, sq, one));
                }
                if sq.rank() == start_rank {
                    let two = one
                        .offset_by(forward)
                        .expect("double push from the start rank stays on the board");
                    if board.get(two).is_none() {
                        out.push(Move::quiet(pawn, sq, two));
                    }
                }
            }
        }

        for target in attacks::pawn_attacks(sq, color) {
            match board.get(target) {
                Some(occupant) if occupant.color == color => {}
                Some(occupant) => {
                    if target.rank() == promotion_rank {
                        for &promoted in &PROMOTION_KINDS {
                            out.push(Move::promotion_capture(
                                color,
                                sq,
                                target,
                                occupant.kind,
                                promoted,
                            ));
                        }
                    } else {
                        out.push(Move::capture(pawn, sq, target, occupant.kind));
                    }
                }
                None => {
                    if Some(target) == state.en_passant_square() {
                        out.push(Move::en_passant(color, sq, target));
                    }
                }
            }
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> MoveGenerator {
        MoveGenerator::new()
    }
}

/// The destinations that answer a single check without moving the king:
/// the checker's square, plus the squares between checker and king when the
/// checker slides.
fn check_restriction(board: &Board, king_sq: Square, checker_sq: Square) -> SquareSet {
    let mut restriction = SquareSet::none();
    restriction.insert(checker_sq);
    let checker = board
        .get(checker_sq)
        .expect("checking piece is not on the board");
    if checker.is_sliding() {
        let ray = king_sq
            .offset_from(checker_sq)
            .normalize()
            .expect("sliding check is not along a ray");
        for sq in board.get_path(checker_sq, ray, false) {
            restriction.insert(sq);
        }
    }
    restriction
}

fn resolves_check(mov: Move, checker_sq: Square, restriction: SquareSet) -> bool {
    if restriction.contains(mov.to) {
        return true;
    }
    // An en passant capture lands beside the checker, not on it.
    mov.en_passant && attacks::en_passant_victim(mov) == checker_sq
}

/// If the piece on `sq` is the only thing standing between its king and an
/// enemy slider, returns the set of squares it may occupy without exposing
/// the king: the ray from king to pinner, inclusive of the pinner.
fn pin_line(board: &Board, king_sq: Square, sq: Square, color: Color) -> Option<SquareSet> {
    let ray = sq.offset_from(king_sq).normalize()?;
    let inner = board.get_path(king_sq, ray, true);
    if inner.last() != Some(&sq) {
        return None;
    }
    let outer = board.get_path(sq, ray, true);
    let &pinner_sq = outer.last()?;
    let pinner = board.get(pinner_sq)?;
    if pinner.color == color {
        return None;
    }
    let pins = match pinner.kind {
        PieceKind::Queen => true,
        PieceKind::Rook => ray.is_lateral(),
        PieceKind::Bishop => ray.is_diagonal(),
        _ => false,
    };
    if !pins {
        return None;
    }
    let mut line = SquareSet::none();
    for &s in &inner {
        line.insert(s);
    }
    for &s in &outer {
        line.insert(s);
    }
    Some(line)
}

/// Detects the one discovered check a pin scan cannot see: both the capturing
/// pawn and the captured pawn leave the rank at once, which can open a rook
/// or queen's line to the king.
fn en_passant_exposes_king(board: &Board, king_sq: Square, mov: Move) -> bool {
    let color = mov.piece.color;
    let victim_sq = attacks::en_passant_victim(mov);
    if king_sq.rank() != mov.from.rank() {
        return false;
    }
    let ray = if (victim_sq.file() as i8) < (king_sq.file() as i8) {
        geometry::Offset::new(-1, 0)
    } else {
        geometry::Offset::new(1, 0)
    };
    let mut cursor = king_sq;
    while let Some(next) = cursor.offset_by(ray) {
        cursor = next;
        if cursor == mov.from || cursor == victim_sq {
            continue;
        }
        if let Some(piece) = board.get(cursor) {
            return piece.color != color
                && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen);
        }
    }
    false
}
