// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack computation, in two layers. The free functions answer "what does a
//! piece standing here attack" against a given board. `AttackMap` maintains
//! the answer for every piece at once and updates it incrementally as moves
//! are played, so that check and castle-legality queries never rescan the
//! board.

use crate::board::Board;
use crate::castling;
use crate::geometry::{self, Offset, KNIGHT_JUMPS, ROYAL_RAYS};
use crate::moves::Move;
use crate::squareset::SquareSet;
use crate::types::{Color, Piece, PieceKind, Square, TableIndex, COLORS, SQUARES};

struct StepTable {
    table: [SquareSet; 64],
}

impl StepTable {
    fn new(steps: &[Offset]) -> StepTable {
        let mut st = StepTable {
            table: [SquareSet::none(); 64],
        };

        for &sq in SQUARES.iter() {
            let mut set = SquareSet::none();
            for &step in steps {
                if let Some(target) = sq.offset_by(step) {
                    set.insert(target);
                }
            }
            st.table[sq.as_index()] = set;
        }

        st
    }

    fn attacks(&self, sq: Square) -> SquareSet {
        self.table[sq.as_index()]
    }
}

struct PawnTable {
    table: [[SquareSet; 2]; 64],
}

impl PawnTable {
    fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[SquareSet::none(); 2]; 64],
        };

        for &sq in SQUARES.iter() {
            for &color in COLORS.iter() {
                let mut set = SquareSet::none();
                for &step in &geometry::pawn_captures(color) {
                    if let Some(target) = sq.offset_by(step) {
                        set.insert(target);
                    }
                }
                pt.table[sq.as_index()][color.as_index()] = set;
            }
        }

        pt
    }

    fn attacks(&self, sq: Square, color: Color) -> SquareSet {
        self.table[sq.as_index()][color.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: StepTable = StepTable::new(&ROYAL_RAYS);
    static ref KNIGHT_TABLE: StepTable = StepTable::new(&KNIGHT_JUMPS);
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
}

pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> SquareSet {
    KING_TABLE.attacks(sq)
}

/// The squares a piece standing on `sq` attacks, given the current occupancy.
/// Sliding attacks run up to and including the first occupied square along
/// each ray.
pub fn piece_attacks(board: &Board, sq: Square, piece: Piece) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(sq, piece.color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::King => king_attacks(sq),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            let rays = geometry::slider_rays(piece.kind).unwrap();
            let mut set = SquareSet::none();
            for &ray in rays {
                for target in board.get_path(sq, ray, true) {
                    set.insert(target);
                }
            }
            set
        }
    }
}

/// An incrementally maintained index of attacks. For every square it records
/// which white and black pieces attack it, and for every occupied square it
/// records the set of squares that piece attacks.
///
/// The index is a pure function of the board; `apply_move` keeps it in sync
/// with the same move the board just played, and `recompute` rebuilds it from
/// scratch.
#[derive(Clone)]
pub struct AttackMap {
    attacked_by: [[SquareSet; 64]; 2],
    attacks_from: [SquareSet; 64],
}

impl AttackMap {
    pub fn new(board: &Board) -> AttackMap {
        let mut map = AttackMap {
            attacked_by: [[SquareSet::none(); 64]; 2],
            attacks_from: [SquareSet::none(); 64],
        };
        map.recompute(board);
        map
    }

    /// Discards the index and rebuilds it from the board.
    pub fn recompute(&mut self, board: &Board) {
        self.attacked_by = [[SquareSet::none(); 64]; 2];
        self.attacks_from = [SquareSet::none(); 64];
        let mut count = 0;
        for (sq, piece) in board.occupied() {
            self.add_attacker(board, sq, piece);
            count += 1;
        }
        trace!("attack map rebuilt from {} pieces", count);
    }

    /// The pieces of `color` attacking `sq`.
    pub fn attackers(&self, sq: Square, color: Color) -> SquareSet {
        self.attacked_by[color.as_index()][sq.as_index()]
    }

    /// Whether any piece of `color` attacks `sq`.
    pub fn attacked(&self, sq: Square, color: Color) -> bool {
        !self.attackers(sq, color).is_empty()
    }

    pub fn num_attackers(&self, sq: Square, color: Color) -> u32 {
        self.attackers(sq, color).len()
    }

    /// The squares attacked by the piece standing on `sq`. Empty if the
    /// square is empty.
    pub fn attacks(&self, sq: Square) -> SquareSet {
        self.attacks_from[sq.as_index()]
    }

    /// Updates the index for a move the board has already played. `board`
    /// must be the position after the move.
    ///
    /// The order of operations matters. All recorded attack sets for pieces
    /// that left their square are retired first, so that the ray propagation
    /// steps only ever consult squares that are still occupied on the new
    /// board.
    pub fn apply_move(&mut self, board: &Board, mov: Move) {
        let color = mov.piece.color;
        let enemy = color.toggle();

        self.remove_attacker(mov.from, mov.piece);
        if mov.en_passant {
            self.remove_attacker(
                en_passant_victim(mov),
                Piece::new(PieceKind::Pawn, enemy),
            );
        } else if let Some(side) = mov.castle {
            self.remove_attacker(
                castling::rook_home(color, side),
                Piece::new(PieceKind::Rook, color),
            );
        } else if let Some(kind) = mov.capture {
            self.remove_attacker(mov.to, Piece::new(kind, enemy));
        }

        // Occupancy changed on these squares; extend or truncate the rays of
        // every slider whose line of sight crosses them.
        self.remove_piece(board, mov.from);
        if !mov.is_capture() || mov.en_passant {
            self.add_piece(board, mov.to);
        }
        if mov.en_passant {
            self.remove_piece(board, en_passant_victim(mov));
        }
        if let Some(side) = mov.castle {
            self.remove_piece(board, castling::rook_home(color, side));
            self.add_piece(board, castling::rook_destination(color, side));
        }

        let landed = Piece::new(mov.promotion.unwrap_or(mov.piece.kind), color);
        self.add_attacker(board, mov.to, landed);
        if let Some(side) = mov.castle {
            self.add_attacker(
                board,
                castling::rook_destination(color, side),
                Piece::new(PieceKind::Rook, color),
            );
        }
    }

    /// Records the attacks of a piece newly standing on `sq`.
    fn add_attacker(&mut self, board: &Board, sq: Square, piece: Piece) {
        let targets = piece_attacks(board, sq, piece);
        self.attacks_from[sq.as_index()] = targets;
        for target in targets {
            self.attacked_by[piece.color.as_index()][target.as_index()].insert(sq);
        }
    }

    /// Retires the recorded attacks of the piece that stood on `sq`. Works
    /// from the recorded set alone, so it is exact even when the board has
    /// already changed under the piece.
    fn remove_attacker(&mut self, sq: Square, piece: Piece) {
        let targets = std::mem::take(&mut self.attacks_from[sq.as_index()]);
        for target in targets {
            self.attacked_by[piece.color.as_index()][target.as_index()].remove(sq);
        }
    }

    /// A piece appeared on `sq`: sliders that attack it lose sight of
    /// everything beyond it.
    fn add_piece(&mut self, board: &Board, sq: Square) {
        self.propagate(board, sq, false);
    }

    /// `sq` was vacated: sliders that attack it now see through it.
    fn remove_piece(&mut self, board: &Board, sq: Square) {
        self.propagate(board, sq, true);
    }

    fn propagate(&mut self, board: &Board, sq: Square, extend: bool) {
        let sources = self.attackers(sq, Color::White) | self.attackers(sq, Color::Black);
        for source in sources {
            let piece = board
                .get(source)
                .expect("attack map records an attacker on an empty square");
            if !piece.is_sliding() {
                continue;
            }
            let ray = sq
                .offset_from(source)
                .normalize()
                .expect("slider attack is not along a ray");
            for tail in board.get_path(sq, ray, true) {
                if extend {
                    self.attacked_by[piece.color.as_index()][tail.as_index()].insert(source);
                    self.attacks_from[source.as_index()].insert(tail);
                } else {
                    self.attacked_by[piece.color.as_index()][tail.as_index()].remove(source);
                    self.attacks_from[source.as_index()].remove(tail);
                }
            }
        }
    }
}

/// The square of the pawn captured en passant: one rank behind the
/// destination, from the mover's point of view.
pub(crate) fn en_passant_victim(mov: Move) -> Square {
    mov.to
        .offset_by(geometry::backward(mov.piece.color))
        .expect("en passant destination has no square behind it")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn put(board: &mut Board, sq: Square, kind: PieceKind, color: Color) {
        board.put(sq, Piece::new(kind, color));
    }

    #[test]
    fn knight_attacks_corner() {
        let attacks = knight_attacks(Square::A1);
        assert_eq!(attacks.len(), 2);
        assert!(attacks.contains(Square::B3));
        assert!(attacks.contains(Square::C2));
    }

    #[test]
    fn king_attacks_center() {
        let attacks = king_attacks(Square::E4);
        assert_eq!(attacks.len(), 8);
        assert!(attacks.contains(Square::D3));
        assert!(attacks.contains(Square::F5));
    }

    #[test]
    fn pawn_attacks_ignore_occupancy() {
        let white = pawn_attacks(Square::E4, Color::White);
        assert_eq!(white.len(), 2);
        assert!(white.contains(Square::D5));
        assert!(white.contains(Square::F5));
        let black = pawn_attacks(Square::A5, Color::Black);
        assert_eq!(black.len(), 1);
        assert!(black.contains(Square::B4));
    }

    #[test]
    fn slider_attacks_stop_at_blockers() {
        let mut board = Board::empty();
        put(&mut board, Square::D4, PieceKind::Rook, Color::White);
        put(&mut board, Square::D6, PieceKind::Pawn, Color::Black);
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let attacks = piece_attacks(&board, Square::D4, rook);
        assert!(attacks.contains(Square::D5));
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
        assert!(attacks.contains(Square::A4));
        assert!(attacks.contains(Square::H4));
        assert!(attacks.contains(Square::D1));
    }

    #[test]
    fn map_tracks_attackers_by_color() {
        let mut board = Board::empty();
        put(&mut board, Square::D4, PieceKind::Rook, Color::White);
        put(&mut board, Square::F5, PieceKind::Knight, Color::Black);
        let map = AttackMap::new(&board);
        assert!(map.attacked(Square::D8, Color::White));
        assert!(!map.attacked(Square::D8, Color::Black));
        assert!(map.attacked(Square::D4, Color::Black));
        assert_eq!(map.num_attackers(Square::D4, Color::Black), 1);
        assert_eq!(map.attackers(Square::D4, Color::Black).first(), Some(Square::F5));
    }

    #[test]
    fn quiet_move_updates_rays() {
        let mut board = Board::empty();
        put(&mut board, Square::A1, PieceKind::Rook, Color::White);
        put(&mut board, Square::A4, PieceKind::Bishop, Color::White);
        let mut map = AttackMap::new(&board);
        assert!(!map.attacked(Square::A8, Color::White));

        // Moving the bishop away opens the rook's file.
        let mov = Move::quiet(
            Piece::new(PieceKind::Bishop, Color::White),
            Square::A4,
            Square::D7,
        );
        board.remove(Square::A4);
        board.put(Square::D7, Piece::new(PieceKind::Bishop, Color::White));
        map.apply_move(&board, mov);

        assert!(map.attacked(Square::A8, Color::White));
        assert!(map.attacks(Square::A1).contains(Square::A8));
        assert!(map.attacks(Square::A4).is_empty());
        assert!(map.attacks(Square::D7).contains(Square::H3));
    }

    #[test]
    fn capture_retires_victim_attacks() {
        let mut board = Board::empty();
        put(&mut board, Square::D4, PieceKind::Rook, Color::White);
        put(&mut board, Square::D7, PieceKind::Queen, Color::Black);
        let mut map = AttackMap::new(&board);
        assert!(map.attacked(Square::D4, Color::Black));

        let mov = Move::capture(
            Piece::new(PieceKind::Rook, Color::White),
            Square::D4,
            Square::D7,
            PieceKind::Queen,
        );
        board.remove(Square::D4);
        board.put(Square::D7, Piece::new(PieceKind::Rook, Color::White));
        map.apply_move(&board, mov);

        assert!(!map.attacked(Square::D4, Color::Black));
        assert!(map.attacks(Square::D7).contains(Square::D1));
        assert!(map.attacked(Square::D1, Color::White));
    }
}
