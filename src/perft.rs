// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::state::GameState;

/// Counts the leaf nodes of the legal move tree to the given depth. Since the
/// generator emits only legal moves, every generated move counts.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .as_slice()
        .par_iter()
        .map(|&mov| {
            let mut next = state.clone();
            next.apply_move(mov);
            perft(&next, depth - 1)
        })
        .sum()
}
