// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The attack map maintained move by move must always agree with one rebuilt
//! from the board. These tests walk randomized games and scripted games and
//! compare the two after every move.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use castellan::{AttackMap, Color, GameState, SquareSet};

fn assert_maps_agree(state: &GameState, context: &str) {
    let fresh = AttackMap::new(state.board());
    for sq in SquareSet::all() {
        for &color in &[Color::White, Color::Black] {
            assert_eq!(
                state.attack_map().attackers(sq, color),
                fresh.attackers(sq, color),
                "attackers of {} by {:?} diverged {}",
                sq,
                color,
                context
            );
        }
        assert_eq!(
            state.attack_map().attacks(sq),
            fresh.attacks(sq),
            "attacks from {} diverged {}",
            sq,
            context
        );
    }
}

fn play_script(state: &mut GameState, script: &[&str]) {
    for text in script {
        let mov = state
            .legal_moves()
            .into_iter()
            .find(|m| m.to_string() == *text)
            .unwrap_or_else(|| panic!("{} is not legal here", text));
        state.apply_move(mov);
        assert_maps_agree(state, &format!("after {}", text));
    }
}

#[test]
fn maps_agree_through_random_games() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for game in 0..40 {
        let mut state = GameState::new_game();
        for ply in 0..120 {
            let moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mov = moves[rng.gen_range(0..moves.len())];
            state.apply_move(mov);
            assert_maps_agree(
                &state,
                &format!("after {} (game {}, ply {})", mov, game, ply),
            );
        }
    }
}

#[test]
fn maps_agree_through_kingside_castling() {
    let mut state = GameState::new_game();
    play_script(
        &mut state,
        &[
            "e2e4", "e7e5", "g1f3", "g8f6", "f1c4", "f8c5", "e1g1", "e8g8",
        ],
    );
}

#[test]
fn maps_agree_through_queenside_castling() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play_script(&mut state, &["e1c1", "e8g8"]);
}

#[test]
fn maps_agree_through_promotion_and_en_passant() {
    let mut state = GameState::from_fen("4k3/2p2P2/8/3P4/8/8/8/4K3 w - - 0 1").unwrap();
    play_script(&mut state, &["f7f8q", "e8f8", "e1e2", "c7c5", "d5c6"]);
}
