// Copyright 2021-2023 The Castellan Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use castellan::attacks;
use castellan::{AttackMap, GameState, MoveGenerator, MoveVec, Square};
use criterion::black_box;
use criterion::Criterion;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("knight attacks f5", |b| {
        b.iter(|| attacks::knight_attacks(black_box(Square::F5)))
    });

    c.bench_function("attack map from start position", |b| {
        let state = GameState::new_game();
        b.iter(|| AttackMap::new(black_box(state.board())))
    });

    c.bench_function("state clone", |b| {
        let state = GameState::new_game();
        b.iter(|| black_box(&state).clone())
    });

    c.bench_function("generate moves start", |b| {
        let state = GameState::new_game();
        b.iter(|| {
            let mut vec = MoveVec::new();
            let gen = MoveGenerator::new();
            gen.generate(black_box(&state), &mut vec);
        });
    });

    c.bench_function("generate moves kiwipete", |b| {
        let state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        b.iter(|| {
            let mut vec = MoveVec::new();
            let gen = MoveGenerator::new();
            gen.generate(black_box(&state), &mut vec);
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
