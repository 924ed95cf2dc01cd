/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pie_chess::*;

fn perft_benchmark(c: &mut Criterion) {
    let startpos = Game::default();
    c.bench_function("Startpos Perft 4", |b| {
        b.iter(|| {
            let startpos = black_box(&startpos);
            let depth = black_box(4);
            black_box(perft(startpos, depth))
        });
    });

    let endgame = Game::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w").unwrap();
    c.bench_function("Rook Endgame Valid Moves", |b| {
        b.iter(|| black_box(black_box(&endgame).get_valid_moves()));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50).measurement_time(Duration::from_secs(30));
    targets = perft_benchmark
}
criterion_main!(benches);
