//! Benchmark for random full-game playouts
//!
//! Measures GameEngine::act throughput with uniformly random legal moves

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use azul_engine::GameEngine;

fn playout(num_players: u8, rng: &mut StdRng) -> i32 {
    let mut engine = GameEngine::new_game(num_players, rng).unwrap();
    let mut total = 0;
    let mut player = 0;
    for _ in 0..2000 {
        if engine.is_game_over() {
            break;
        }
        let moves = engine.legal_moves(player);
        let mv = moves[rng.random_range(0..moves.len())];
        match engine.act(mv, player, rng) {
            Ok(reward) => total += reward,
            Err(_) => break,
        }
        player = (player + 1) % num_players;
    }
    total
}

fn bench_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_playout");

    for num_players in [2u8, 3, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_players),
            &num_players,
            |b, &num_players| {
                let mut rng = StdRng::seed_from_u64(42);
                b.iter(|| black_box(playout(num_players, &mut rng)))
            },
        );
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let engine = GameEngine::new_game(4, &mut rng).unwrap();

    c.bench_function("snapshot_roundtrip", |b| {
        b.iter(|| GameEngine::from_snapshot(black_box(engine.snapshot())).unwrap())
    });
}

criterion_group!(benches, bench_playout, bench_snapshot);
criterion_main!(benches);
