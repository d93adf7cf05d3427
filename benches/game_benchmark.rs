//! Performance benchmarks for the game engine

use criterion::{criterion_group, criterion_main, Criterion};
use starbase_rs::core::{PlayerId, PlayerKind};
use starbase_rs::game::{GameEngine, HeuristicController, PlayerController, VerbosityLevel};
use starbase_rs::loader::{builtin, CardSource, GameInitializer};

fn run_full_game(seed: u64, players: usize) -> u32 {
    let roster: Vec<(String, PlayerKind)> = (1..=players)
        .map(|i| (format!("P{i}"), PlayerKind::Computer))
        .collect();
    let source = CardSource::from_records(&builtin::builtin_records()).unwrap();
    let initializer = GameInitializer::new().with_seed(seed);
    let mut game = initializer.initialize(&roster, source).unwrap();
    game.logger.set_verbosity(VerbosityLevel::Silent);

    let mut engine = GameEngine::new(&mut game, initializer.dice_roller());
    let mut controllers: Vec<Box<dyn PlayerController>> = PlayerId::all(players)
        .map(|id| Box::new(HeuristicController::new(id)) as Box<dyn PlayerController>)
        .collect();
    engine.run_game(&mut controllers).unwrap().rounds_played
}

fn bench_full_games(c: &mut Criterion) {
    c.bench_function("full_game_2p", |b| {
        b.iter(|| run_full_game(std::hint::black_box(42), 2))
    });
    c.bench_function("full_game_5p", |b| {
        b.iter(|| run_full_game(std::hint::black_box(42), 5))
    });
}

criterion_group!(benches, bench_full_games);
criterion_main!(benches);
