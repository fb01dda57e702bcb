//! Benchmarks for the blackjack learner.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use blackjack_learner::learning::{play_frozen, Trainer, TrainingConfig};

fn single_episode_benchmark(c: &mut Criterion) {
    let mut trainer = Trainer::new(TrainingConfig::default().with_seed(42));

    c.bench_function("single_episode", |b| {
        b.iter(|| black_box(trainer.run_episode()))
    });
}

fn training_1000_episodes_benchmark(c: &mut Criterion) {
    c.bench_function("train_1000_episodes", |b| {
        b.iter(|| {
            let mut trainer = Trainer::new(TrainingConfig::default().with_seed(42));
            trainer.train(black_box(1000)).map(|stats| stats.states)
        })
    });
}

fn frozen_episode_benchmark(c: &mut Criterion) {
    let mut trainer = Trainer::new(TrainingConfig::default().with_seed(42));
    let _ = trainer.train(20_000);
    let table = trainer.into_table();
    let mut rng = StdRng::seed_from_u64(7);

    c.bench_function("frozen_episode", |b| {
        b.iter(|| black_box(play_frozen(&table, &mut rng)))
    });
}

criterion_group!(
    benches,
    single_episode_benchmark,
    training_1000_episodes_benchmark,
    frozen_episode_benchmark
);
criterion_main!(benches);
