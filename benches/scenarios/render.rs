//! Benchmarks for `RenderEngine::render_block`.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use daem::{command_channel, engine::EffectFlags, Command, EngineConfig, RenderEngine};

use crate::BLOCK_SIZES;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    let scenarios = [
        ("bypass", EffectFlags::default()),
        (
            "delay",
            EffectFlags {
                delay: true,
                ..EffectFlags::default()
            },
        ),
        (
            "filter_hall",
            EffectFlags {
                filter: true,
                hall: true,
                ..EffectFlags::default()
            },
        ),
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<Vec<f64>> = (0..2)
            .map(|ch| {
                (0..size)
                    .map(|i| ((i + ch * 7) as f64 * 0.05).sin() * 0.5)
                    .collect()
            })
            .collect();
        let mut output = vec![vec![0.0; size]; 2];

        for (name, effects) in scenarios {
            let config = EngineConfig {
                sample_rate: 48_000.0,
                block_size: size,
                effects,
                ..EngineConfig::default()
            };
            let (mut tx, rx) = command_channel(config.command_capacity);
            let mut engine = RenderEngine::new(&config, rx).expect("valid bench config");

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                b.iter(|| {
                    // Keep the drain path busy with one command per block.
                    tx.submit(Command::ToggleBand(0));
                    engine.render_block(black_box(&input), black_box(&mut output), size);
                })
            });
        }
    }

    group.finish();
}
