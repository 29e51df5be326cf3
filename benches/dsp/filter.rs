//! Benchmarks for the filter cell and filter bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use daem::dsp::{FilterBank, StateVariableFilter};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f64 = 48_000.0;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f64> = (0..size)
            .map(|i| (i as f64 / size as f64) * 2.0 - 1.0)
            .collect();

        let mut filter = StateVariableFilter::bandpass(1_000.0, 2.0, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("cell", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0;
                for &x in &input {
                    acc += filter.process(black_box(x));
                }
                acc
            })
        });

        for bands in [2usize, 4, 8] {
            let mut bank = FilterBank::new(2, bands, 200.0, 5_000.0, 1.0, SAMPLE_RATE);
            group.bench_with_input(
                BenchmarkId::new(format!("bank_{}_bands_stereo", bands), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let mut acc = 0.0;
                        for &x in &input {
                            acc += bank.apply(0, black_box(x));
                            acc += bank.apply(1, black_box(-x));
                        }
                        acc
                    })
                },
            );
        }
    }

    group.finish();
}
