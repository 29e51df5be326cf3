//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use daem::dsp::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Delay lengths in samples
    let delay_times: &[usize] = &[
        480,   // 10ms at 48kHz
        4800,  // 100ms at 48kHz
        22050, // default length
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f64> = (0..size).map(|i| (i as f64 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let mut line = DelayLine::new(2, delay_samples);
            group.bench_with_input(
                BenchmarkId::new(format!("stereo_{}", delay_samples), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let mut acc = 0.0;
                        for &x in &input {
                            for ch in 0..2 {
                                let delayed = line.read(ch);
                                line.write(ch, black_box(x));
                                acc += delayed;
                            }
                            line.advance();
                        }
                        acc
                    })
                },
            );
        }
    }

    group.finish();
}
