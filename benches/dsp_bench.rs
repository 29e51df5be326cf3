//! Benchmarks for the DSP primitives and full render blocks.
//!
//! Run with: cargo bench
//!
//! Every block has to finish well inside the hardware deadline.
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Filter bank and delay line on their own
//!   - scenarios/*  RenderEngine::render_block with effect combinations

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_filter,
    dsp::bench_delay,
    scenarios::bench_render,
);
criterion_main!(benches);
