//! Real-world scenario benchmarks.
//!
//! Full render blocks as the audio callback runs them.

mod render;

pub use render::bench_render;
