pub mod control; // Console key bindings
pub mod dsp;
pub mod engine; // Render loop and command protocol
pub mod io;

pub use engine::{command_channel, Command, EngineConfig, RenderEngine};

/// One channel's amplitude at one frame.
pub type Sample = f64;

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Upper bound on filter bank bands: one digit key per band.
pub const MAX_BANDS: usize = 9;
pub const MAX_CHANNELS: usize = 32;
/// Longest delay line, per channel.
pub const MAX_DELAY_SAMPLES: usize = 1 << 22;
pub const MAX_SAMPLE_RATE: f64 = 768_000.0;
