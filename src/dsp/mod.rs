//! Low-level DSP primitives used by the render engine.
//!
//! Everything here is sized at construction and allocation-free afterwards,
//! so it is safe to drive from the audio callback.

/// Fixed-length multichannel delay with a shared cursor.
pub mod delay;
/// Two-pole state-variable filter cell.
pub mod filter;
/// Channels x bands array of filter cells with a band enable mask.
pub mod filter_bank;

pub use delay::DelayLine;
pub use filter::{FilterMode, StateVariableFilter};
pub use filter_bank::FilterBank;
