//! Sample ring between a capture callback and the render callback.
//!
//! Both sides move whole frames only, so a short ring never shifts one
//! channel's samples into the next channel.

use std::sync::atomic::{AtomicU64, Ordering};

use rtrb::{Consumer, Producer};

/// Blocks where the ring could not keep up, counted from the audio threads.
///
/// Counting is a relaxed `fetch_add`; reading and reporting happens on the
/// control thread.
#[derive(Debug, Default)]
pub struct XrunCounters {
    overruns: AtomicU64,
    underruns: AtomicU64,
}

impl XrunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture produced more than the ring could hold.
    pub fn record_overrun(&self) {
        self.overruns.fetch_add(1, Ordering::Relaxed);
    }

    /// Render needed more input than the ring held.
    pub fn record_underrun(&self) {
        self.underruns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn overruns(&self) -> u64 {
        self.overruns.load(Ordering::Relaxed)
    }

    pub fn underruns(&self) -> u64 {
        self.underruns.load(Ordering::Relaxed)
    }
}

/// Push as many whole frames of `data` as fit, returning the frames pushed.
///
/// Frames that do not fit are dropped; a short push is an overrun.
pub fn push_block(tx: &mut Producer<f32>, channels: usize, data: &[f32]) -> usize {
    if channels == 0 {
        return 0;
    }
    let room = tx.slots() / channels * channels;
    let count = (data.len() / channels * channels).min(room);
    for &sample in &data[..count] {
        // Cannot fail: `count` is within the free slots counted above.
        let _ = tx.push(sample);
    }
    count / channels
}

/// Fill `dst` with whole frames from `rx`, returning the frames popped.
///
/// Whatever the ring cannot supply is written as silence. A trailing partial
/// frame stays in the ring untouched.
pub fn fill_block(rx: &mut Consumer<f32>, channels: usize, dst: &mut [f32]) -> usize {
    if channels == 0 {
        dst.fill(0.0);
        return 0;
    }
    let wanted = dst.len() / channels * channels;
    let available = (rx.slots() / channels * channels).min(wanted);

    let (filled, silent) = dst.split_at_mut(available);
    for slot in filled {
        *slot = rx.pop().unwrap_or(0.0);
    }
    silent.fill(0.0);
    available / channels
}
