//! Snapshots published by the render thread for display.
//!
//! One `EngineStatus` is pushed per rendered block. It is `Copy` so pushing
//! never allocates; a full ring simply skips that block's snapshot.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::engine::effects::EffectFlags;

/// Snapshots buffered before the render thread starts skipping them.
pub const STATUS_RING_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineStatus {
    /// Effect switches as observed during the block.
    pub effects: EffectFlags,
    /// Filter bank enable bits, bit `b` = band `b`.
    pub band_mask: u32,
    pub bands: u8,
    /// Largest absolute input sample in the block, across channels.
    pub input_peak: f64,
    /// Largest absolute output sample in the block, across channels.
    pub output_peak: f64,
    pub blocks_rendered: u64,
}

impl EngineStatus {
    pub fn is_band_enabled(&self, band: usize) -> bool {
        band < u32::BITS as usize && self.band_mask & (1 << band) != 0
    }
}

pub fn status_channel(capacity: usize) -> (Producer<EngineStatus>, Consumer<EngineStatus>) {
    RingBuffer::new(capacity)
}

/// Drain `rx`, keeping only the newest snapshot.
pub fn latest_status(rx: &mut Consumer<EngineStatus>) -> Option<EngineStatus> {
    let mut latest = None;
    while let Ok(status) = rx.pop() {
        latest = Some(status);
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_status_keeps_newest() {
        let (mut tx, mut rx) = status_channel(4);
        for blocks in 1..=3 {
            tx.push(EngineStatus {
                blocks_rendered: blocks,
                ..EngineStatus::default()
            })
            .unwrap();
        }

        assert_eq!(latest_status(&mut rx).map(|s| s.blocks_rendered), Some(3));
        assert_eq!(latest_status(&mut rx), None);
    }

    #[test]
    fn band_bits_decode() {
        let status = EngineStatus {
            band_mask: 0b0101,
            bands: 4,
            ..EngineStatus::default()
        };
        assert!(status.is_band_enabled(0));
        assert!(!status.is_band_enabled(1));
        assert!(status.is_band_enabled(2));
        assert!(!status.is_band_enabled(3));
        assert!(!status.is_band_enabled(40));
    }
}
