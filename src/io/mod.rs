// Purpose - host-facing sample buffers and layout conversion

pub mod bridge;
pub mod converter;

use crate::Sample;

/// Per-channel input scratch, sized once when the stream is opened.
#[derive(Debug, Default)]
pub struct AudioInput {
    pub buffers: Vec<Vec<Sample>>,
}

impl AudioInput {
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    /// Fill from an interleaved device block, returning the frame count.
    pub fn load_interleaved(&mut self, interleaved: &[f32], device_channels: usize) -> usize {
        converter::deinterleave(interleaved, device_channels, &mut self.buffers)
    }
}

/// Per-channel output scratch, sized once when the stream is opened.
#[derive(Debug, Default)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<Sample>>,
}

impl AudioOutput {
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    pub fn store_interleaved(
        &self,
        interleaved: &mut [f32],
        device_channels: usize,
        frames: usize,
    ) {
        converter::interleave(&self.buffers, frames, device_channels, interleaved);
    }
}
