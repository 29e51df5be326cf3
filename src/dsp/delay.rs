use crate::Sample;

/// Multichannel circular delay with one cursor shared by every channel.
///
/// Per frame the caller reads and writes each channel at the current cursor,
/// then calls [`DelayLine::advance`] exactly once. Because all channels share
/// the cursor, the delayed signal stays phase-aligned across channels.
pub struct DelayLine {
    buffers: Vec<Vec<Sample>>,
    cursor: usize,
    delay_samples: usize,
}

impl DelayLine {
    pub fn new(channels: usize, delay_samples: usize) -> Self {
        debug_assert!(delay_samples > 0, "delay line needs at least one slot");
        let delay_samples = delay_samples.max(1);

        Self {
            buffers: vec![vec![0.0; delay_samples]; channels],
            cursor: 0,
            delay_samples,
        }
    }

    /// Sample written `len()` frames ago on `channel`.
    #[inline]
    pub fn read(&self, channel: usize) -> Sample {
        self.buffers[channel][self.cursor]
    }

    /// Overwrite the slot under the cursor on `channel`.
    #[inline]
    pub fn write(&mut self, channel: usize, sample: Sample) {
        self.buffers[channel][self.cursor] = sample;
    }

    /// Move the shared cursor one frame forward, wrapping at `len()`.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.delay_samples {
            self.cursor = 0;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.delay_samples
    }

    pub fn is_empty(&self) -> bool {
        self.delay_samples == 0
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    pub fn sample_at(&self, channel: usize, slot: usize) -> Sample {
        self.buffers[channel][slot]
    }

    /// Zero every slot and rewind the cursor. Not for use while streaming.
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
        self.cursor = 0;
    }
}
