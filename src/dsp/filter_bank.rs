//! Per-channel cascade of highpass, bandpass and lowpass cells.
//!
//! Band layout is decided once at construction:
//!
//! ```text
//! band 0        highpass at `low_hz`
//! band 1..n-2   bandpass, linearly spaced between `low_hz` and `high_hz`
//! band n-1      lowpass at `high_hz`
//! ```
//!
//! Each band has an enable bit. Enabled bands are applied in ascending order;
//! disabled bands are skipped entirely, so their memory is left untouched.

use crate::{
    dsp::filter::{FilterMode, StateVariableFilter},
    Sample,
};

pub struct FilterBank {
    /// `channels * bands` cells, channel-major.
    filters: Vec<StateVariableFilter>,
    frequencies: Vec<f64>,
    mask: Vec<bool>,
    channels: usize,
    bands: usize,
}

impl FilterBank {
    /// Build the fixed layout for `channels` channels with `bands` bands each.
    ///
    /// Requires `bands >= 2`; `EngineConfig::validate` enforces it for the engine.
    pub fn new(
        channels: usize,
        bands: usize,
        low_hz: f64,
        high_hz: f64,
        q: f64,
        sample_rate: f64,
    ) -> Self {
        debug_assert!(bands >= 2, "filter bank needs a highpass and a lowpass band");

        let frequencies: Vec<f64> = (0..bands)
            .map(|band| band_frequency(band, bands, low_hz, high_hz))
            .collect();

        let mut filters = Vec::with_capacity(channels * bands);
        for _ in 0..channels {
            for (band, &freq) in frequencies.iter().enumerate() {
                filters.push(StateVariableFilter::new(
                    band_mode(band, bands),
                    freq,
                    q,
                    sample_rate,
                ));
            }
        }

        Self {
            filters,
            frequencies,
            mask: vec![true; bands],
            channels,
            bands,
        }
    }

    /// Cascade `sample` through every enabled band of `channel`.
    #[inline]
    pub fn apply(&mut self, channel: usize, sample: Sample) -> Sample {
        let start = channel * self.bands;
        let cells = &mut self.filters[start..start + self.bands];

        let mut sample = sample;
        for (filter, &enabled) in cells.iter_mut().zip(&self.mask) {
            if enabled {
                sample = filter.process(sample);
            }
        }
        sample
    }

    /// Flip the enable bit of `band`.
    ///
    /// Out-of-range bands are a caller bug; they trip a debug assertion and
    /// are ignored otherwise so the audio thread never panics.
    pub fn toggle_band(&mut self, band: usize) {
        debug_assert!(band < self.bands, "band {} out of range", band);
        if let Some(enabled) = self.mask.get_mut(band) {
            *enabled = !*enabled;
        }
    }

    pub fn is_band_enabled(&self, band: usize) -> bool {
        self.mask.get(band).copied().unwrap_or(false)
    }

    /// Enable bits packed little-endian: bit `b` is band `b`.
    pub fn band_mask(&self) -> u32 {
        self.mask
            .iter()
            .take(u32::BITS as usize)
            .enumerate()
            .fold(0, |acc, (band, &on)| acc | ((on as u32) << band))
    }

    pub fn band_frequency(&self, band: usize) -> f64 {
        self.frequencies[band]
    }

    pub fn band_mode(&self, band: usize) -> FilterMode {
        band_mode(band, self.bands)
    }

    pub fn filter(&self, channel: usize, band: usize) -> &StateVariableFilter {
        &self.filters[channel * self.bands + band]
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

/// Response of `band` in a bank of `bands`.
pub fn band_mode(band: usize, bands: usize) -> FilterMode {
    if band == 0 {
        FilterMode::Highpass
    } else if band + 1 == bands {
        FilterMode::Lowpass
    } else {
        FilterMode::Bandpass
    }
}

/// Cutoff or center frequency of `band` in a bank of `bands`.
pub fn band_frequency(band: usize, bands: usize, low_hz: f64, high_hz: f64) -> f64 {
    let span = bands.saturating_sub(1).max(1) as f64;
    low_hz + (high_hz - low_hz) * band as f64 / span
}
