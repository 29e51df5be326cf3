//! Construction-time stream configuration.
//!
//! Every value here is fixed for the lifetime of a stream. Validation runs
//! once, before any audio thread exists.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{command::DEFAULT_COMMAND_CAPACITY, effects::EffectFlags};
use crate::{MAX_BANDS, MAX_BLOCK_SIZE, MAX_CHANNELS, MAX_DELAY_SAMPLES, MAX_SAMPLE_RATE};

/// Configuration rejected before the stream is opened.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sample rate must be a whole number of Hz up to {max}, got {0}", max = MAX_SAMPLE_RATE)]
    SampleRate(f64),

    #[error("channel count must be at least 1")]
    NoChannels,

    #[error("at most {max} channels are supported, got {got}")]
    TooManyChannels { got: usize, max: usize },

    #[error("block size must be between 1 and {max}, got {got}")]
    BlockSize { got: usize, max: usize },

    #[error("delay length must be at least one sample")]
    EmptyDelay,

    #[error("delay length of {got} samples exceeds the {max} sample limit")]
    DelayTooLong { got: usize, max: usize },

    #[error("filter bank needs between 2 and {max} bands, got {got}")]
    BandCount { got: usize, max: usize },

    #[error("filter cutoffs must satisfy 0 < low < high, got low={low}Hz high={high}Hz")]
    CutoffOrder { low: f64, high: f64 },

    #[error("high cutoff {high}Hz is unstable at {sample_rate}Hz (limit {limit:.1}Hz)")]
    UnstableCutoff { high: f64, sample_rate: f64, limit: f64 },

    #[error("filter Q must be positive, got {0}")]
    FilterQ(f64),

    #[error("command capacity must be at least 1")]
    CommandCapacity,

    #[error("delay and hall cannot both start enabled")]
    DelayAndHall,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f64,
    pub channels: usize,
    /// Frames per hardware block.
    pub block_size: usize,
    pub delay_samples: usize,
    pub bands: usize,
    pub low_cutoff_hz: f64,
    pub high_cutoff_hz: f64,
    pub filter_q: f64,
    pub command_capacity: usize,
    pub effects: EffectFlags,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            channels: 2,
            block_size: 1024,
            delay_samples: 22_050,
            bands: 4,
            low_cutoff_hz: 200.0,
            high_cutoff_hz: 5_000.0,
            filter_q: 1.0,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
            effects: EffectFlags {
                filter: false,
                delay: true,
                hall: false,
            },
        }
    }
}

impl EngineConfig {
    /// Highest cutoff the filter cells stay stable at: `f1 < 2` means `f < fs / pi`.
    pub fn stability_limit_hz(&self) -> f64 {
        self.sample_rate / PI
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let rate = self.sample_rate;
        if !(rate > 0.0 && rate <= MAX_SAMPLE_RATE && rate.fract() == 0.0) {
            return Err(ConfigError::SampleRate(rate));
        }
        if self.channels == 0 {
            return Err(ConfigError::NoChannels);
        }
        if self.channels > MAX_CHANNELS {
            return Err(ConfigError::TooManyChannels {
                got: self.channels,
                max: MAX_CHANNELS,
            });
        }
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockSize {
                got: self.block_size,
                max: MAX_BLOCK_SIZE,
            });
        }
        if self.delay_samples == 0 {
            return Err(ConfigError::EmptyDelay);
        }
        if self.delay_samples > MAX_DELAY_SAMPLES {
            return Err(ConfigError::DelayTooLong {
                got: self.delay_samples,
                max: MAX_DELAY_SAMPLES,
            });
        }
        if self.bands < 2 || self.bands > MAX_BANDS {
            return Err(ConfigError::BandCount {
                got: self.bands,
                max: MAX_BANDS,
            });
        }
        if !(self.low_cutoff_hz > 0.0 && self.low_cutoff_hz < self.high_cutoff_hz) {
            return Err(ConfigError::CutoffOrder {
                low: self.low_cutoff_hz,
                high: self.high_cutoff_hz,
            });
        }
        let limit = self.stability_limit_hz();
        if self.high_cutoff_hz >= limit {
            return Err(ConfigError::UnstableCutoff {
                high: self.high_cutoff_hz,
                sample_rate: self.sample_rate,
                limit,
            });
        }
        if !(self.filter_q > 0.0) {
            return Err(ConfigError::FilterQ(self.filter_q));
        }
        if self.command_capacity == 0 {
            return Err(ConfigError::CommandCapacity);
        }
        if self.effects.delay && self.effects.hall {
            return Err(ConfigError::DelayAndHall);
        }
        Ok(())
    }

    /// Block duration in seconds: the render deadline.
    pub fn block_deadline_secs(&self) -> f64 {
        self.block_size as f64 / self.sample_rate
    }
}
