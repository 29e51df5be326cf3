use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Sample;

/*
State-Variable Filter (Chamberlin form)
=======================================

One cell produces highpass, bandpass and lowpass responses from the same
two integrators. Only one of them is selected as the cell's output.

    hp = x - lp[n-1] - q1 * bp[n-1]
    bp = f1 * hp + bp[n-1]
    lp = f1 * bp + lp[n-1]

with

    f1 = 2 * sin(pi * f / fs)
    q1 = 1 / Q

The loop stays stable while f1 < 2, i.e. f < fs / pi. Nothing checks this
here: callers tune the cell once, at construction or through `retune`.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Highpass,
    Bandpass,
    Lowpass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateVariableFilter {
    mode: FilterMode,
    f1: f64, // frequency coefficient
    q1: f64, // damping, 1/Q

    lowpass_memory: f64,
    bandpass_memory: f64,
}

impl StateVariableFilter {
    pub fn new(mode: FilterMode, frequency: f64, q: f64, sample_rate: f64) -> Self {
        let (f1, q1) = coefficients(frequency, q, sample_rate);
        Self {
            mode,
            f1,
            q1,
            lowpass_memory: 0.0,
            bandpass_memory: 0.0,
        }
    }

    pub fn highpass(frequency: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(FilterMode::Highpass, frequency, q, sample_rate)
    }

    pub fn bandpass(frequency: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(FilterMode::Bandpass, frequency, q, sample_rate)
    }

    pub fn lowpass(frequency: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(FilterMode::Lowpass, frequency, q, sample_rate)
    }

    /// Run one sample through the cell and return the selected response.
    #[inline]
    pub fn process(&mut self, sample: Sample) -> Sample {
        let hp = sample - self.lowpass_memory - self.q1 * self.bandpass_memory;
        let bp = self.f1 * hp + self.bandpass_memory;
        let lp = self.f1 * bp + self.lowpass_memory;

        self.bandpass_memory = bp;
        self.lowpass_memory = lp;

        match self.mode {
            FilterMode::Highpass => hp,
            FilterMode::Bandpass => bp,
            FilterMode::Lowpass => lp,
        }
    }

    /// Recompute the coefficients and clear the integrators.
    ///
    /// This is the only place the filter memory is ever reset.
    pub fn retune(&mut self, frequency: f64, q: f64, sample_rate: f64) {
        let (f1, q1) = coefficients(frequency, q, sample_rate);
        self.f1 = f1;
        self.q1 = q1;
        self.lowpass_memory = 0.0;
        self.bandpass_memory = 0.0;
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// `(f1, q1)`
    pub fn coefficients(&self) -> (f64, f64) {
        (self.f1, self.q1)
    }

    /// `(lowpass, bandpass)` integrator memory.
    pub fn memory(&self) -> (f64, f64) {
        (self.lowpass_memory, self.bandpass_memory)
    }
}

#[inline]
fn coefficients(frequency: f64, q: f64, sample_rate: f64) -> (f64, f64) {
    let f1 = 2.0 * (PI * frequency / sample_rate).sin();
    let q1 = 1.0 / q;
    (f1, q1)
}
