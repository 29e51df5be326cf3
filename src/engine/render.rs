use rtrb::{Consumer, Producer};

use crate::{
    dsp::{DelayLine, FilterBank},
    engine::{
        command::{Command, CommandReceiver},
        config::{ConfigResult, EngineConfig},
        effects::EffectState,
        status::EngineStatus,
    },
    Sample,
};

/// Gain applied to both the dry signal and the delay tap.
const MIX: Sample = 0.5;

/// Per-block audio callback state.
///
/// Owns the effect switches, the filter bank and the delay line outright;
/// the control thread reaches them only through the command ring, which is
/// drained once at the top of every block.
pub struct RenderEngine<R: CommandReceiver = Consumer<Command>> {
    commands: R,
    effects: EffectState,
    filter_bank: FilterBank,
    delay_line: DelayLine,
    status_tx: Option<Producer<EngineStatus>>,
    sample_rate: f64,
    channels: usize,
    blocks_rendered: u64,
}

impl<R: CommandReceiver> RenderEngine<R> {
    pub fn new(config: &EngineConfig, commands: R) -> ConfigResult<Self> {
        config.validate()?;

        let filter_bank = FilterBank::new(
            config.channels,
            config.bands,
            config.low_cutoff_hz,
            config.high_cutoff_hz,
            config.filter_q,
            config.sample_rate,
        );
        let delay_line = DelayLine::new(config.channels, config.delay_samples);

        log::info!(
            "render engine: {} ch @ {} Hz, {} frame blocks, delay {} samples, {} bands {}-{} Hz",
            config.channels,
            config.sample_rate,
            config.block_size,
            config.delay_samples,
            config.bands,
            config.low_cutoff_hz,
            config.high_cutoff_hz,
        );

        Ok(Self {
            commands,
            effects: EffectState::from_flags(config.effects),
            filter_bank,
            delay_line,
            status_tx: None,
            sample_rate: config.sample_rate,
            channels: config.channels,
            blocks_rendered: 0,
        })
    }

    /// Publish an [`EngineStatus`] after every block.
    pub fn with_status(mut self, tx: Producer<EngineStatus>) -> Self {
        self.status_tx = Some(tx);
        self
    }

    /// Render `frames` frames from `input` into `output`.
    ///
    /// Channel count is `output.len()`. Input channels that are missing or
    /// shorter than `frames` read as silence; output channels past the
    /// configured channel count are zeroed. Never allocates, locks or fails.
    pub fn render_block<I, O>(&mut self, input: &[I], output: &mut [O], frames: usize)
    where
        I: AsRef<[Sample]>,
        O: AsMut<[Sample]>,
    {
        self.drain_commands();

        let frames = output
            .iter_mut()
            .fold(frames, |n, out| n.min(out.as_mut().len()));
        let channels = output.len().min(self.channels);
        let flags = self.effects.flags();
        let delay_active = flags.delay || flags.hall;

        let mut input_peak: Sample = 0.0;
        let mut output_peak: Sample = 0.0;

        for frame in 0..frames {
            for ch in 0..channels {
                let dry = input
                    .get(ch)
                    .and_then(|buf| buf.as_ref().get(frame))
                    .copied()
                    .unwrap_or(0.0);
                input_peak = input_peak.max(dry.abs());

                let mut sample = dry;
                if flags.filter {
                    sample = self.filter_bank.apply(ch, sample);
                }

                let out = if delay_active {
                    let delayed = self.delay_line.read(ch);
                    let mixed = MIX * sample + MIX * delayed;
                    // Delay feeds the input forward; hall feeds the mix back.
                    let feedback = if flags.hall { mixed } else { sample };
                    self.delay_line.write(ch, feedback);
                    mixed
                } else {
                    sample
                };

                output_peak = output_peak.max(out.abs());
                output[ch].as_mut()[frame] = out;
            }
            self.delay_line.advance();
        }

        for out in output.iter_mut().skip(channels) {
            let out = out.as_mut();
            let n = frames.min(out.len());
            out[..n].fill(0.0);
        }

        self.blocks_rendered += 1;
        self.publish_status(input_peak, output_peak);
    }

    fn drain_commands(&mut self) {
        while let Some(command) = self.commands.pop() {
            match command {
                Command::ToggleBand(band) => {
                    if band < self.filter_bank.bands() {
                        self.filter_bank.toggle_band(band);
                    }
                }
                other => self.effects.apply(other),
            }
        }
    }

    fn publish_status(&mut self, input_peak: Sample, output_peak: Sample) {
        let Some(tx) = self.status_tx.as_mut() else {
            return;
        };

        let status = EngineStatus {
            effects: self.effects.flags(),
            band_mask: self.filter_bank.band_mask(),
            bands: self.filter_bank.bands() as u8,
            input_peak,
            output_peak,
            blocks_rendered: self.blocks_rendered,
        };
        // Skip this snapshot if the UI is behind.
        let _ = tx.push(status);
    }

    pub fn effects(&self) -> &EffectState {
        &self.effects
    }

    pub fn filter_bank(&self) -> &FilterBank {
        &self.filter_bank
    }

    pub fn delay_line(&self) -> &DelayLine {
        &self.delay_line
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn blocks_rendered(&self) -> u64 {
        self.blocks_rendered
    }
}
