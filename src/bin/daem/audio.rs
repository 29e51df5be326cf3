//! cpal duplex plumbing: one input stream feeding one output stream.
//!
//! The input callback only copies interleaved samples into an `rtrb` ring.
//! The output callback is the render thread: it pops one block from the
//! ring, de-interleaves it, runs the engine and interleaves the result.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, SampleRate, Stream, StreamConfig,
};
use std::sync::Arc;

use daem::{
    io::{
        bridge::{fill_block, push_block, XrunCounters},
        AudioInput, AudioOutput,
    },
    EngineConfig, RenderEngine,
};
use rtrb::RingBuffer;

/// Capacity of the input -> output ring, in blocks.
const INPUT_RING_BLOCKS: usize = 4;

pub struct AudioStreams {
    input: Stream,
    output: Stream,
    xruns: Arc<XrunCounters>,
}

impl AudioStreams {
    /// Overrun and underrun counts shared with both callbacks.
    pub fn xruns(&self) -> Arc<XrunCounters> {
        Arc::clone(&self.xruns)
    }

    /// Stop rendering, then release both streams.
    ///
    /// The engine lives inside the output callback, so it is torn down only
    /// after the last block has been rendered.
    pub fn stop(self) -> EyreResult<()> {
        self.output.pause().wrap_err("failed to stop output stream")?;
        self.input.pause().wrap_err("failed to stop input stream")?;
        drop(self.output);
        drop(self.input);
        log::info!("audio streams stopped");
        Ok(())
    }
}

/// Open and start the duplex stream. Any failure here is fatal.
pub fn start(config: &EngineConfig, mut engine: RenderEngine) -> EyreResult<AudioStreams> {
    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;
    let output_device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;

    log::info!(
        "input device: {}, output device: {}",
        input_device.name().unwrap_or_else(|_| "<unknown>".into()),
        output_device.name().unwrap_or_else(|_| "<unknown>".into()),
    );

    let channels = config.channels;
    let block_size = config.block_size;
    let stream_config = StreamConfig {
        channels: u16::try_from(channels).wrap_err("channel count out of range")?,
        sample_rate: SampleRate(config.sample_rate as u32),
        buffer_size: BufferSize::Fixed(block_size as u32),
    };

    let (mut input_tx, mut input_rx) =
        RingBuffer::<f32>::new(channels * block_size * INPUT_RING_BLOCKS);
    let xruns = Arc::new(XrunCounters::new());

    let input_xruns = Arc::clone(&xruns);
    let input = input_device
        .build_input_stream(
            &stream_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                // Output side is behind; the frames that did not fit are lost.
                if push_block(&mut input_tx, channels, data) * channels < data.len() {
                    input_xruns.record_overrun();
                }
            },
            |err| log::error!("input stream error: {err}"),
            None,
        )
        .wrap_err("failed to build input stream")?;

    // Scratch owned by the render callback, sized for one block.
    let mut interleaved = vec![0.0f32; channels * block_size];
    let mut audio_in = AudioInput::new(channels, block_size);
    let mut audio_out = AudioOutput::new(channels, block_size);

    let output_xruns = Arc::clone(&xruns);
    let output = output_device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for chunk in data.chunks_mut(channels * block_size) {
                    let frames = chunk.len() / channels;
                    let wanted = frames * channels;

                    if fill_block(&mut input_rx, channels, &mut interleaved[..wanted]) < frames {
                        output_xruns.record_underrun();
                    }

                    let frames = audio_in.load_interleaved(&interleaved[..wanted], channels);
                    engine.render_block(&audio_in.buffers, &mut audio_out.buffers, frames);
                    audio_out.store_interleaved(chunk, channels, frames);
                }
            },
            |err| log::error!("output stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    input.play().wrap_err("failed to start input stream")?;
    output.play().wrap_err("failed to start output stream")?;
    log::info!(
        "streaming {} ch @ {} Hz, {} frame blocks ({:.1} ms deadline)",
        channels,
        config.sample_rate,
        block_size,
        config.block_deadline_secs() * 1000.0,
    );

    Ok(AudioStreams {
        input,
        output,
        xruns,
    })
}
