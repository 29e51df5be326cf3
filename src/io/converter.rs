//! Frame-major (device) <-> channel-major (engine) sample layout.

use crate::Sample;

/// Split interleaved device samples into per-channel buffers.
///
/// `device_channels` is the stride of `src`. Device channels without a
/// matching buffer are dropped; buffers without a device channel get silence.
/// Returns the number of frames written, limited by the shortest buffer.
pub fn deinterleave(src: &[f32], device_channels: usize, dst: &mut [Vec<Sample>]) -> usize {
    if device_channels == 0 {
        return 0;
    }
    let frames = dst
        .iter()
        .fold(src.len() / device_channels, |n, buf| n.min(buf.len()));

    for (ch, buf) in dst.iter_mut().enumerate() {
        if ch < device_channels {
            for (slot, frame) in buf[..frames]
                .iter_mut()
                .zip(src.chunks_exact(device_channels))
            {
                *slot = Sample::from(frame[ch]);
            }
        } else {
            buf[..frames].fill(0.0);
        }
    }
    frames
}

/// Write `frames` frames of per-channel buffers into an interleaved device
/// buffer with stride `device_channels`. Device channels without a source
/// buffer are zeroed.
pub fn interleave(src: &[Vec<Sample>], frames: usize, device_channels: usize, dst: &mut [f32]) {
    if device_channels == 0 {
        return;
    }
    for (frame, out) in dst.chunks_exact_mut(device_channels).take(frames).enumerate() {
        for (ch, slot) in out.iter_mut().enumerate() {
            *slot = src
                .get(ch)
                .and_then(|buf| buf.get(frame))
                .map_or(0.0, |&s| s as f32);
        }
    }
}
