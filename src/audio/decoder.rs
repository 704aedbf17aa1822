// SPDX-License-Identifier: MPL-2.0
//! Whole-file audio decoding with `FFmpeg`.
//!
//! Tracks are short narration or ambience clips, so each one is decoded in
//! full and resampled to the output device's rate and channel count.

use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Once;

static FFMPEG_INIT: Once = Once::new();

/// Initializes `FFmpeg` once per process.
///
/// # Errors
///
/// Returns an error if `FFmpeg` fails to initialize.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Audio(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Target format for decoded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

/// Decodes the best audio stream of `path` into interleaved f32 samples.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, has no audio stream, or
/// the decoder or resampler cannot be created.
pub fn decode_file(path: &Path, format: OutputFormat) -> Result<Vec<f32>> {
    init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| Error::Audio(format!("Failed to open {}: {e}", path.display())))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Audio)
        .ok_or_else(|| Error::Audio(format!("No audio stream in {}", path.display())))?;
    let stream_index = input.index();

    let context = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Audio(format!("Failed to create codec context: {e}")))?;
    let mut decoder = context
        .decoder()
        .audio()
        .map_err(|e| Error::Audio(format!("Failed to create audio decoder: {e}")))?;

    let layout = match format.channels {
        1 => ffmpeg_next::ChannelLayout::MONO,
        _ => ffmpeg_next::ChannelLayout::STEREO,
    };
    let out_channels = if format.channels == 1 { 1 } else { 2 };

    let mut resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
        layout,
        format.sample_rate,
    )
    .map_err(|e| Error::Audio(format!("Failed to create resampler: {e}")))?;

    let mut samples = Vec::new();
    for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if let Err(e) = decoder.send_packet(&packet) {
            tracing::debug!("skipping bad audio packet: {e}");
            continue;
        }
        drain_frames(&mut decoder, &mut resampler, out_channels, &mut samples);
    }

    if decoder.send_eof().is_ok() {
        drain_frames(&mut decoder, &mut resampler, out_channels, &mut samples);
    }

    let interleaved = upmix(samples, out_channels, format.channels);
    tracing::debug!(
        path = %path.display(),
        samples = interleaved.len(),
        "audio decoded"
    );
    Ok(interleaved)
}

fn drain_frames(
    decoder: &mut ffmpeg_next::decoder::Audio,
    resampler: &mut ffmpeg_next::software::resampling::Context,
    channels: u16,
    out: &mut Vec<f32>,
) {
    let mut decoded = ffmpeg_next::frame::Audio::empty();
    while decoder.receive_frame(&mut decoded).is_ok() {
        let mut resampled = ffmpeg_next::frame::Audio::empty();
        if let Err(e) = resampler.run(&decoded, &mut resampled) {
            tracing::debug!("resampling failed: {e}");
            continue;
        }
        out.extend(extract_samples(resampled.data(0), resampled.samples(), channels));
    }
}

/// Reads packed little-endian f32 samples out of a frame plane.
fn extract_samples(data: &[u8], frames: usize, channels: u16) -> Vec<f32> {
    let sample_count = frames * usize::from(channels);
    data.chunks_exact(4)
        .take(sample_count)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// Spreads stereo frames over devices with more than two channels.
/// Extra channels are left silent.
fn upmix(samples: Vec<f32>, from: u16, to: u16) -> Vec<f32> {
    if to <= from {
        return samples;
    }
    let from = usize::from(from);
    let to = usize::from(to);
    let mut out = Vec::with_capacity(samples.len() / from * to);
    for frame in samples.chunks_exact(from) {
        out.extend_from_slice(frame);
        out.extend(std::iter::repeat_n(0.0, to - from));
    }
    out
}
