// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The output plays a single voice: the samples of the active track, read
//! straight from the decoded buffer by the device callback. When the voice
//! runs out of samples its id is sent on the ended channel.

use super::HandleId;
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use tokio::sync::mpsc;

/// Interleaved f32 samples normalized to [-1.0, 1.0].
pub type AudioSamples = Arc<Vec<f32>>;

/// Samples filled in by a decoding thread once they are ready.
pub type PendingSamples = Arc<OnceLock<AudioSamples>>;

struct SharedState {
    /// Current volume (stored as u32 bits of f32 for atomic access).
    volume_bits: AtomicU32,
}

impl SharedState {
    fn new(initial_volume: f32) -> Self {
        Self {
            volume_bits: AtomicU32::new(initial_volume.to_bits()),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: f32) {
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
    }
}

struct Voice {
    id: HandleId,
    samples: PendingSamples,
    cursor: usize,
    paused: bool,
}

impl Voice {
    /// Mixes into `data`. Returns true once every sample has been played.
    fn render(&mut self, data: &mut [f32], gain: f32) -> bool {
        data.fill(0.0);
        if self.paused {
            return false;
        }
        // Still decoding.
        let Some(samples) = self.samples.get() else {
            return false;
        };

        let remaining = samples.len().saturating_sub(self.cursor);
        let count = remaining.min(data.len());
        for (out, sample) in data.iter_mut().zip(&samples[self.cursor..self.cursor + count]) {
            // Clamping slightly below 1.0 avoids i16 overflow on conversion.
            *out = (sample * gain).clamp(-1.0, 0.999_999_9);
        }
        self.cursor += count;
        self.cursor >= samples.len()
    }
}

type SharedVoice = Arc<Mutex<Option<Voice>>>;

/// Audio output stream on the default device.
pub struct AudioOutput {
    voice: SharedVoice,
    shared_state: Arc<SharedState>,
    sample_rate: u32,
    channels: u16,
    /// The audio stream (kept alive to maintain playback).
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device.
    ///
    /// Returns the output and the receiver on which finished voice ids
    /// arrive.
    ///
    /// # Errors
    ///
    /// Returns an error if no output device is found, its configuration
    /// cannot be read, or the stream fails to start.
    pub fn new(initial_volume: f32) -> Result<(Self, mpsc::UnboundedReceiver<HandleId>)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();

        let shared_state = Arc::new(SharedState::new(initial_volume));
        let voice: SharedVoice = Arc::new(Mutex::new(None));
        let (ended_tx, ended_rx) = mpsc::unbounded_channel();

        let config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &config,
                Arc::clone(&voice),
                Arc::clone(&shared_state),
                ended_tx,
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &config,
                Arc::clone(&voice),
                Arc::clone(&shared_state),
                ended_tx,
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &config,
                Arc::clone(&voice),
                Arc::clone(&shared_state),
                ended_tx,
            )?,
            other => {
                return Err(Error::Audio(format!(
                    "Unsupported audio sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Audio(format!("Failed to start audio stream: {e}")))?;

        tracing::info!(sample_rate, channels, "audio output opened");

        Ok((
            Self {
                voice,
                shared_state,
                sample_rate,
                channels,
                _stream: stream,
            },
            ended_rx,
        ))
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        voice: SharedVoice,
        shared_state: Arc<SharedState>,
        ended_tx: mpsc::UnboundedSender<HandleId>,
    ) -> Result<cpal::Stream> {
        let mut scratch: Vec<f32> = Vec::new();
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    scratch.resize(data.len(), 0.0);
                    scratch.fill(0.0);

                    if let Ok(mut slot) = voice.lock() {
                        // Quadratic curve so the volume setting feels linear.
                        let gain = shared_state.volume().powi(2);
                        let finished = slot
                            .as_mut()
                            .is_some_and(|v| v.render(&mut scratch, gain));
                        if finished {
                            if let Some(done) = slot.take() {
                                let _ = ended_tx.send(done.id);
                            }
                        }
                    }

                    for (out, sample) in data.iter_mut().zip(&scratch) {
                        *out = T::from_sample(*sample);
                    }
                },
                |err| {
                    tracing::error!("audio output error: {err}");
                },
                None,
            )
            .map_err(|e| Error::Audio(format!("Failed to build audio stream: {e}")))?;

        Ok(stream)
    }

    fn with_voice(&self, f: impl FnOnce(&mut Option<Voice>)) {
        if let Ok(mut slot) = self.voice.lock() {
            f(&mut slot);
        }
    }

    /// Resumes the voice `id`, or replaces the current voice with it.
    pub fn play(&self, id: HandleId, samples: &PendingSamples) {
        self.with_voice(|slot| {
            if let Some(voice) = slot.as_mut().filter(|v| v.id == id) {
                voice.paused = false;
                return;
            }
            *slot = Some(Voice {
                id,
                samples: Arc::clone(samples),
                cursor: 0,
                paused: false,
            });
        });
    }

    pub fn pause(&self, id: HandleId) {
        self.with_voice(|slot| {
            if let Some(voice) = slot.as_mut().filter(|v| v.id == id) {
                voice.paused = true;
            }
        });
    }

    pub fn rewind(&self, id: HandleId) {
        self.with_voice(|slot| {
            if let Some(voice) = slot.as_mut().filter(|v| v.id == id) {
                voice.cursor = 0;
            }
        });
    }

    /// Drops the voice `id` if it is the current one.
    pub fn release(&self, id: HandleId) {
        self.with_voice(|slot| {
            if slot.as_ref().is_some_and(|v| v.id == id) {
                *slot = None;
            }
        });
    }

    /// Sets the volume in [0.0, 1.0].
    pub fn set_volume(&self, volume: f32) {
        self.shared_state.set_volume(volume);
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.shared_state.volume()
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
