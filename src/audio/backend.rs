// SPDX-License-Identifier: MPL-2.0
//! Media backend on the default audio device.

use super::decoder::{self, OutputFormat};
use super::output::{AudioOutput, PendingSamples};
use super::{HandleId, MediaBackend, MediaHandle};
use crate::error::{Error, Result};
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc;

/// Plays tracks through cpal, decoding each file on a background thread.
///
/// Without an output device every `open` fails, which leaves markers
/// clickable but silent.
pub struct DeviceBackend {
    output: Option<Rc<AudioOutput>>,
    ended_rx: Option<mpsc::UnboundedReceiver<HandleId>>,
    next_id: u64,
}

impl DeviceBackend {
    /// Opens the default output device at `volume`.
    pub fn new(volume: f32) -> Self {
        match AudioOutput::new(volume) {
            Ok((output, ended_rx)) => Self {
                output: Some(Rc::new(output)),
                ended_rx: Some(ended_rx),
                next_id: 0,
            },
            Err(err) => {
                tracing::warn!("audio disabled: {err}");
                Self {
                    output: None,
                    ended_rx: None,
                    next_id: 0,
                }
            }
        }
    }

    #[must_use]
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }
}

impl MediaBackend for DeviceBackend {
    type Handle = DeviceHandle;

    fn open(&mut self, source: &Path) -> Result<DeviceHandle> {
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| Error::Audio("No audio output device".to_string()))?;
        if !source.is_file() {
            return Err(Error::Audio(format!("{} not found", source.display())));
        }

        self.next_id += 1;
        let id = HandleId(self.next_id);
        let samples: PendingSamples = Arc::new(OnceLock::new());
        let format = OutputFormat {
            sample_rate: output.sample_rate(),
            channels: output.channels(),
        };

        let path = source.to_path_buf();
        let pending = Arc::clone(&samples);
        std::thread::Builder::new()
            .name("audio-decode".to_string())
            .spawn(move || {
                let decoded = decoder::decode_file(&path, format).unwrap_or_else(|err| {
                    tracing::warn!("cannot decode {}: {err}", path.display());
                    Vec::new()
                });
                let _ = pending.set(Arc::new(decoded));
            })
            .map_err(|e| Error::Audio(format!("Failed to spawn decoder: {e}")))?;

        Ok(DeviceHandle {
            id,
            output: Rc::clone(output),
            samples,
            paused: true,
        })
    }

    fn drain_finished(&mut self) -> Vec<HandleId> {
        let mut finished = Vec::new();
        if let Some(rx) = self.ended_rx.as_mut() {
            while let Ok(id) = rx.try_recv() {
                finished.push(id);
            }
        }
        finished
    }
}

/// A track opened on the device. Decoding may still be in progress;
/// playback starts as soon as samples are available.
pub struct DeviceHandle {
    id: HandleId,
    output: Rc<AudioOutput>,
    samples: PendingSamples,
    paused: bool,
}

impl MediaHandle for DeviceHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    fn play(&mut self) {
        self.output.play(self.id, &self.samples);
        self.paused = false;
    }

    fn pause(&mut self) {
        self.output.pause(self.id);
        self.paused = true;
    }

    fn rewind(&mut self) {
        self.output.rewind(self.id);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        self.output.release(self.id);
    }
}
