// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! Samples are pushed into a bounded buffer that the device callback drains.
//! Missing samples are rendered as silence.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{AudioError, Result};

/// Seconds of audio the buffer can hold before new samples are dropped.
const MAX_BUFFERED_SECONDS: usize = 10;

/// State shared between the device callback and the owner.
struct SharedState {
    /// Linear gain (stored as u32 bits of f32 for atomic access).
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

/// Output stream on the default device.
pub struct AudioOutput {
    buffer: Arc<Mutex<Vec<f32>>>,
    shared_state: Arc<SharedState>,
    max_buffer_size: usize,
    sample_rate: u32,
    channels: u16,
    /// Kept alive to maintain playback.
    _stream: cpal::Stream,
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput")
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .field("volume", &self.volume())
            .finish_non_exhaustive()
    }
}

impl AudioOutput {
    /// Opens the default output device and starts a silent stream.
    ///
    /// # Errors
    ///
    /// Returns an error if no output device exists, if its configuration
    /// cannot be read, or if the stream refuses to start.
    pub fn new(initial_volume: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let supported_config = device.default_output_config().map_err(|e| {
            AudioError::PlaybackRejected(format!("Failed to get audio config: {e}"))
        })?;

        let sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels();

        let shared_state = Arc::new(SharedState::new(initial_volume));
        let max_buffer_size = MAX_BUFFERED_SECONDS * sample_rate as usize * channels as usize;
        let buffer = Arc::new(Mutex::new(Vec::with_capacity(
            sample_rate as usize * channels as usize,
        )));

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            other => {
                return Err(AudioError::PlaybackRejected(format!(
                    "Unsupported audio sample format: {other:?}"
                ))
                .into())
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::PlaybackRejected(format!("Failed to start stream: {e}")))?;

        log::debug!("Audio output opened: {sample_rate} Hz, {channels} channel(s)");

        Ok(Self {
            buffer,
            shared_state,
            max_buffer_size,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream> {
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut buf) = buffer.lock() else {
                        for sample in data.iter_mut() {
                            *sample = T::from_sample(0.0f32);
                        }
                        return;
                    };

                    let volume = shared_state.volume();
                    for (i, sample) in data.iter_mut().enumerate() {
                        let value = buf.get(i).map_or(0.0, |s| s * volume);
                        // i16 conversion overflows at exactly 1.0.
                        *sample = T::from_sample(value.clamp(-1.0, 0.999_999_9));
                    }

                    let consumed = data.len().min(buf.len());
                    buf.drain(..consumed);
                },
                |err| log::error!("Audio output error: {err}"),
                None,
            )
            .map_err(|e| AudioError::PlaybackRejected(format!("Failed to build stream: {e}")))?;

        Ok(stream)
    }

    /// Queues interleaved samples in the device layout.
    ///
    /// Samples beyond the buffer capacity are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the playback buffer is poisoned.
    pub fn play(&self, samples: &[f32]) -> Result<()> {
        let mut buf = self
            .buffer
            .lock()
            .map_err(|_| AudioError::PlaybackRejected("Audio buffer poisoned".into()))?;
        let available = self.max_buffer_size.saturating_sub(buf.len());
        let take = samples.len().min(available);
        if take < samples.len() {
            log::warn!("Audio buffer full, dropping {} samples", samples.len() - take);
        }
        buf.extend_from_slice(&samples[..take]);
        Ok(())
    }

    /// Discards everything not played yet.
    pub fn stop(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }

    pub fn set_volume(&self, volume: f32) {
        self.shared_state.set_volume(volume.clamp(0.0, 1.0));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_state_volume_operations() {
        let state = SharedState::new(0.7);
        assert!((state.volume() - 0.7).abs() < 0.001);

        state.set_volume(0.25);
        assert!((state.volume() - 0.25).abs() < 0.001);
    }

    #[test]
    #[ignore = "requires audio hardware"]
    fn audio_output_can_be_created() {
        if let Ok(output) = AudioOutput::new(0.7) {
            assert!((output.volume() - 0.7).abs() < 0.001);
            assert!(output.sample_rate() > 0);
            assert!(output.channels() > 0);

            output.set_volume(2.0);
            assert!((output.volume() - 1.0).abs() < 0.001);

            assert!(output.play(&[0.0; 64]).is_ok());
            output.stop();
        }
    }
}
