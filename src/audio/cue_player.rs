// SPDX-License-Identifier: MPL-2.0
//! WAV cue playback on the default output device.

use super::output::AudioOutput;
use crate::curtain::{Cue, CuePlayer};
use crate::error::{AudioError, Result};
use std::path::{Path, PathBuf};

/// Decoded PCM, interleaved and normalized to [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct Pcm {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl Pcm {
    /// Reads a WAV file.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::AssetMissing`] if the file does not exist and
    /// [`AudioError::Decode`] if it is not a readable WAV file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        if spec.channels == 0 {
            return Err(AudioError::Decode("WAV file declares zero channels".into()).into());
        }

        Ok(Self {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }

    /// Number of frames (samples per channel).
    #[must_use]
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    /// Converts to the device layout: channel count first, then rate.
    #[must_use]
    pub fn to_layout(&self, channels: u16, sample_rate: u32) -> Vec<f32> {
        let remixed = remix(&self.samples, self.channels, channels);
        resample(&remixed, channels, self.sample_rate, sample_rate)
    }
}

/// Maps interleaved frames from `from` channels to `to` channels.
///
/// Mono is duplicated, downmixing to mono averages, other layouts reuse the
/// last source channel for extra outputs.
fn remix(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    if from == to || from == 0 || to == 0 {
        return samples.to_vec();
    }
    let (from, to) = (usize::from(from), usize::from(to));

    let mut out = Vec::with_capacity(samples.len() / from * to);
    for frame in samples.chunks_exact(from) {
        if to == 1 {
            out.push(frame.iter().sum::<f32>() / from as f32);
            continue;
        }
        for channel in 0..to {
            out.push(frame[channel.min(from - 1)]);
        }
    }
    out
}

/// Linear interpolation between neighbouring frames.
fn resample(samples: &[f32], channels: u16, from_rate: u32, to_rate: u32) -> Vec<f32> {
    let channels = usize::from(channels.max(1));
    if from_rate == to_rate || from_rate == 0 || to_rate == 0 || samples.len() < channels {
        return samples.to_vec();
    }

    let frames_in = samples.len() / channels;
    let ratio = f64::from(from_rate) / f64::from(to_rate);
    let frames_out = ((frames_in as f64) / ratio).floor() as usize;

    let mut out = Vec::with_capacity(frames_out * channels);
    for frame in 0..frames_out {
        let position = frame as f64 * ratio;
        let index = (position.floor() as usize).min(frames_in - 1);
        let next = (index + 1).min(frames_in - 1);
        let fraction = (position - index as f64) as f32;
        for channel in 0..channels {
            let a = samples[index * channels + channel];
            let b = samples[next * channels + channel];
            out.push(a + (b - a) * fraction);
        }
    }
    out
}

/// [`CuePlayer`] backed by `cpal` and `hound`.
///
/// The device is opened and the asset decoded on the first play, so a page
/// with sound disabled never touches either.
#[derive(Debug)]
pub struct CpalCuePlayer {
    asset_root: PathBuf,
    output: Option<AudioOutput>,
    cache: Option<(PathBuf, Pcm)>,
}

impl CpalCuePlayer {
    /// Creates a player resolving cue paths against `asset_root`.
    #[must_use]
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            output: None,
            cache: None,
        }
    }

    fn pcm(&mut self, path: PathBuf) -> Result<&Pcm> {
        let cached = matches!(&self.cache, Some((cached, _)) if *cached == path);
        if !cached {
            if !path.exists() {
                return Err(AudioError::AssetMissing(path.display().to_string()).into());
            }
            let pcm = Pcm::load(&path)?;
            log::debug!(
                "Loaded cue {} ({} frames, {} Hz)",
                path.display(),
                pcm.frames(),
                pcm.sample_rate
            );
            self.cache = Some((path, pcm));
        }
        match &self.cache {
            Some((_, pcm)) => Ok(pcm),
            None => Err(AudioError::Decode("cue cache empty".into()).into()),
        }
    }
}

impl CuePlayer for CpalCuePlayer {
    fn play(&mut self, cue: &Cue) -> Result<()> {
        let path = self.asset_root.join(cue.path);
        let pcm = self.pcm(path)?.clone();

        if self.output.is_none() {
            self.output = Some(AudioOutput::new(cue.volume)?);
        }
        let Some(output) = self.output.as_ref() else {
            return Err(AudioError::NoOutputDevice.into());
        };

        let samples = pcm.to_layout(output.channels(), output.sample_rate());
        let skip = (cue.start.as_secs_f64() * f64::from(output.sample_rate())) as usize
            * usize::from(output.channels());

        output.stop();
        output.set_volume(cue.volume);
        output.play(samples.get(skip..).unwrap_or_default())
    }
}
