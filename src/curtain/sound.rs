// SPDX-License-Identifier: MPL-2.0
//! Best-effort opening cue.
//!
//! The controller only talks to a [`CuePlayer`]. Playback failure is logged
//! and arms a single retry on the next page click; it never reaches the
//! caller and never stops the curtain from opening.

use crate::config::{CUE_ASSET_PATH, CUE_VOLUME};
use crate::error::Result;
use std::time::Duration;

/// A sound asset with its playback parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub path: &'static str,
    /// Playback volume (0.0 to 1.0).
    pub volume: f32,
    /// Offset in the asset where playback starts.
    pub start: Duration,
}

/// Applause played when the curtain starts opening.
pub const CLAPPING: Cue = Cue {
    path: CUE_ASSET_PATH,
    volume: CUE_VOLUME,
    start: Duration::ZERO,
};

/// Capability to play a cue.
pub trait CuePlayer {
    /// Starts playing `cue`.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset cannot be loaded or the output refuses
    /// to play it.
    fn play(&mut self, cue: &Cue) -> Result<()>;
}

/// Player for hosts without audio output. Always succeeds silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlayer;

impl CuePlayer for NullPlayer {
    fn play(&mut self, _cue: &Cue) -> Result<()> {
        Ok(())
    }
}

/// Cue playback with a one-shot retry after failure.
pub struct SoundCue {
    player: Box<dyn CuePlayer>,
    cue: Cue,
    retry_armed: bool,
}

impl std::fmt::Debug for SoundCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundCue")
            .field("cue", &self.cue)
            .field("retry_armed", &self.retry_armed)
            .finish_non_exhaustive()
    }
}

impl Default for SoundCue {
    fn default() -> Self {
        Self::new(Box::new(NullPlayer))
    }
}

impl SoundCue {
    #[must_use]
    pub fn new(player: Box<dyn CuePlayer>) -> Self {
        Self {
            player,
            cue: CLAPPING,
            retry_armed: false,
        }
    }

    /// Attempts to play the cue. On failure, the next page click retries once.
    pub fn trigger(&mut self) {
        match self.player.play(&self.cue) {
            Ok(()) => log::info!("Opening cue playing"),
            Err(err) => {
                log::warn!("Opening cue playback prevented: {err}");
                self.retry_armed = true;
            }
        }
    }

    /// Consumes the pending retry, if any. Called on every page click.
    pub fn on_page_click(&mut self) {
        if !std::mem::take(&mut self.retry_armed) {
            return;
        }
        if let Err(err) = self.player.play(&self.cue) {
            log::warn!("Opening cue retry failed: {err}");
        }
    }

    /// Returns whether a retry is waiting for the next click.
    #[must_use]
    pub fn retry_armed(&self) -> bool {
        self.retry_armed
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedPlayer;
    use super::*;

    #[test]
    fn clapping_cue_uses_fixed_parameters() {
        assert_eq!(CLAPPING.path, "curtain-assets/sounds/clapping.wav");
        assert!((CLAPPING.volume - 0.7).abs() < f32::EPSILON);
        assert_eq!(CLAPPING.start, Duration::ZERO);
    }

    #[test]
    fn successful_play_does_not_arm_retry() {
        let player = ScriptedPlayer::default();
        let mut sound = SoundCue::new(Box::new(player.clone()));

        sound.trigger();
        sound.on_page_click();

        assert_eq!(player.attempt_count(), 1);
        assert!(!sound.retry_armed());
    }

    #[test]
    fn failure_retries_once_on_next_click() {
        let player = ScriptedPlayer::failing(1);
        let mut sound = SoundCue::new(Box::new(player.clone()));

        sound.trigger();
        assert!(sound.retry_armed());

        sound.on_page_click();
        sound.on_page_click();

        assert_eq!(player.attempt_count(), 2);
        assert!(!sound.retry_armed());
    }

    #[test]
    fn failed_retry_is_dropped() {
        let player = ScriptedPlayer::failing(2);
        let mut sound = SoundCue::new(Box::new(player.clone()));

        sound.trigger();
        sound.on_page_click();
        sound.on_page_click();

        assert_eq!(player.attempt_count(), 2);
        assert!(!sound.retry_armed());
    }

    #[test]
    fn null_player_always_succeeds() {
        let mut sound = SoundCue::default();
        sound.trigger();
        assert!(!sound.retry_armed());
    }
}
