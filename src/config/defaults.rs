// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the curtain configuration.
//!
//! Every field of [`super::CurtainConfig`] that the caller leaves unset falls
//! back to one of these constants.

// ==========================================================================
// Content Defaults
// ==========================================================================

/// Headline shown in the middle of the closed curtain.
pub const DEFAULT_TITLE: &str = "Welcome";

/// Secondary line shown under the title.
pub const DEFAULT_SUBTITLE: &str = "Click to Enter";

/// Label of the activation button.
pub const DEFAULT_BUTTON_TEXT: &str = "Open Curtains";

// ==========================================================================
// Behavior Defaults
// ==========================================================================

/// Whether the curtain opens by itself after [`DEFAULT_AUTO_OPEN_DELAY_MS`].
pub const DEFAULT_AUTO_OPEN: bool = false;

/// Delay before an automatic opening (in milliseconds).
pub const DEFAULT_AUTO_OPEN_DELAY_MS: i64 = 5000;

/// Whether sparkle particles fall while the curtain is closed.
pub const DEFAULT_SPARKLES: bool = true;

/// Whether the opening cue is played.
pub const DEFAULT_SOUND: bool = false;

/// Duration of the panel opening transition (in milliseconds).
pub const DEFAULT_SPEED_MS: i64 = 2000;

// ==========================================================================
// Animation Constants
// ==========================================================================

/// Fade-out time between the end of the panel transition and removal
/// of the overlay (in milliseconds).
pub const REVEAL_FADE_MS: u64 = 1000;

/// Number of particles emitted right after initialization.
pub const INITIAL_SPARKLE_COUNT: u32 = 5;

/// Offset between two particles of the initial burst (in milliseconds).
pub const INITIAL_SPARKLE_STAGGER_MS: u64 = 100;

/// Period of the particle spawner while the curtain is closed (in milliseconds).
pub const SPARKLE_INTERVAL_MS: u64 = 300;

/// Lifetime of a single particle (in milliseconds).
pub const SPARKLE_LIFETIME_MS: u64 = 5000;

// ==========================================================================
// Sound Defaults
// ==========================================================================

/// Relative path of the opening cue asset.
pub const CUE_ASSET_PATH: &str = "curtain-assets/sounds/clapping.wav";

/// Playback volume of the opening cue (0.0 to 1.0).
pub const CUE_VOLUME: f32 = 0.7;
